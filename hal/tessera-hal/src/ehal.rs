//! `embedded-hal` interop
//!
//! Adapts any blocking [`embedded_hal::i2c::I2c`] implementation to the
//! [`I2cPeripheral`] contract, so chip HALs that already expose the
//! standard trait need no bespoke glue crate.

use embedded_hal::i2c::I2c;

use crate::i2c::{BusError, I2cConfig, I2cPeripheral};

/// Adapter wrapping an `embedded-hal` I2C controller
///
/// The wrapped bus arrives installed and clocked by its own HAL, so the
/// lifecycle calls are accepted as no-ops and the per-transaction wait
/// budget defers to whatever timeout handling the implementation has.
///
/// Failure detail is HAL-specific, and every transfer fault collapses to
/// [`BusError::TransferFailed`], the code the discovery scan treats as a
/// missing acknowledgment. Chip-native peripheral implementations report
/// `InvalidState` and `Timeout` with full fidelity; this adapter cannot.
pub struct EhalI2c<T> {
    bus: T,
}

impl<T> EhalI2c<T> {
    /// Wrap a ready-to-use bus
    pub fn new(bus: T) -> Self {
        Self { bus }
    }

    /// Recover the wrapped bus
    pub fn free(self) -> T {
        self.bus
    }
}

impl<T: I2c> I2cPeripheral for EhalI2c<T> {
    fn install(&mut self) -> Result<(), BusError> {
        Ok(())
    }

    fn configure(&mut self, _config: &I2cConfig) -> Result<(), BusError> {
        Ok(())
    }

    fn release(&mut self) {}

    fn write(&mut self, address: u8, bytes: &[u8], _timeout_ms: u32) -> Result<(), BusError> {
        self.bus
            .write(address, bytes)
            .map_err(|_| BusError::TransferFailed)
    }

    fn read(&mut self, address: u8, buf: &mut [u8], _timeout_ms: u32) -> Result<(), BusError> {
        self.bus
            .read(address, buf)
            .map_err(|_| BusError::TransferFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    #[derive(Debug, PartialEq)]
    struct FakeError;

    impl embedded_hal::i2c::Error for FakeError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        }
    }

    /// Records the last transaction and can be told to reject everything.
    struct FakeBus {
        last_address: u8,
        written: [u8; 8],
        written_len: usize,
        read_fill: u8,
        reject: bool,
    }

    impl FakeBus {
        fn new() -> Self {
            Self {
                last_address: 0,
                written: [0; 8],
                written_len: 0,
                read_fill: 0,
                reject: false,
            }
        }
    }

    impl ErrorType for FakeBus {
        type Error = FakeError;
    }

    impl I2c for FakeBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), FakeError> {
            if self.reject {
                return Err(FakeError);
            }
            self.last_address = address;
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) => {
                        for byte in bytes.iter() {
                            self.written[self.written_len] = *byte;
                            self.written_len += 1;
                        }
                    }
                    Operation::Read(buf) => {
                        for slot in buf.iter_mut() {
                            *slot = self.read_fill;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_write_passes_address_and_payload_through() {
        let mut adapter = EhalI2c::new(FakeBus::new());
        adapter.write(0x27, &[0xAB, 0xCD], 100).unwrap();
        let bus = adapter.free();
        assert_eq!(bus.last_address, 0x27);
        assert_eq!(&bus.written[..bus.written_len], &[0xAB, 0xCD]);
    }

    #[test]
    fn test_empty_write_still_addresses_the_device() {
        let mut adapter = EhalI2c::new(FakeBus::new());
        adapter.write(0x3F, &[], 100).unwrap();
        let bus = adapter.free();
        assert_eq!(bus.last_address, 0x3F);
        assert_eq!(bus.written_len, 0);
    }

    #[test]
    fn test_read_fills_buffer_from_bus() {
        let mut fake = FakeBus::new();
        fake.read_fill = 0x5A;
        let mut adapter = EhalI2c::new(fake);
        let mut buf = [0u8; 1];
        adapter.read(0x27, &mut buf, 100).unwrap();
        assert_eq!(buf, [0x5A]);
    }

    #[test]
    fn test_transfer_faults_map_to_transfer_failed() {
        let mut fake = FakeBus::new();
        fake.reject = true;
        let mut adapter = EhalI2c::new(fake);
        assert_eq!(
            adapter.write(0x27, &[0x00], 100),
            Err(BusError::TransferFailed)
        );
        let mut buf = [0u8; 1];
        assert_eq!(
            adapter.read(0x27, &mut buf, 100),
            Err(BusError::TransferFailed)
        );
    }

    #[test]
    fn test_lifecycle_calls_are_accepted() {
        let mut adapter = EhalI2c::new(FakeBus::new());
        assert_eq!(adapter.install(), Ok(()));
        assert_eq!(adapter.configure(&I2cConfig::default()), Ok(()));
        adapter.release();
    }
}
