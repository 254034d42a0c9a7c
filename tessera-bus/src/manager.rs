//! Bus manager
//!
//! Owns the I2C controller peripheral and layers addressed byte transfers
//! and device discovery on top of it.

use heapless::Vec;
use tessera_hal::{BusError, I2cConfig, I2cPeripheral};

use crate::address::DeviceAddress;

/// Wait budget for a single transaction in milliseconds
///
/// A transaction that cannot get onto the bus within this window fails
/// with [`BusError::Timeout`] instead of stalling the caller.
pub const TRANSFER_TIMEOUT_MS: u32 = 100;

/// I2C bus manager
///
/// Owns the controller peripheral for its whole service life. At most one
/// manager can drive a given controller because construction takes the
/// peripheral by value.
pub struct BusManager<P> {
    peripheral: P,
    installed: bool,
}

impl<P: I2cPeripheral> BusManager<P> {
    /// Take ownership of an uninstalled peripheral
    pub fn new(peripheral: P) -> Self {
        Self {
            peripheral,
            installed: false,
        }
    }

    /// Install the controller and apply `config`
    ///
    /// When configuration fails the freshly installed peripheral is
    /// released again, so the manager is never left half alive. Calling
    /// `init` while already installed fails with
    /// [`BusError::InvalidState`].
    pub fn init(&mut self, config: &I2cConfig) -> Result<(), BusError> {
        if self.installed {
            return Err(BusError::InvalidState);
        }
        self.peripheral.install()?;
        if let Err(e) = self.peripheral.configure(config) {
            self.peripheral.release();
            #[cfg(feature = "defmt")]
            defmt::debug!("i2c configure failed, controller released");
            return Err(e);
        }
        self.installed = true;
        #[cfg(feature = "defmt")]
        defmt::debug!("i2c controller installed");
        Ok(())
    }

    /// Release the controller
    ///
    /// Releasing an uninstalled manager does nothing.
    pub fn deinit(&mut self) {
        if self.installed {
            self.peripheral.release();
            self.installed = false;
        }
    }

    /// Whether `init` has completed
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Write one byte to the device at `address`
    pub fn write_byte(&mut self, address: DeviceAddress, byte: u8) -> Result<(), BusError> {
        if !self.installed {
            return Err(BusError::InvalidState);
        }
        self.peripheral
            .write(address.raw(), &[byte], TRANSFER_TIMEOUT_MS)
    }

    /// Read one byte from the device at `address`
    pub fn read_byte(&mut self, address: DeviceAddress) -> Result<u8, BusError> {
        if !self.installed {
            return Err(BusError::InvalidState);
        }
        let mut buf = [0u8; 1];
        self.peripheral
            .read(address.raw(), &mut buf, TRANSFER_TIMEOUT_MS)?;
        Ok(buf[0])
    }

    /// Probe `address` with a zero-length write
    ///
    /// `Ok(true)` on acknowledgment, `Ok(false)` when nothing answered,
    /// any other failure verbatim.
    fn probe(&mut self, address: u8) -> Result<bool, BusError> {
        match self.peripheral.write(address, &[], TRANSFER_TIMEOUT_MS) {
            Ok(()) => Ok(true),
            Err(BusError::TransferFailed) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Find the lowest-addressed device on the bus
    ///
    /// Probes every address in ascending order and stops at the first
    /// acknowledgment. An empty bus is not an error: the sweep completes
    /// and reports `Ok(None)`. A missing acknowledgment keeps the sweep
    /// going; any other failure aborts it.
    pub fn find_first_device(&mut self) -> Result<Option<DeviceAddress>, BusError> {
        if !self.installed {
            return Err(BusError::InvalidState);
        }
        for raw in 0..=DeviceAddress::MAX {
            if self.probe(raw)? {
                #[cfg(feature = "defmt")]
                defmt::debug!("i2c device found at 0x{=u8:x}", raw);
                return DeviceAddress::new(raw).map(Some);
            }
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("i2c sweep found no device");
        Ok(None)
    }

    /// Collect every responding device into `found`
    ///
    /// The buffer is cleared first. Addresses are appended in ascending
    /// order and `found.len()` is the device count afterwards. When the
    /// buffer fills up before the range is exhausted the sweep aborts
    /// with [`BusError::BufferFull`], keeping what it found so far.
    pub fn scan_devices<const N: usize>(
        &mut self,
        found: &mut Vec<DeviceAddress, N>,
    ) -> Result<(), BusError> {
        if !self.installed {
            return Err(BusError::InvalidState);
        }
        found.clear();
        for raw in 0..=DeviceAddress::MAX {
            if self.probe(raw)? {
                let address = DeviceAddress::new(raw)?;
                if found.push(address).is_err() {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("i2c scan buffer full after {=usize} devices", found.len());
                    return Err(BusError::BufferFull);
                }
            }
        }
        Ok(())
    }

    /// Shared access to the underlying peripheral
    pub fn peripheral(&self) -> &P {
        &self.peripheral
    }

    /// Tear the manager down and hand the peripheral back
    pub fn free(mut self) -> P {
        self.deinit();
        self.peripheral
    }
}
