//! I2C controller abstractions
//!
//! Provides the lifecycle and transfer trait for blocking I2C controller
//! peripherals, plus the configuration and error types used across the
//! stack.

/// Errors shared by the bus and driver layers
///
/// The set is deliberately small: callers branch on the code, not on
/// implementation detail. `TransferFailed` specifically means the
/// addressed device never acknowledged, which the discovery scan relies
/// on to tell "nobody home" apart from a sick bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// A parameter was outside the accepted range
    InvalidArgument,
    /// The addressed device did not acknowledge the transfer
    TransferFailed,
    /// The peripheral is not installed or not in controller mode
    InvalidState,
    /// The bus stayed busy beyond the transaction wait budget
    Timeout,
    /// A result buffer ran out of capacity
    BufferFull,
    /// The operation is not available with this hardware arrangement
    NotSupported,
}

/// I2C controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// GPIO number of the data line
    pub sda_pin: u8,
    /// GPIO number of the clock line
    pub scl_pin: u8,
    /// Enable internal pull-ups on both lines
    pub pullup: bool,
    /// Clock-stretch budget in controller ticks, 0 to disable
    pub clock_stretch: u32,
    /// SCL frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            sda_pin: 4,
            scl_pin: 5,
            pullup: true,
            clock_stretch: 200,
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Default wiring at standard mode (100 kHz)
    pub const STANDARD: Self = Self {
        sda_pin: 4,
        scl_pin: 5,
        pullup: true,
        clock_stretch: 200,
        frequency: 100_000,
    };

    /// Default wiring at fast mode (400 kHz)
    pub const FAST: Self = Self {
        sda_pin: 4,
        scl_pin: 5,
        pullup: true,
        clock_stretch: 200,
        frequency: 400_000,
    };
}

/// Blocking I2C controller peripheral
///
/// Follows the lifecycle of memory-mapped controller blocks: install the
/// peripheral in controller mode, configure its lines and clocking, run
/// transfers, release on teardown. The transaction layer owns exactly one
/// implementation and sequences these calls; implementations only need to
/// report honestly through [`BusError`].
pub trait I2cPeripheral {
    /// Claim the peripheral in controller mode
    fn install(&mut self) -> Result<(), BusError>;

    /// Apply line, pull-up and clocking configuration
    fn configure(&mut self, config: &I2cConfig) -> Result<(), BusError>;

    /// Release the peripheral
    ///
    /// Best effort: teardown has nobody left to report to.
    fn release(&mut self);

    /// Address a device for writing and send `bytes`
    ///
    /// The transaction on the wire is start, address byte with the
    /// direction bit clear, payload, stop. An empty payload still
    /// addresses the device and collects its acknowledgment, which makes
    /// it usable as a presence probe.
    ///
    /// # Arguments
    /// * `address` - 7-bit device address, right aligned
    /// * `bytes` - Payload, may be empty
    /// * `timeout_ms` - Budget to wait for a busy bus before [`BusError::Timeout`]
    fn write(&mut self, address: u8, bytes: &[u8], timeout_ms: u32) -> Result<(), BusError>;

    /// Address a device for reading and fill `buf`
    ///
    /// The transaction on the wire is start, address byte with the
    /// direction bit set, payload, stop. The final byte is left
    /// unacknowledged to end the transfer.
    ///
    /// # Arguments
    /// * `address` - 7-bit device address, right aligned
    /// * `buf` - Buffer to read into
    /// * `timeout_ms` - Budget to wait for a busy bus before [`BusError::Timeout`]
    fn read(&mut self, address: u8, buf: &mut [u8], timeout_ms: u32) -> Result<(), BusError>;
}
