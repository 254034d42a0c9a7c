//! Device addressing

use tessera_hal::BusError;

/// A validated 7-bit I2C device address
///
/// The address occupies the upper seven bits of the on-wire address byte;
/// the eighth bit selects the transfer direction. Keeping the validated
/// form in its own type means scan results and driver configuration can
/// never carry an out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAddress(u8);

impl DeviceAddress {
    /// Highest valid 7-bit address
    pub const MAX: u8 = 0x7F;

    /// Validate a raw 7-bit address
    pub fn new(raw: u8) -> Result<Self, BusError> {
        if raw > Self::MAX {
            return Err(BusError::InvalidArgument);
        }
        Ok(Self(raw))
    }

    /// The raw 7-bit address, right aligned
    pub fn raw(&self) -> u8 {
        self.0
    }

    /// The on-wire address byte for a write transfer (direction bit clear)
    pub fn write_intent(&self) -> u8 {
        self.0 << 1
    }

    /// The on-wire address byte for a read transfer (direction bit set)
    pub fn read_intent(&self) -> u8 {
        (self.0 << 1) | 1
    }
}
