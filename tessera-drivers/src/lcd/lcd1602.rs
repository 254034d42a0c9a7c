//! HD44780 character display behind an I2C expander backpack
//!
//! Drives a 16x2 character module through a PCF8574-style backpack in
//! 4-bit mode. These panels are written to blind: every bus transaction
//! refreshes a recorded result and the multi-transfer sequences always
//! run to completion, so a glitch on one frame never wedges the driver
//! mid-operation. Callers that care inspect [`Lcd1602::last_result`].

use embedded_hal::delay::DelayNs;
use tessera_bus::{BusManager, DeviceAddress};
use tessera_hal::{BusError, I2cConfig, I2cPeripheral};

use super::framing::{self, cmd, Backlight, TransferMode};

/// Power-on settle before the wake sequence (datasheet: > 40 ms)
const POWER_ON_SETTLE_MS: u32 = 50;
/// Wait after the first wake primer (datasheet: > 4.1 ms)
const WAKE_SETTLE_MS: u32 = 10;
/// Wait after the second wake primer (datasheet: > 100 us)
const WAKE_SETTLE_US: u32 = 120;
/// Enable line high time (datasheet: > 450 ns)
const ENABLE_PULSE_US: u32 = 1;
/// Instruction execution time for ordinary commands (datasheet: > 37 us)
const COMMAND_SETTLE_US: u32 = 50;
/// Execution time for clear, which rewrites the whole DDRAM (> 1.52 ms)
const CLEAR_SETTLE_MS: u32 = 2;

/// Wake-up primer nibble, requests 8-bit mode three times over
const WAKE: u8 = 0x03;
/// Width-select nibble, drops the interface into 4-bit mode
const FOUR_BIT: u8 = 0x02;

/// Number of CGRAM glyph slots
pub const GLYPH_SLOTS: u8 = 8;
/// Rows in one 5x8 glyph pattern
pub const GLYPH_ROWS: usize = 8;

/// Driver configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdConfig {
    /// Fixed device address, or `None` to resolve by bus discovery
    pub address: Option<DeviceAddress>,
    /// Backlight state applied from the first framed word on
    pub backlight: Backlight,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            address: None,
            backlight: Backlight::On,
        }
    }
}

/// HD44780 driver over an expander backpack
///
/// Callers follow a fixed sequence: [`Self::init`] to bring the bus up
/// and resolve the address, [`Self::start`] to put the controller into
/// 4-bit mode, then operations. Framing assumes 4-bit mode, so issuing
/// operations before `start` leaves the controller interpreting garbage.
pub struct Lcd1602<P, D> {
    bus: BusManager<P>,
    delay: D,
    address: Option<DeviceAddress>,
    backlight: Backlight,
    last_result: Result<(), BusError>,
}

impl<P, D> Lcd1602<P, D>
where
    P: I2cPeripheral,
    D: DelayNs,
{
    /// Create a driver over an owned bus manager
    pub fn new(bus: BusManager<P>, delay: D, config: LcdConfig) -> Self {
        Self {
            bus,
            delay,
            address: config.address,
            backlight: config.backlight,
            last_result: Ok(()),
        }
    }

    /// Bring the bus up and resolve the display address
    ///
    /// Installs and configures the controller, then sweeps the bus for
    /// the first responding device when no fixed address was configured.
    /// A sweep that finds nothing is not an error here; the miss surfaces
    /// as `InvalidState` on the first framed transfer instead.
    pub fn init(&mut self, config: &I2cConfig) -> Result<(), BusError> {
        self.last_result = self.bus.init(config);
        if self.last_result.is_ok() && self.address.is_none() {
            match self.bus.find_first_device() {
                Ok(Some(address)) => {
                    #[cfg(feature = "defmt")]
                    defmt::info!("display resolved at 0x{=u8:x}", address.raw());
                    self.address = Some(address);
                }
                Ok(None) => {
                    #[cfg(feature = "defmt")]
                    defmt::info!("no device answered the address sweep");
                }
                Err(e) => self.last_result = Err(e),
            }
        }
        self.last_result
    }

    /// Release the bus controller
    pub fn deinit(&mut self) {
        self.bus.deinit();
    }

    /// Resolved device address, if any
    pub fn address(&self) -> Option<DeviceAddress> {
        self.address
    }

    /// Result of the most recent bus transaction
    pub fn last_result(&self) -> Result<(), BusError> {
        self.last_result
    }

    /// Run the 4-bit cold-start sequence
    ///
    /// Settle, three wake primers, width select, then the four framed
    /// configuration commands: function set (two lines), display control
    /// (pixels on, cursor off), entry mode (counter stepping rightward,
    /// no shift), return home. Always runs to completion; the return
    /// value is the recorded result of the final transfer.
    pub fn start(&mut self) -> Result<(), BusError> {
        self.delay.delay_ms(POWER_ON_SETTLE_MS);
        self.send_nibble(WAKE);
        self.delay.delay_ms(WAKE_SETTLE_MS);
        self.send_nibble(WAKE);
        self.delay.delay_us(WAKE_SETTLE_US);
        self.send_nibble(WAKE);
        self.send_nibble(FOUR_BIT);

        self.send(cmd::FUNCTION_SET | cmd::TWO_LINES, TransferMode::Command);
        self.send(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON, TransferMode::Command);
        self.send(cmd::ENTRY_MODE | cmd::MOVE_RIGHT, TransferMode::Command);
        self.send(cmd::RETURN_HOME, TransferMode::Command);

        #[cfg(feature = "defmt")]
        defmt::debug!("display bring-up complete");
        self.last_result
    }

    /// Print one character code at a DDRAM position
    ///
    /// `position` is the raw DDRAM address (the second row starts at
    /// 0x40). `code` indexes the character generator, so the custom
    /// glyph slots are reachable as codes 0-7.
    pub fn print_char(&mut self, position: u8, code: u8) -> Result<(), BusError> {
        self.send(cmd::SET_DDRAM | position, TransferMode::Command);
        self.send(code, TransferMode::DataWrite);
        self.last_result
    }

    /// Store a 5x8 glyph pattern in a CGRAM slot
    ///
    /// Row bytes use their low five bits, top row first. Slots beyond
    /// the eighth are rejected before anything touches the bus.
    pub fn define_glyph(&mut self, slot: u8, pattern: &[u8; GLYPH_ROWS]) -> Result<(), BusError> {
        if slot >= GLYPH_SLOTS {
            self.last_result = Err(BusError::InvalidArgument);
            return self.last_result;
        }
        self.send(cmd::SET_CGRAM | (slot << 3), TransferMode::Command);
        for &row in pattern {
            self.send(row, TransferMode::DataWrite);
        }
        self.last_result
    }

    /// Latch the backlight on
    ///
    /// The new state rides out on a zero-payload command frame. That
    /// frame also clocks an empty instruction through the controller;
    /// no visible disturbance has ever come of it.
    pub fn backlight_on(&mut self) -> Result<(), BusError> {
        self.set_backlight(Backlight::On)
    }

    /// Latch the backlight off
    pub fn backlight_off(&mut self) -> Result<(), BusError> {
        self.set_backlight(Backlight::Off)
    }

    /// Switch the display pixels on
    ///
    /// The display-control calls each assert exactly one flag, so this
    /// also blanks the cursor and blink state until their own calls run.
    pub fn display_on(&mut self) -> Result<(), BusError> {
        self.send(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON, TransferMode::Command);
        self.last_result
    }

    /// Switch the display pixels off
    pub fn display_off(&mut self) -> Result<(), BusError> {
        self.send(cmd::DISPLAY_CONTROL, TransferMode::Command);
        self.last_result
    }

    /// Show the underline cursor, clearing the other control flags
    pub fn cursor_on(&mut self) -> Result<(), BusError> {
        self.send(cmd::DISPLAY_CONTROL | cmd::CURSOR_ON, TransferMode::Command);
        self.last_result
    }

    /// Hide the underline cursor, clearing the other control flags
    pub fn cursor_off(&mut self) -> Result<(), BusError> {
        self.send(cmd::DISPLAY_CONTROL, TransferMode::Command);
        self.last_result
    }

    /// Blink the current character cell, clearing the other control flags
    pub fn blink_on(&mut self) -> Result<(), BusError> {
        self.send(cmd::DISPLAY_CONTROL | cmd::BLINK_ON, TransferMode::Command);
        self.last_result
    }

    /// Stop blinking, clearing the other control flags
    pub fn blink_off(&mut self) -> Result<(), BusError> {
        self.send(cmd::DISPLAY_CONTROL, TransferMode::Command);
        self.last_result
    }

    /// Blank the display and home the address counter
    pub fn clear(&mut self) -> Result<(), BusError> {
        self.send(cmd::CLEAR_DISPLAY, TransferMode::Command);
        // Clear rewrites all of DDRAM and needs its longer execution time.
        self.delay.delay_ms(CLEAR_SETTLE_MS);
        self.last_result
    }

    /// Busy flag read-back
    ///
    /// Reading through the backpack needs the data lines floated high
    /// and a read-direction transfer, which this wiring does not do.
    /// No transaction runs, so the recorded result is untouched.
    pub fn read_busy_flag(&mut self) -> Result<bool, BusError> {
        Err(BusError::NotSupported)
    }

    /// Data read-back at the current address counter
    ///
    /// Unsupported for the same wiring reason as [`Self::read_busy_flag`].
    pub fn read_char(&mut self) -> Result<u8, BusError> {
        Err(BusError::NotSupported)
    }

    /// Hand back the bus manager and delay
    ///
    /// The bus keeps whatever state it had; call [`Self::deinit`] first
    /// to release the controller.
    pub fn release(self) -> (BusManager<P>, D) {
        (self.bus, self.delay)
    }

    /// One expander word onto the bus, recording the outcome
    ///
    /// With no resolved address there is nothing to write to; the miss
    /// is recorded as `InvalidState` and the wire stays quiet.
    fn write_word(&mut self, word: u8) {
        self.last_result = match self.address {
            Some(address) => self.bus.write_byte(address, word),
            None => Err(BusError::InvalidState),
        };
    }

    /// Pulse the enable line to latch `word` into the controller
    fn strobe(&mut self, word: u8) {
        self.write_word(word | framing::ENABLE);
        self.delay.delay_us(ENABLE_PULSE_US);
        self.write_word(word & !framing::ENABLE);
        self.delay.delay_us(COMMAND_SETTLE_US);
    }

    /// Send a bare nibble frame (cold-start primers)
    fn send_nibble(&mut self, nibble: u8) {
        let word = framing::frame_nibble(nibble, TransferMode::Command, self.backlight);
        self.write_word(word);
        self.strobe(word);
    }

    /// Send a byte payload as two framed nibbles, upper first
    fn send(&mut self, payload: u8, mode: TransferMode) {
        let [high, low] = framing::frame_words(payload, mode, self.backlight);
        self.write_word(high);
        self.strobe(high);
        self.write_word(low);
        self.strobe(low);
    }

    fn set_backlight(&mut self, backlight: Backlight) -> Result<(), BusError> {
        self.backlight = backlight;
        self.send(0x00, TransferMode::Command);
        self.last_result
    }
}
