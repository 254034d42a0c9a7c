//! Expander word framing for the 4-bit interface
//!
//! A PCF8574-style backpack maps its eight port lines onto the display
//! controller: bits 0-1 drive register select and read/write, bit 2 the
//! enable line, bit 3 the backlight transistor, and bits 4-7 the data
//! lines D4-D7. A byte-wide payload therefore crosses the bus as two
//! framed words, upper nibble first, both carrying the same mode and
//! backlight bits.

/// Register-select and read/write line states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TransferMode {
    /// Instruction register write
    Command = 0x00,
    /// Data register write
    DataWrite = 0x01,
    /// Busy flag and address counter read
    BusyRead = 0x02,
    /// Data register read
    DataRead = 0x03,
}

/// Backlight latch bit
///
/// The backpack has no memory of its own, so the chosen state has to
/// ride along on every framed word to stay lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Backlight {
    Off = 0x00,
    On = 0x08,
}

/// Enable line bit, pulsed to latch each nibble into the controller
pub const ENABLE: u8 = 0x04;

/// Display controller instruction set (HD44780U datasheet, table 6)
pub mod cmd {
    /// Blank the display and home the address counter
    pub const CLEAR_DISPLAY: u8 = 0x01;
    /// Home the address counter and undo display shifts
    pub const RETURN_HOME: u8 = 0x02;

    /// Entry mode set base instruction
    pub const ENTRY_MODE: u8 = 0x04;
    /// Entry mode: step the address counter rightward after each access
    pub const MOVE_RIGHT: u8 = 0x02;
    /// Entry mode: shift the display window instead of the cursor
    pub const SHIFT_DISPLAY: u8 = 0x01;

    /// Display control base instruction
    pub const DISPLAY_CONTROL: u8 = 0x08;
    /// Display control: pixels on
    pub const DISPLAY_ON: u8 = 0x04;
    /// Display control: underline cursor
    pub const CURSOR_ON: u8 = 0x02;
    /// Display control: blinking character cell
    pub const BLINK_ON: u8 = 0x01;

    /// Function set base instruction
    pub const FUNCTION_SET: u8 = 0x20;
    /// Function set: two display lines
    pub const TWO_LINES: u8 = 0x08;

    /// Address the character generator RAM
    pub const SET_CGRAM: u8 = 0x40;
    /// Address the display data RAM
    pub const SET_DDRAM: u8 = 0x80;
}

/// Frame one bare nibble into an expander word
///
/// The nibble value lands on the data lines with the mode and backlight
/// bits alongside. The cold-start primers use this directly: the
/// controller consumes them as half instructions while still in 8-bit
/// mode.
pub fn frame_nibble(nibble: u8, mode: TransferMode, backlight: Backlight) -> u8 {
    ((nibble << 4) & 0xF0) | mode as u8 | backlight as u8
}

/// Frame a byte payload into its two expander words, upper nibble first
pub fn frame_words(payload: u8, mode: TransferMode, backlight: Backlight) -> [u8; 2] {
    [
        frame_nibble(payload >> 4, mode, backlight),
        frame_nibble(payload & 0x0F, mode, backlight),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MODES: [TransferMode; 4] = [
        TransferMode::Command,
        TransferMode::DataWrite,
        TransferMode::BusyRead,
        TransferMode::DataRead,
    ];

    #[test]
    fn test_mode_bits_match_the_port_lines() {
        assert_eq!(TransferMode::Command as u8, 0x00);
        assert_eq!(TransferMode::DataWrite as u8, 0x01);
        assert_eq!(TransferMode::BusyRead as u8, 0x02);
        assert_eq!(TransferMode::DataRead as u8, 0x03);
        assert_eq!(Backlight::Off as u8, 0x00);
        assert_eq!(Backlight::On as u8, 0x08);
    }

    #[test]
    fn test_frame_words_layout() {
        // 'H' as a data write with the backlight lit
        let words = frame_words(0x48, TransferMode::DataWrite, Backlight::On);
        assert_eq!(words, [0x49, 0x89]);

        // DDRAM address command, backlight dark
        let words = frame_words(0x85, TransferMode::Command, Backlight::Off);
        assert_eq!(words, [0x80, 0x50]);
    }

    #[test]
    fn test_primer_nibble_carries_mode_and_backlight() {
        assert_eq!(
            frame_nibble(0x03, TransferMode::Command, Backlight::On),
            0x38
        );
        assert_eq!(
            frame_nibble(0x03, TransferMode::Command, Backlight::Off),
            0x30
        );
        assert_eq!(
            frame_nibble(0x02, TransferMode::Command, Backlight::On),
            0x28
        );
    }

    #[test]
    fn test_every_payload_splits_cleanly() {
        for payload in 0..=0xFFu8 {
            for mode in MODES {
                let [high, low] = frame_words(payload, mode, Backlight::On);
                assert_eq!(high & 0xF0, payload & 0xF0);
                assert_eq!(low & 0xF0, (payload << 4) & 0xF0);
                // Identical control bits on both words, enable line low.
                assert_eq!(high & 0x0F, low & 0x0F);
                assert_eq!(high & 0x03, mode as u8);
                assert_eq!(high & ENABLE, 0);
                assert_eq!(high & 0x08, 0x08);
            }
        }
    }

    proptest! {
        #[test]
        fn payload_is_recoverable_from_the_word_pair(payload: u8) {
            for mode in MODES {
                let [high, low] = frame_words(payload, mode, Backlight::Off);
                prop_assert_eq!((high & 0xF0) | (low >> 4), payload);
            }
        }
    }
}
