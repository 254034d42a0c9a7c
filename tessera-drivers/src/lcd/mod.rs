//! Character display drivers

pub mod framing;
pub mod lcd1602;

pub use framing::{Backlight, TransferMode};
pub use lcd1602::{Lcd1602, LcdConfig};
