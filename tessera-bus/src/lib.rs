//! I2C bus transaction layer
//!
//! Owns the controller peripheral and provides the small transaction
//! vocabulary the display drivers are written against: addressed
//! single-byte writes and reads, plus presence discovery across the full
//! 7-bit address range.
//!
//! The manager talks to hardware exclusively through
//! [`tessera_hal::I2cPeripheral`], so the same code drives a chip-native
//! controller on target and a scripted double under test.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod address;
pub mod manager;

pub use address::DeviceAddress;
pub use manager::{BusManager, TRANSFER_TIMEOUT_MS};
pub use tessera_hal::BusError;
