//! Tessera Hardware Abstraction Layer
//!
//! This crate defines the bus peripheral trait that the transaction layer
//! drives, together with the configuration and error types shared by every
//! layer of the stack. Chip-specific HALs implement the peripheral trait
//! for their I2C controllers; the [`ehal`] module adapts any `embedded-hal`
//! bus for hardware whose HAL already exposes the standard trait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Display drivers (tessera-drivers)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Bus manager (tessera-bus)              │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tessera-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip-native  │       │ ehal adapter  │
//! │  peripheral   │       │ (any `I2c`)   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cPeripheral`] - I2C controller lifecycle and byte transfers

#![no_std]
#![deny(unsafe_code)]

pub mod ehal;
pub mod i2c;

// Re-export key types at crate root for convenience
pub use ehal::EhalI2c;
pub use i2c::{BusError, I2cConfig, I2cPeripheral};
