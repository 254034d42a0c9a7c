//! Character display driver implementations
//!
//! This crate drives HD44780-family character modules through the
//! tessera bus stack:
//!
//! - Expander word framing for the 4-bit interface (`lcd::framing`)
//! - 16x2 panel driver behind a PCF8574-style backpack (`lcd::lcd1602`)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod lcd;
