//! Binary counter and dual 7-segment display driven through two 74HC595
//! shift registers.
//!
//! The counter value goes to the binary LED strip as-is and to the segment
//! register one digit at a time, multiplexed across the ones and tens
//! anodes. A push button lengthens how long each value stays up.
//!
//! Everything here is generic over `embedded-hal` output pins and delays;
//! the RP2040 wiring lives in the firmware binary.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod counter;
pub mod display;
pub mod segment;
pub mod shift_register;
pub mod status;

#[cfg(test)]
mod mock;

pub use counter::{Counter, CounterPanel, DwellDuration};
pub use display::Multiplexer;
pub use segment::{Digit, SegmentEncoder};
pub use shift_register::{RegisterBank, RegisterId, ShiftRegister};
pub use status::StatusSink;
