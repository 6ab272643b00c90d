//! Driver for the AQM0802A 8x2 character LCD module.
//!
//! The module is built around an ST7032-style controller, which speaks the HD44780 command set
//! plus a second, "extended" instruction table used for contrast and power configuration. The
//! controller is driven write-only over I²C: there's no busy flag read-back, so every command is
//! followed by a fixed delay taken from the datasheet.
//!
//! See [driver::AQM0802Driver] for the high-level interface, [command] for the raw command bytes
//! and [sequence] for the timed command sequences.

pub mod bus;
pub mod command;
pub mod driver;
pub mod sequence;
pub mod settings;

#[cfg(test)]
mod testing;

use embedded_hal::i2c;
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum LcdError {
    #[error("I2C bus error: {0:?}")]
    Bus(i2c::ErrorKind),
    #[error("error: {0}")]
    Other(String),
}

impl LcdError {
    /// Wraps any `embedded-hal` I²C error, keeping only its kind.
    pub fn from_i2c<E: i2c::Error>(err: E) -> Self {
        LcdError::Bus(err.kind())
    }
}

pub type LcdResult<T> = Result<T, LcdError>;
