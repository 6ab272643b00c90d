//! Bus transport for the AQM0802A.
//!
//! See [LcdBus] for the interface the driver talks to, and [I2cLcdBus] for the implementation
//! on top of an `embedded-hal` I²C bus.

mod i2c;

pub use i2c::*;

use crate::LcdResult;
use std::fmt::Debug;

/// 7-bit I²C address of the AQM0802A.
pub const DEFAULT_ADDRESS: u8 = 0x3E;

/// Control byte preceding a command byte (`Co = 0`, `RS = 0`).
pub const CONTROL_COMMAND: u8 = 0b00000000;

/// Control byte preceding data bytes (`Co = 0`, `RS = 1`).
pub const CONTROL_DATA: u8 = 0b01000000;

/// Low-level, write-only transport to the controller.
///
/// Every call is one complete bus transaction. Calls are expected to reach the controller in the
/// order they're made.
pub trait LcdBus: Debug {
    /// Sends a single command byte, prefixed with [CONTROL_COMMAND].
    fn write_command(&mut self, command: u8) -> LcdResult<()>;

    /// Sends one or more data bytes (characters to be written to DDRAM), prefixed with
    /// [CONTROL_DATA].
    fn write_data(&mut self, data: &[u8]) -> LcdResult<()>;
}
