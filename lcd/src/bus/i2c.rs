use crate::bus::{CONTROL_COMMAND, CONTROL_DATA, DEFAULT_ADDRESS, LcdBus};
use crate::{LcdError, LcdResult};
use embedded_hal::i2c::I2c;
use log::trace;
use std::fmt::{Debug, Formatter};

/// [LcdBus] implementation over any `embedded-hal` I²C bus.
///
/// Commands are sent as `[CONTROL_COMMAND, command]` and data as `[CONTROL_DATA, data...]`,
/// both addressed to the display's 7-bit address.
pub struct I2cLcdBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cLcdBus<I2C> {
    /// Creates a new bus using the display's [DEFAULT_ADDRESS].
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Creates a new bus talking to the display at the given 7-bit address.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        I2cLcdBus { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn i2c(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Gives back the underlying I²C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Debug for I2cLcdBus<I2C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "I2cLcdBus(0x{:02X})", self.address)
    }
}

impl<I2C: I2c> LcdBus for I2cLcdBus<I2C> {
    fn write_command(&mut self, command: u8) -> LcdResult<()> {
        trace!("Sending command: {:08b}", command);
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, command])
            .map_err(LcdError::from_i2c)
    }

    fn write_data(&mut self, data: &[u8]) -> LcdResult<()> {
        trace!("Sending data: {:02X?}", data);
        let mut frame = Vec::with_capacity(data.len() + 1);
        frame.push(CONTROL_DATA);
        frame.extend_from_slice(data);
        self.i2c
            .write(self.address, &frame)
            .map_err(LcdError::from_i2c)
    }
}
