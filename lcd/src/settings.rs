use crate::command;

/// Number of character columns of the AQM0802A.
pub const COLUMNS: usize = 8;
/// Number of lines of the AQM0802A.
pub const ROWS: usize = 2;
/// DDRAM address of the first character of the second line.
pub const LINE_2_ADDRESS: u8 = 0x40;
/// Highest contrast value, the contrast being a 6-bit number.
pub const MAX_CONTRAST: u8 = 0b00111111;
/// Contrast programmed during initialization.
pub const DEFAULT_CONTRAST: u8 = 0x20;

/// Last applied value of every configurable bit of the controller.
///
/// The controller can't be read back, so this is the only record of its state. It's owned by
/// [crate::driver::AQM0802Driver] and only changed through its setters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ControllerSettings {
    /// Cursor moves right after each character if `true`, left otherwise.
    pub entry_increment: bool,
    /// Whole display shifts with each character.
    pub entry_shift: bool,
    pub display_on: bool,
    pub cursor_on: bool,
    pub blink_on: bool,
    /// Cursor/display shift moves the whole screen if `true`, the cursor only otherwise.
    pub shift_screen: bool,
    pub shift_right: bool,
    /// 8-bit data length. Always the case on the I²C interface.
    pub bus_8bit: bool,
    pub two_lines: bool,
    /// Double height font in one-line mode.
    ///
    /// The AQM0802A has its EXT pin tied high internally, so it never actually renders double
    /// height, whatever this bit says.
    pub double_height: bool,
    /// Whether the extended instruction table is selected. Only `true` for the duration of a
    /// contrast or oscillator sequence.
    pub extended_table: bool,
    pub contrast: u8,
    pub columns: usize,
    pub rows: usize,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        ControllerSettings {
            entry_increment: true,
            entry_shift: false,
            display_on: true,
            cursor_on: true,
            blink_on: true,
            shift_screen: false,
            shift_right: true,
            bus_8bit: true,
            two_lines: true,
            double_height: false,
            extended_table: false,
            contrast: DEFAULT_CONTRAST,
            columns: COLUMNS,
            rows: ROWS,
        }
    }
}

impl ControllerSettings {
    /// Clamps a contrast value to the 6-bit range.
    pub fn clamp_contrast(contrast: i32) -> u8 {
        contrast.clamp(0, MAX_CONTRAST as i32) as u8
    }

    /// Computes the DDRAM address of the given position, clamping both coordinates to the
    /// display geometry.
    pub fn ddram_address(&self, column: usize, line: usize) -> u8 {
        let column = column.min(self.columns - 1) as u8;
        let line = line.min(self.rows - 1) as u8;
        column + line * LINE_2_ADDRESS
    }

    pub fn function_set(&self) -> u8 {
        command::function_set(
            self.bus_8bit,
            self.two_lines,
            self.double_height,
            self.extended_table,
        )
    }

    pub fn entry_mode(&self) -> u8 {
        command::entry_mode(self.entry_increment, self.entry_shift)
    }

    pub fn display_control(&self) -> u8 {
        command::display_control(self.display_on, self.cursor_on, self.blink_on)
    }

    pub fn cursor_shift(&self) -> u8 {
        command::cursor_shift(self.shift_screen, self.shift_right)
    }
}
