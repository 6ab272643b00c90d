//! Command bytes of the AQM0802A controller.
//!
//! Every function here is pure: it packs the given settings into the byte (or bytes) the
//! controller expects, following the bit layout from the datasheet. Sending them, and waiting the
//! right amount of time afterwards, is up to [crate::driver::AQM0802Driver].
//!
//! The controller has two instruction tables, selected by the `IS` bit of [function_set]. The
//! HD44780-compatible commands work with `IS = 0`, while [internal_osc_frequency],
//! [contrast_pair] and [follower_control] need `IS = 1`.

/// Clears the display and sets the cursor to the home position.
///
/// Command: `00000001`, IS: `?`.
pub const CLEAR_DISPLAY: u8 = 0b00000001;

/// Sets the cursor to the home position (0, 0) and undoes any display shift.
///
/// Command: `0000001?`, IS: `?`.
pub const RETURN_HOME: u8 = 0b00000010;

/// Sets the entry mode, which controls how the cursor moves after each character.
///
/// Command: `000001IS`, IS: `?`.
/// `I` is `1` to increment the address (cursor moves right), `0` to decrement it.
/// `S` is `1` to shift the whole display with each character.
pub fn entry_mode(increment: bool, shift: bool) -> u8 {
    let mut command = 0b00000100;
    if increment {
        command |= 0b00000010;
    }
    if shift {
        command |= 0b00000001;
    }
    command
}

/// Turns the display on or off, and controls the cursor and its blinking. All three bits live in
/// one register, so they're always sent together.
///
/// Command: `00001DCB`, IS: `?`.
pub fn display_control(display_on: bool, cursor_on: bool, blink_on: bool) -> u8 {
    let mut command = 0b00001000;
    if display_on {
        command |= 0b00000100;
    }
    if cursor_on {
        command |= 0b00000010;
    }
    if blink_on {
        command |= 0b00000001;
    }
    command
}

/// Shifts the cursor or the whole display by one position.
///
/// Command: `0001SR??`, IS: `0`.
/// `S` is `1` for display shift, `0` for cursor shift.
/// `R` is `1` for right shift, `0` for left shift.
pub fn cursor_shift(shift_screen: bool, shift_right: bool) -> u8 {
    let mut command = 0b00010000;
    if shift_screen {
        command |= 0b00001000;
    }
    if shift_right {
        command |= 0b00000100;
    }
    command
}

/// Function set, also used to switch between the instruction tables.
///
/// Command: `001BND0I`.
/// `B` is `1` for 8-bit data length (always the case over I²C).
/// `N` is `1` for two lines, `0` for one.
/// `D` is `1` for double height font, only honored in one-line mode.
/// `I` selects the instruction table: `1` for the extended one.
pub fn function_set(
    bus_8bit: bool,
    two_lines: bool,
    double_height: bool,
    extended_table: bool,
) -> u8 {
    let mut command = 0b00100000;
    if bus_8bit {
        command |= 0b00010000;
    }
    if two_lines {
        command |= 0b00001000;
    }
    if double_height {
        command |= 0b00000100;
    }
    if extended_table {
        command |= 0b00000001;
    }
    command
}

/// Sets the DDRAM address, i.e. the cursor position. The second line starts at `0x40`.
///
/// Command: `1AAAAAAA`, IS: `?`.
/// Only the lower 7 bits of `address` are used.
pub fn set_ddram_address(address: u8) -> u8 {
    0b10000000 | (address & 0b01111111)
}

/// Internal oscillator frequency with the bias bit set and no frequency adjustment.
///
/// Command: `0001BFFF`, IS: `1`.
pub fn internal_osc_frequency() -> u8 {
    const BIAS: u8 = 0b00000100;
    const ADJUSTMENT: u8 = 0b00000000;
    0b00010000 | BIAS | ADJUSTMENT
}

/// The two commands programming the 6-bit contrast value.
///
/// First: `0111CCCC` (contrast set) with the lower 4 bits.
/// Second: `0101IBCC` (power/icon/contrast) with the booster on, icon off and the upper 2 bits.
/// Both need IS: `1`. Bits above the sixth are ignored.
pub fn contrast_pair(contrast: u8) -> (u8, u8) {
    let low = 0b01110000 | (contrast & 0b00001111);
    let high = 0b01010100 | ((contrast >> 4) & 0b00000011);
    (low, high)
}

/// Follower control, enabling the internal voltage follower the panel's power circuit needs.
///
/// Command: `0110FRRR`, IS: `1`. Fixed at follower on, amplifier ratio `100`.
pub fn follower_control() -> u8 {
    0b01101100
}
