//! Text menu mapping console input to display operations.

use aqm0802_lcd::LcdResult;
use aqm0802_lcd::bus::LcdBus;
use aqm0802_lcd::driver::AQM0802Driver;
use embedded_hal::delay::DelayNs;

/// One line of console input, either a `@` token or text to display.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MenuCommand {
    Clear,
    Home,
    InitDisplay,
    /// Entry mode: `(increment, shift)`.
    EntryMode(bool, bool),
    Display(bool),
    Cursor(bool),
    Blink(bool),
    /// Cursor or display shift: `(shift_screen, shift_right)`.
    Shift(bool, bool),
    TwoLines(bool),
    /// Cursor to the start of the given line.
    Line(usize),
    AdjustContrast(i32),
    Text(String),
}

impl MenuCommand {
    pub fn parse(line: &str) -> MenuCommand {
        match line {
            "@cls" => MenuCommand::Clear,
            "@home" => MenuCommand::Home,
            "@init display" => MenuCommand::InitDisplay,
            "@display to left" => MenuCommand::EntryMode(true, true),
            "@display to right" => MenuCommand::EntryMode(true, false),
            "@display on" => MenuCommand::Display(true),
            "@display off" => MenuCommand::Display(false),
            "@cursor on" => MenuCommand::Cursor(true),
            "@cursor off" => MenuCommand::Cursor(false),
            "@blink on" => MenuCommand::Blink(true),
            "@blink off" => MenuCommand::Blink(false),
            "@cursor to the left" => MenuCommand::Shift(false, false),
            "@cursor to the right" => MenuCommand::Shift(false, true),
            "@display to the left" => MenuCommand::Shift(true, false),
            "@display to the right" => MenuCommand::Shift(true, true),
            "@2lines" => MenuCommand::TwoLines(true),
            "@1lines" => MenuCommand::TwoLines(false),
            "@upper" => MenuCommand::Line(0),
            "@lower" => MenuCommand::Line(1),
            "@make lighter" => MenuCommand::AdjustContrast(-1),
            "@make richer" => MenuCommand::AdjustContrast(1),
            text => MenuCommand::Text(text.to_string()),
        }
    }

    /// Runs the command on the display.
    ///
    /// Returns the new contrast if the command changed it.
    pub fn apply<B: LcdBus, D: DelayNs>(
        &self,
        lcd: &mut AQM0802Driver<B, D>,
    ) -> LcdResult<Option<u8>> {
        match self {
            MenuCommand::Clear => lcd.clear_display()?,
            MenuCommand::Home => lcd.return_home()?,
            MenuCommand::InitDisplay => lcd.restore_defaults()?,
            MenuCommand::EntryMode(increment, shift) => lcd.set_entry_mode(*increment, *shift)?,
            MenuCommand::Display(on) => lcd.set_display_on(*on)?,
            MenuCommand::Cursor(on) => lcd.set_cursor_on(*on)?,
            MenuCommand::Blink(on) => lcd.set_blink_on(*on)?,
            MenuCommand::Shift(screen, right) => lcd.set_cursor_shift(*screen, *right)?,
            MenuCommand::TwoLines(two_lines) => lcd.set_two_lines(*two_lines)?,
            MenuCommand::Line(line) => lcd.move_cursor(0, *line)?,
            MenuCommand::AdjustContrast(delta) => return lcd.adjust_contrast(*delta).map(Some),
            MenuCommand::Text(text) => lcd.write_text(text)?,
        }
        Ok(None)
    }
}
