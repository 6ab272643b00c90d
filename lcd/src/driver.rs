//! High-level AQM0802A driver.

use crate::bus::LcdBus;
use crate::command;
use crate::sequence::{self, CLEAR_DELAY, Step};
use crate::settings::ControllerSettings;
use crate::LcdResult;
use embedded_hal::delay::DelayNs;
use log::{debug, warn};
use std::fmt::{Debug, Formatter};

/// Stateful driver for the AQM0802A 8x2 character display.
///
/// The controller is write-only over I²C, so the driver keeps the last applied value of every
/// setting in [ControllerSettings] and re-sends whole registers from it when one bit changes.
/// Each command is followed by the wait the datasheet asks for, using the given delay.
///
/// # Errors
///
/// Bus errors are returned as they are. Nothing is retried: a failed multi-command operation
/// (like [Self::init] or [Self::set_contrast]) leaves the controller in an unknown state, and
/// the safest way out is to run [Self::init] again.
///
/// Out of range arguments are never an error; they're clamped to the nearest valid value.
pub struct AQM0802Driver<B, D> {
    bus: B,
    delay: D,
    settings: ControllerSettings,
}

impl<B: LcdBus, D: DelayNs> AQM0802Driver<B, D> {
    /// Creates a new driver with the power-on default settings. Nothing is sent until
    /// [Self::init] is called.
    pub fn new(bus: B, delay: D) -> Self {
        AQM0802Driver {
            bus,
            delay,
            settings: ControllerSettings::default(),
        }
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn contrast(&self) -> u8 {
        self.settings.contrast
    }

    pub fn bus(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Gives back the bus and the delay.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    fn run(&mut self, steps: &[Step]) -> LcdResult<()> {
        for step in steps {
            self.bus.write_command(step.command)?;
            if !step.delay_after.is_zero() {
                let ns = u32::try_from(step.delay_after.as_nanos()).unwrap_or(u32::MAX);
                self.delay.delay_ns(ns);
            }
        }
        Ok(())
    }

    fn send(&mut self, command: u8) -> LcdResult<()> {
        self.run(&[Step::command(command)])
    }

    /// Runs the power-on initialization sequence, see [sequence::bring_up]. Takes a bit over
    /// 300 ms, most of it waiting for the voltage follower and the clear command.
    ///
    /// The contrast goes back to its default value.
    pub fn init(&mut self) -> LcdResult<()> {
        debug!("Initializing display...");
        let steps = sequence::bring_up(&mut self.settings);
        self.run(&steps)?;
        debug!("Display initialized.");
        Ok(())
    }

    /// Initializes the display, then turns the display, cursor and blinking back on one at a
    /// time and returns home.
    ///
    /// Line count and font height are kept as they are.
    pub fn restore_defaults(&mut self) -> LcdResult<()> {
        let defaults = ControllerSettings::default();
        self.init()?;
        self.set_entry_mode(defaults.entry_increment, defaults.entry_shift)?;
        self.set_display_on(defaults.display_on)?;
        self.set_cursor_on(defaults.cursor_on)?;
        self.set_blink_on(defaults.blink_on)?;
        self.return_home()
    }

    /// Clears the display and moves the cursor home. Waits for the 108 ms it takes.
    pub fn clear_display(&mut self) -> LcdResult<()> {
        debug!("Clearing display");
        self.run(&[Step::new(command::CLEAR_DISPLAY, CLEAR_DELAY)])
    }

    /// Moves the cursor home and undoes any display shift.
    pub fn return_home(&mut self) -> LcdResult<()> {
        debug!("Returning home");
        self.send(command::RETURN_HOME)
    }

    /// Writes text at the cursor position.
    ///
    /// Anything past the display width is silently dropped. Non-ASCII characters are written
    /// as `?`.
    pub fn write_text(&mut self, text: &str) -> LcdResult<()> {
        debug!("Writing {:?}", text);
        for c in text.chars().take(self.settings.columns) {
            let byte = if c.is_ascii() {
                c as u8
            } else {
                warn!("Non-ASCII character: {}", c);
                b'?'
            };
            self.bus.write_data(&[byte])?;
        }
        Ok(())
    }

    /// Moves the cursor to the given column and line, both counted from zero. Positions outside
    /// the display are clamped to the last column or line.
    pub fn move_cursor(&mut self, column: usize, line: usize) -> LcdResult<()> {
        let address = self.settings.ddram_address(column, line);
        debug!("Moving cursor to {}, {} (0x{:02X})", column, line, address);
        self.send(command::set_ddram_address(address))
    }

    /// Sets the cursor direction after each character and whether the display shifts with it.
    pub fn set_entry_mode(&mut self, increment: bool, shift: bool) -> LcdResult<()> {
        self.settings.entry_increment = increment;
        self.settings.entry_shift = shift;
        self.send(self.settings.entry_mode())
    }

    pub fn set_display_on(&mut self, on: bool) -> LcdResult<()> {
        self.settings.display_on = on;
        self.send(self.settings.display_control())
    }

    pub fn set_cursor_on(&mut self, on: bool) -> LcdResult<()> {
        self.settings.cursor_on = on;
        self.send(self.settings.display_control())
    }

    pub fn set_blink_on(&mut self, on: bool) -> LcdResult<()> {
        self.settings.blink_on = on;
        self.send(self.settings.display_control())
    }

    /// Shifts the cursor (or the whole screen if `shift_screen`) one position to the right or left.
    pub fn set_cursor_shift(&mut self, shift_screen: bool, shift_right: bool) -> LcdResult<()> {
        self.settings.shift_screen = shift_screen;
        self.settings.shift_right = shift_right;
        self.send(self.settings.cursor_shift())
    }

    /// Switches between two-line and one-line mode.
    pub fn set_two_lines(&mut self, two_lines: bool) -> LcdResult<()> {
        self.settings.two_lines = two_lines;
        self.send(self.settings.function_set())
    }

    /// Sets the double height font bit. It only works in one-line mode and is ignored by the
    /// AQM0802A hardware anyway.
    pub fn set_double_height(&mut self, double_height: bool) -> LcdResult<()> {
        self.settings.double_height = double_height;
        self.send(self.settings.function_set())
    }

    /// Sets the contrast, clamped to `0..=63`.
    pub fn set_contrast(&mut self, contrast: i32) -> LcdResult<()> {
        let contrast = ControllerSettings::clamp_contrast(contrast);
        debug!("Setting contrast to 0x{:02X}", contrast);
        let steps = sequence::contrast_update(&mut self.settings, contrast);
        self.run(&steps)
    }

    /// Changes the contrast relative to its current value. Returns the new, clamped contrast.
    pub fn adjust_contrast(&mut self, delta: i32) -> LcdResult<u8> {
        self.set_contrast(self.settings.contrast as i32 + delta)?;
        Ok(self.settings.contrast)
    }
}

impl<B: Debug, D> Debug for AQM0802Driver<B, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "AQM0802Driver({:?})", self.bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::I2cLcdBus;
    use crate::sequence::{COMMAND_DELAY, POWER_STABILIZATION_DELAY};
    use crate::testing::{BusWrite, RecordingBus, RecordingDelay};
    use crate::LcdError;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use std::time::Duration;

    const BRING_UP: [u8; 11] = [
        0x38, 0x39, 0x14, 0x70, 0x56, 0x6C, 0x38, 0x0F, 0x01, 0x06, 0x02,
    ];

    fn driver() -> AQM0802Driver<RecordingBus, RecordingDelay> {
        AQM0802Driver::new(RecordingBus::default(), RecordingDelay::default())
    }

    #[test]
    fn init_then_write() {
        let mut lcd = driver();
        lcd.init().unwrap();
        lcd.write_text("HI").unwrap();

        let (bus, _) = lcd.release();
        let mut expected: Vec<BusWrite> = BRING_UP.into_iter().map(BusWrite::Command).collect();
        expected.push(BusWrite::Data(vec![b'H']));
        expected.push(BusWrite::Data(vec![b'I']));
        assert_eq!(bus.log, expected);
    }

    #[test]
    fn init_waits() {
        let mut lcd = driver();
        lcd.init().unwrap();

        let (_, delay) = lcd.release();
        assert_eq!(delay.waits.len(), 11);
        assert_eq!(delay.waits[5], POWER_STABILIZATION_DELAY);
        assert_eq!(delay.waits[8], CLEAR_DELAY);
        assert_eq!(delay.waits[0], COMMAND_DELAY);
        assert_eq!(
            delay.total(),
            Duration::from_millis(308) + COMMAND_DELAY * 9
        );
    }

    #[test]
    fn init_over_i2c() {
        let expectations: Vec<I2cTransaction> = BRING_UP
            .into_iter()
            .map(|command| I2cTransaction::write(0x3E, vec![0x00, command]))
            .collect();
        let bus = I2cLcdBus::new(I2cMock::new(&expectations));
        let mut lcd = AQM0802Driver::new(bus, NoopDelay::new());

        lcd.init().unwrap();

        let (bus, _) = lcd.release();
        bus.release().done();
    }

    #[test]
    fn write_text_truncates() {
        let mut lcd = driver();
        lcd.write_text("0123456789").unwrap();

        let expected: Vec<Vec<u8>> = b"01234567".iter().map(|&b| vec![b]).collect();
        assert_eq!(lcd.bus().data(), expected);
        assert!(lcd.bus().commands().is_empty());
    }

    #[test]
    fn write_text_replaces_non_ascii() {
        let mut lcd = driver();
        lcd.write_text("a€b").unwrap();

        assert_eq!(lcd.bus().data(), [vec![b'a'], vec![b'?'], vec![b'b']]);
    }

    #[test]
    fn move_cursor_clamps() {
        let mut lcd = driver();
        lcd.move_cursor(99, 0).unwrap();
        lcd.move_cursor(0, 99).unwrap();
        lcd.move_cursor(5, 1).unwrap();

        assert_eq!(lcd.bus().commands(), [0x87, 0xC0, 0xC5]);
    }

    #[test]
    fn contrast_is_clamped_and_toggles_table() {
        let mut lcd = driver();
        lcd.set_contrast(-5).unwrap();
        assert_eq!(lcd.contrast(), 0);
        lcd.set_contrast(200).unwrap();
        assert_eq!(lcd.contrast(), 63);

        assert_eq!(
            lcd.bus().commands(),
            [0x39, 0x70, 0x54, 0x38, 0x39, 0x7F, 0x57, 0x38]
        );
        assert!(!lcd.settings().extended_table);
    }

    #[test]
    fn adjust_contrast() {
        let mut lcd = driver();
        assert_eq!(lcd.adjust_contrast(1).unwrap(), 0x21);
        assert_eq!(lcd.adjust_contrast(-2).unwrap(), 0x1F);
        assert_eq!(lcd.adjust_contrast(100).unwrap(), 63);
    }

    #[test]
    fn display_control_setters_send_all_bits() {
        let mut lcd = driver();
        lcd.set_blink_on(false).unwrap();
        lcd.set_cursor_on(false).unwrap();
        lcd.set_display_on(false).unwrap();
        lcd.set_blink_on(true).unwrap();

        assert_eq!(lcd.bus().commands(), [0x0E, 0x0C, 0x08, 0x09]);
    }

    #[test]
    fn other_setters() {
        let mut lcd = driver();
        lcd.set_entry_mode(true, true).unwrap();
        lcd.set_cursor_shift(true, false).unwrap();
        lcd.set_two_lines(false).unwrap();
        lcd.set_double_height(true).unwrap();
        lcd.clear_display().unwrap();
        lcd.return_home().unwrap();

        assert_eq!(lcd.bus().commands(), [0x07, 0x18, 0x30, 0x34, 0x01, 0x02]);
    }

    #[test]
    fn init_resets_entry_mode() {
        let mut lcd = driver();
        lcd.set_entry_mode(false, true).unwrap();
        lcd.bus().log.clear();

        lcd.init().unwrap();

        assert_eq!(lcd.bus().commands(), BRING_UP);
        assert_eq!(lcd.settings().entry_mode(), 0x06);
    }

    #[test]
    fn restore_defaults_keeps_line_settings() {
        let mut lcd = driver();
        lcd.set_two_lines(false).unwrap();
        lcd.set_cursor_on(false).unwrap();
        lcd.set_contrast(3).unwrap();
        lcd.bus().log.clear();

        lcd.restore_defaults().unwrap();

        assert_eq!(
            lcd.bus().commands(),
            [
                0x30, 0x31, 0x14, 0x70, 0x56, 0x6C, 0x30, 0x0D, 0x01, 0x06, 0x02, // init
                0x06, 0x0D, 0x0F, 0x0F, 0x02,
            ]
        );
        assert_eq!(
            lcd.settings(),
            &ControllerSettings {
                two_lines: false,
                ..Default::default()
            }
        );
    }

    #[test]
    fn clear_display_waits_for_execution() {
        let mut lcd = driver();
        lcd.clear_display().unwrap();

        let (_, delay) = lcd.release();
        assert_eq!(delay.waits, [CLEAR_DELAY]);
    }

    #[test]
    fn set_contrast_waits_between_commands() {
        let mut lcd = driver();
        lcd.set_contrast(0x10).unwrap();

        let (_, delay) = lcd.release();
        assert_eq!(delay.waits, [COMMAND_DELAY; 4]);
    }

    #[test]
    fn setters_wait_after_each_command() {
        let mut lcd = driver();
        lcd.set_entry_mode(true, true).unwrap();
        lcd.set_blink_on(false).unwrap();
        lcd.move_cursor(1, 1).unwrap();
        lcd.return_home().unwrap();

        let (_, delay) = lcd.release();
        assert_eq!(delay.waits, [COMMAND_DELAY; 4]);
    }

    #[test]
    fn bus_errors_abort_the_sequence() {
        let mut lcd =
            AQM0802Driver::new(RecordingBus::failing_after(3), RecordingDelay::default());

        let result = lcd.init();

        assert_eq!(result, Err(LcdError::Other("bus unavailable".to_string())));
        let (bus, delay) = lcd.release();
        assert_eq!(bus.commands(), [0x38, 0x39, 0x14]);
        assert_eq!(delay.waits.len(), 3);
    }
}
