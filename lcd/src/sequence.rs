//! Timed command sequences.
//!
//! The controller has no busy flag we could poll over I²C, so each command is followed by a
//! fixed wait. Sequences are plain lists of [Step]s, built from the settings without touching
//! the bus, and replayed by [crate::driver::AQM0802Driver].
//!
//! Builders take the settings mutably and update them as they go, so once a sequence is built
//! the settings describe the controller state after it has been sent.

use crate::command;
use crate::settings::{ControllerSettings, DEFAULT_CONTRAST};
use std::time::Duration;

/// Execution time of most commands (26.3 µs at the 380 kHz oscillator).
pub const COMMAND_DELAY: Duration = Duration::from_nanos(26_300);
/// Execution time of [command::CLEAR_DISPLAY].
pub const CLEAR_DELAY: Duration = Duration::from_millis(108);
/// Time the voltage follower needs to stabilize after being turned on.
pub const POWER_STABILIZATION_DELAY: Duration = Duration::from_millis(200);

/// A single command byte and the time to wait after sending it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Step {
    pub command: u8,
    pub delay_after: Duration,
}

impl Step {
    /// A command followed by the usual [COMMAND_DELAY].
    pub const fn command(command: u8) -> Self {
        Step::new(command, COMMAND_DELAY)
    }

    pub const fn new(command: u8, delay_after: Duration) -> Self {
        Step {
            command,
            delay_after,
        }
    }
}

/// Selects the instruction table by re-sending the function set.
fn select_table(settings: &mut ControllerSettings, extended: bool) -> Step {
    settings.extended_table = extended;
    Step::command(settings.function_set())
}

fn contrast_steps(contrast: u8) -> [Step; 2] {
    let (low, high) = command::contrast_pair(contrast);
    [Step::command(low), Step::command(high)]
}

/// The power-on initialization sequence.
///
/// - normal table function set, then extended table function set,
/// - internal oscillator frequency,
/// - default contrast, in two commands,
/// - voltage follower on, then 200 ms for the power to stabilize,
/// - back to the normal table,
/// - display control, clear display (108 ms), default entry mode and return home.
///
/// The order and the waits come from the datasheet. Skipping or reordering anything leaves the
/// display blank or garbled, and there's no way to notice it from the driver side.
pub fn bring_up(settings: &mut ControllerSettings) -> Vec<Step> {
    let mut steps = Vec::with_capacity(11);
    steps.push(select_table(settings, false));
    steps.push(select_table(settings, true));
    steps.push(Step::command(command::internal_osc_frequency()));
    settings.contrast = DEFAULT_CONTRAST;
    steps.extend(contrast_steps(settings.contrast));
    steps.push(Step::new(
        command::follower_control(),
        POWER_STABILIZATION_DELAY,
    ));
    steps.push(select_table(settings, false));
    steps.push(Step::command(settings.display_control()));
    steps.push(Step::new(command::CLEAR_DISPLAY, CLEAR_DELAY));
    let defaults = ControllerSettings::default();
    settings.entry_increment = defaults.entry_increment;
    settings.entry_shift = defaults.entry_shift;
    steps.push(Step::command(settings.entry_mode()));
    steps.push(Step::command(command::RETURN_HOME));
    steps
}

/// Programs a new contrast value, which lives in the extended instruction table: switch to the
/// extended table, send both contrast commands, and switch back.
pub fn contrast_update(settings: &mut ControllerSettings, contrast: u8) -> Vec<Step> {
    let mut steps = Vec::with_capacity(4);
    steps.push(select_table(settings, true));
    settings.contrast = contrast;
    steps.extend(contrast_steps(contrast));
    steps.push(select_table(settings, false));
    steps
}
