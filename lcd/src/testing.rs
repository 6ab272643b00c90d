//! Recording doubles for the bus and the delay, used by the driver tests.

use crate::bus::LcdBus;
use crate::{LcdError, LcdResult};
use embedded_hal::delay::DelayNs;
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BusWrite {
    Command(u8),
    Data(Vec<u8>),
}

/// Bus logging every write, optionally failing after a number of successful writes.
#[derive(Debug, Default)]
pub struct RecordingBus {
    pub log: Vec<BusWrite>,
    pub fail_after: Option<usize>,
}

impl RecordingBus {
    pub fn failing_after(writes: usize) -> Self {
        RecordingBus {
            log: Vec::new(),
            fail_after: Some(writes),
        }
    }

    pub fn commands(&self) -> Vec<u8> {
        self.log
            .iter()
            .filter_map(|write| match write {
                BusWrite::Command(command) => Some(*command),
                BusWrite::Data(_) => None,
            })
            .collect()
    }

    pub fn data(&self) -> Vec<Vec<u8>> {
        self.log
            .iter()
            .filter_map(|write| match write {
                BusWrite::Data(data) => Some(data.clone()),
                BusWrite::Command(_) => None,
            })
            .collect()
    }

    fn record(&mut self, write: BusWrite) -> LcdResult<()> {
        if self.fail_after.is_some_and(|limit| self.log.len() >= limit) {
            return Err(LcdError::Other("bus unavailable".to_string()));
        }
        self.log.push(write);
        Ok(())
    }
}

impl LcdBus for RecordingBus {
    fn write_command(&mut self, command: u8) -> LcdResult<()> {
        self.record(BusWrite::Command(command))
    }

    fn write_data(&mut self, data: &[u8]) -> LcdResult<()> {
        self.record(BusWrite::Data(data.to_vec()))
    }
}

/// Delay recording the requested waits instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub waits: Vec<Duration>,
}

impl RecordingDelay {
    pub fn total(&self) -> Duration {
        self.waits.iter().sum()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits.push(Duration::from_nanos(ns as u64));
    }
}
