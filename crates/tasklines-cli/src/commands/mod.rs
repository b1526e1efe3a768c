pub mod completions;
pub mod config;
pub mod list;
pub mod postpone;
pub mod status;

use chrono::NaiveDate;
use tasklines_core::error::Result;
use tasklines_core::{Clock, Config, CoreError, FixedClock, StatusRegistry, SystemClock};

/// State shared by the task commands.
pub struct Context {
    pub config: Config,
    pub registry: StatusRegistry,
    clock: Box<dyn Clock>,
}

impl Context {
    pub fn new(config: Config, today: Option<NaiveDate>) -> Self {
        let clock: Box<dyn Clock> = match today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        };
        Self {
            registry: config.status_registry(),
            config,
            clock,
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

/// Convert a 1-based line argument to a line index.
pub fn line_index(line: usize) -> Result<usize> {
    line.checked_sub(1)
        .ok_or_else(|| CoreError::Custom("line numbers start at 1".to_string()))
}
