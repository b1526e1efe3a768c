//! Source of the current calendar day.
//!
//! The engines take a [`Clock`] instead of reading the system time so a
//! whole transition is stamped with a single day, and tests can pin it.

use chrono::{Local, NaiveDate};

pub trait Clock {
    /// Current local calendar day.
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
