//! The "what day is it" capability the synchronizer depends on.
//!
//! Whether a day's rows are final depends on the wall clock, so the current
//! date is injected rather than read ad hoc.

use chrono::{Local, NaiveDate};

pub trait Clock {
    /// The current calendar date at the monitoring station.
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

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDate,
{
    fn today(&self) -> NaiveDate {
        self()
    }
}
