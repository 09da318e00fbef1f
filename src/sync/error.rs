use crate::store::error::StoreError;
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Invalid date range {start} to {end}: {reason}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
        reason: RangeViolation,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What is wrong with a requested date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeViolation {
    /// The start date lies after the end date.
    Reversed,
    /// The range starts before the station recorded anything.
    BeforeStationStart(NaiveDate),
    /// The range ends after today.
    AfterToday(NaiveDate),
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeViolation::Reversed => write!(f, "start is after end"),
            RangeViolation::BeforeStationStart(first) => {
                write!(f, "station data starts on {first}")
            }
            RangeViolation::AfterToday(today) => write!(f, "no data exists after {today}"),
        }
    }
}
