//! Defines the observation record stored for the monitoring station and the
//! per-day completeness status attached to stored rows.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format used for the `Date` column and for parsing user input.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
/// Time format used for the `Time` column and the upstream documents.
pub(crate) const TIME_FORMAT: &str = "%H:%M:%S";

/// One timestamped reading from the monitoring station.
///
/// Observations are uniquely identified by `(date, time)` within the store.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use lpo_weather::Observation;
///
/// let obs = Observation {
///     date: NaiveDate::from_ymd_opt(2014, 3, 2).unwrap(),
///     time: NaiveTime::from_hms_opt(14, 5, 0).unwrap(),
///     air_temp: 3.4,
///     barometric_pressure: 30.12,
///     wind_speed: 6.1,
/// };
/// assert_eq!(obs.date.to_string(), "2014-03-02");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar day of the reading.
    pub date: NaiveDate,
    /// Time of day of the reading.
    pub time: NaiveTime,
    /// Air temperature.
    pub air_temp: f64,
    /// Barometric pressure.
    pub barometric_pressure: f64,
    /// Wind speed.
    pub wind_speed: f64,
}

/// Completeness marker for the stored rows of one calendar day.
///
/// A day without any stored rows is *missing*; that state is represented
/// by absence and has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayStatus {
    /// The day is over and its data will never change.
    Complete,
    /// The day is still accumulating data and must be re-fetched on every sync.
    Partial,
}

impl DayStatus {
    /// Status to tag rows of `date` with, given the current date.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use lpo_weather::DayStatus;
    ///
    /// let today = NaiveDate::from_ymd_opt(2015, 6, 1).unwrap();
    /// assert_eq!(DayStatus::for_day(today, today), DayStatus::Partial);
    /// assert_eq!(DayStatus::for_day(today.pred_opt().unwrap(), today), DayStatus::Complete);
    /// ```
    pub fn for_day(date: NaiveDate, today: NaiveDate) -> Self {
        if date == today {
            DayStatus::Partial
        } else {
            DayStatus::Complete
        }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Complete => "COMPLETE",
            DayStatus::Partial => "PARTIAL",
        }
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMPLETE" => Ok(DayStatus::Complete),
            "PARTIAL" => Ok(DayStatus::Partial),
            other => Err(other.to_string()),
        }
    }
}
