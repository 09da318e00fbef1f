//! Defaults and tunables for the monitoring station and its upstream source.

use chrono::NaiveDate;

/// Upstream directory holding both the yearly archives and the daily metric files.
pub const DEFAULT_BASE_URL: &str = "http://lpo.dt.navy.mil/data/DM";

/// Table the observations are stored in.
pub const DEFAULT_TABLE: &str = "Weather";

/// First year published as per-day, per-metric files instead of a yearly archive.
pub const DEFAULT_CUTOFF_YEAR: i32 = 2007;

/// How [`crate::Synchronizer::sync_and_fetch`] treats a range reaching outside
/// the window between the station's first day and today.
///
/// A range whose start lies after its end is rejected regardless of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePolicy {
    /// Shrink the range to the operational window, warn and carry on.
    #[default]
    Clamp,
    /// Fail with [`crate::SyncError::InvalidRange`] before doing any I/O.
    Reject,
}

/// The calendar day whose presence in the store stands for a whole
/// pre-cutoff year having been loaded.
///
/// Yearly archives are written in a single transaction, so either every row
/// of the year is stored or none is. Checking one fixed day per year is then
/// enough to tell whether the year still has to be downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMarker {
    month: u32,
    day: u32,
}

impl YearMarker {
    /// Returns `None` unless the month/day exists in every year.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        // 2001 is not a leap year, so Feb 29 is rejected here.
        NaiveDate::from_ymd_opt(2001, month, day).map(|_| Self { month, day })
    }

    /// The marker day inside `year`.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl Default for YearMarker {
    fn default() -> Self {
        Self { month: 1, day: 12 }
    }
}

/// Parameters steering how a date range is synchronized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub cutoff_year: i32,
    pub year_marker: YearMarker,
    /// First day the station recorded data.
    pub station_start: NaiveDate,
    pub range_policy: RangePolicy,
}

impl SyncSettings {
    /// First day published in the per-day format.
    pub fn cutoff_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.cutoff_year, 1, 1)
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            cutoff_year: DEFAULT_CUTOFF_YEAR,
            year_marker: YearMarker::default(),
            station_start: default_station_start(),
            range_policy: RangePolicy::default(),
        }
    }
}

pub(crate) fn default_station_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2001, 1, 12).unwrap_or(NaiveDate::MIN)
}

/// Table names are spliced into SQL, so only plain identifiers are accepted.
pub(crate) fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_marker_rejects_leap_day() {
        assert!(YearMarker::new(2, 29).is_none());
        assert!(YearMarker::new(13, 1).is_none());
        let marker = YearMarker::new(6, 30).unwrap();
        assert_eq!(marker.in_year(2004), NaiveDate::from_ymd_opt(2004, 6, 30));
    }

    #[test]
    fn test_default_marker_is_january_twelfth() {
        let marker = YearMarker::default();
        assert_eq!(marker.in_year(2003), NaiveDate::from_ymd_opt(2003, 1, 12));
    }

    #[test]
    fn test_default_settings() {
        let settings = SyncSettings::default();
        assert_eq!(settings.station_start, NaiveDate::from_ymd_opt(2001, 1, 12).unwrap());
        assert_eq!(settings.cutoff_date(), NaiveDate::from_ymd_opt(2007, 1, 1));
        assert_eq!(settings.range_policy, RangePolicy::Clamp);
    }

    #[test]
    fn test_table_name_validation() {
        assert!(is_valid_table_name("Weather"));
        assert!(is_valid_table_name("_station_2"));
        assert!(!is_valid_table_name("2weather"));
        assert!(!is_valid_table_name("Weather; DROP TABLE x"));
        assert!(!is_valid_table_name(""));
    }
}
