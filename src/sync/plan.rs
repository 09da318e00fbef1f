//! Works out which parts of a date range have to be downloaded.

use crate::config::SyncSettings;
use crate::store::error::StoreError;
use crate::store::observation_store::ObservationStore;
use crate::types::dates::{DateSpan, Year};
use crate::types::observation::DayStatus;
use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;

/// A unit of download work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncUnit {
    /// A whole pre-cutoff year, loaded from its archive in one go.
    Year(Year),
    /// A single post-cutoff day.
    Day(NaiveDate),
}

impl fmt::Display for SyncUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncUnit::Year(year) => write!(f, "{year} (full year)"),
            SyncUnit::Day(date) => write!(f, "{date}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTask {
    pub unit: SyncUnit,
    /// The date handed to the fetcher: the marker day for a year, the day itself otherwise.
    pub target: NaiveDate,
    /// Rows for this unit exist but are partial and must be replaced.
    pub refresh: bool,
}

/// Every unit in `span` that is missing from the store or only partially stored.
///
/// Pre-cutoff years are checked through their marker day only; the marker day
/// need not lie inside `span`. Post-cutoff days are checked one by one.
pub(crate) fn plan(
    store: &ObservationStore,
    settings: &SyncSettings,
    span: DateSpan,
) -> Result<Vec<SyncTask>, StoreError> {
    let mut tasks = Vec::new();
    if span.is_empty() {
        return Ok(tasks);
    }

    let last_archive_year = span.end.year().min(settings.cutoff_year - 1);
    for year in span.start.year()..=last_archive_year {
        let Some(marker) = settings.year_marker.in_year(year) else {
            warn!("No marker day in {}, skipping its archive", year);
            continue;
        };
        if store.statuses_in_range(marker, marker)?.is_empty() {
            tasks.push(SyncTask {
                unit: SyncUnit::Year(Year(year)),
                target: marker,
                refresh: false,
            });
        }
    }

    let daily_start = match settings.cutoff_date() {
        Some(cutoff) => span.start.max(cutoff),
        None => span.start,
    };
    let daily = DateSpan::new(daily_start, span.end);
    if !daily.is_empty() {
        let mut stored: HashMap<NaiveDate, DayStatus> = HashMap::new();
        for (date, status) in store.statuses_in_range(daily.start, daily.end)? {
            // Mixed statuses on one day should not happen; treat them as partial.
            stored
                .entry(date)
                .and_modify(|s| {
                    if status == DayStatus::Partial {
                        *s = DayStatus::Partial
                    }
                })
                .or_insert(status);
        }

        for day in daily.days() {
            match stored.get(&day) {
                Some(DayStatus::Complete) => {}
                Some(DayStatus::Partial) => tasks.push(SyncTask {
                    unit: SyncUnit::Day(day),
                    target: day,
                    refresh: true,
                }),
                None => tasks.push(SyncTask {
                    unit: SyncUnit::Day(day),
                    target: day,
                    refresh: false,
                }),
            }
        }
    }

    debug!("Planned {} units for {}", tasks.len(), span);
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::observation::Observation;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_day(store: &mut ObservationStore, day: NaiveDate, status: DayStatus) {
        let obs = Observation {
            date: day,
            time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            air_temp: 0.0,
            barometric_pressure: 0.0,
            wind_speed: 0.0,
        };
        store.insert(&obs, status).unwrap();
    }

    fn units(tasks: &[SyncTask]) -> Vec<SyncUnit> {
        tasks.iter().map(|t| t.unit).collect()
    }

    #[test]
    fn test_range_spanning_cutoff_on_empty_store() {
        let store = ObservationStore::open_in_memory("Weather").unwrap();
        let span = DateSpan::new(date(2005, 6, 1), date(2007, 1, 3));
        let tasks = plan(&store, &SyncSettings::default(), span).unwrap();
        assert_eq!(
            units(&tasks),
            [
                SyncUnit::Year(Year(2005)),
                SyncUnit::Year(Year(2006)),
                SyncUnit::Day(date(2007, 1, 1)),
                SyncUnit::Day(date(2007, 1, 2)),
                SyncUnit::Day(date(2007, 1, 3)),
            ]
        );
        assert!(tasks.iter().all(|t| !t.refresh));
        assert_eq!(tasks[0].target, date(2005, 1, 12));
        assert_eq!(tasks[1].target, date(2006, 1, 12));
    }

    #[test]
    fn test_archive_years_stop_at_range_end() {
        let store = ObservationStore::open_in_memory("Weather").unwrap();
        let span = DateSpan::new(date(2002, 3, 1), date(2003, 2, 1));
        let tasks = plan(&store, &SyncSettings::default(), span).unwrap();
        assert_eq!(
            units(&tasks),
            [SyncUnit::Year(Year(2002)), SyncUnit::Year(Year(2003))]
        );
    }

    #[test]
    fn test_marker_day_outside_range_still_decides() {
        let mut store = ObservationStore::open_in_memory("Weather").unwrap();
        store_day(&mut store, date(2004, 1, 12), DayStatus::Complete);
        let span = DateSpan::new(date(2004, 8, 1), date(2004, 8, 2));
        assert!(plan(&store, &SyncSettings::default(), span).unwrap().is_empty());
    }

    #[test]
    fn test_complete_skipped_partial_refreshed_missing_fetched() {
        let mut store = ObservationStore::open_in_memory("Weather").unwrap();
        store_day(&mut store, date(2010, 5, 1), DayStatus::Complete);
        store_day(&mut store, date(2010, 5, 2), DayStatus::Partial);
        let span = DateSpan::new(date(2010, 5, 1), date(2010, 5, 3));

        let tasks = plan(&store, &SyncSettings::default(), span).unwrap();
        assert_eq!(
            tasks,
            [
                SyncTask {
                    unit: SyncUnit::Day(date(2010, 5, 2)),
                    target: date(2010, 5, 2),
                    refresh: true
                },
                SyncTask {
                    unit: SyncUnit::Day(date(2010, 5, 3)),
                    target: date(2010, 5, 3),
                    refresh: false
                },
            ]
        );
    }

    #[test]
    fn test_mixed_statuses_count_as_partial() {
        let mut store = ObservationStore::open_in_memory("Weather").unwrap();
        let day = date(2011, 2, 2);
        store_day(&mut store, day, DayStatus::Complete);
        let other = Observation {
            date: day,
            time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            air_temp: 0.0,
            barometric_pressure: 0.0,
            wind_speed: 0.0,
        };
        store.insert(&other, DayStatus::Partial).unwrap();

        let tasks = plan(&store, &SyncSettings::default(), DateSpan::new(day, day)).unwrap();
        assert_eq!(
            tasks,
            [SyncTask {
                unit: SyncUnit::Day(day),
                target: day,
                refresh: true
            }]
        );
    }

    #[test]
    fn test_empty_span_plans_nothing() {
        let store = ObservationStore::open_in_memory("Weather").unwrap();
        let span = DateSpan::new(date(2010, 5, 2), date(2010, 5, 1));
        assert!(plan(&store, &SyncSettings::default(), span).unwrap().is_empty());
    }

    #[test]
    fn test_unit_display() {
        assert_eq!(SyncUnit::Year(Year(2005)).to_string(), "2005 (full year)");
        assert_eq!(SyncUnit::Day(date(2007, 1, 2)).to_string(), "2007-01-02");
    }
}
