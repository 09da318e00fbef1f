use crate::clock::Clock;
use crate::config::{RangePolicy, SyncSettings};
use crate::store::error::StoreError;
use crate::store::observation_store::ObservationStore;
use crate::sync::error::{RangeViolation, SyncError};
use crate::sync::outcome::{FetchFailure, RangeWarning, SyncOutcome};
use crate::sync::plan::{plan, SyncTask, SyncUnit};
use crate::types::dates::DateSpan;
use crate::types::observation::{DayStatus, Observation};
use crate::weather_data::fetcher::Fetcher;
use chrono::{Datelike, NaiveDate};
use log::{info, warn};

/// Keeps the local store in step with the upstream source for requested date ranges.
///
/// Days stored as [`DayStatus::Complete`] are trusted forever. Days stored as
/// [`DayStatus::Partial`] and days without rows are downloaded again on every
/// sync that covers them. Pre-cutoff data is handled per year.
///
/// Everything runs on the calling thread, one download after another.
pub struct Synchronizer {
    store: ObservationStore,
    fetcher: Box<dyn Fetcher>,
    clock: Box<dyn Clock>,
    settings: SyncSettings,
}

impl Synchronizer {
    pub fn new(
        store: ObservationStore,
        fetcher: Box<dyn Fetcher>,
        clock: Box<dyn Clock>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            store,
            fetcher,
            clock,
            settings,
        }
    }

    pub fn store(&self) -> &ObservationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ObservationStore {
        &mut self.store
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Bring `[start, end]` up to date and return the stored rows for it.
    ///
    /// A failed download only affects its own unit and is reported through
    /// [`SyncOutcome::failures`]. Store errors abort the call.
    ///
    /// # Errors
    ///
    /// * [`SyncError::InvalidRange`] if `start > end`, or if the range leaves the
    ///   operational window under [`RangePolicy::Reject`]. Nothing is fetched in that case.
    /// * [`SyncError::Store`] if reading or writing the store fails.
    pub fn sync_and_fetch(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SyncOutcome, SyncError> {
        let today = self.clock.today();
        let (span, range_warning) = self.check_range(start, end, today)?;

        let Some(span) = span else {
            return Ok(SyncOutcome::new(Vec::new(), Vec::new(), range_warning));
        };

        let mut failures = Vec::new();
        for task in plan(&self.store, &self.settings, span)? {
            if let Some(failure) = self.apply(task, today)? {
                failures.push(failure);
            }
        }

        if !failures.is_empty() {
            let units: Vec<String> = failures.iter().map(|f| f.unit.to_string()).collect();
            warn!(
                "There were problems accessing data for {} units: {}",
                failures.len(),
                units.join(", ")
            );
        }

        let rows = self.store.rows_in_range(span.start, span.end)?;
        info!("Returning {} observations for {}", rows.len(), span);
        Ok(SyncOutcome::new(rows, failures, range_warning))
    }

    /// Rejects reversed ranges and fits the rest into `[station_start, today]`.
    fn check_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> Result<(Option<DateSpan>, Option<RangeWarning>), SyncError> {
        let invalid = |reason| SyncError::InvalidRange { start, end, reason };

        if start > end {
            return Err(invalid(RangeViolation::Reversed));
        }

        let first_day = self.settings.station_start;
        let violation = if start < first_day {
            Some(RangeViolation::BeforeStationStart(first_day))
        } else if end > today {
            Some(RangeViolation::AfterToday(today))
        } else {
            None
        };

        let requested = DateSpan::new(start, end);
        let Some(violation) = violation else {
            return Ok((Some(requested), None));
        };

        match self.settings.range_policy {
            RangePolicy::Reject => Err(invalid(violation)),
            RangePolicy::Clamp => {
                let clamped = DateSpan::new(start.max(first_day), end.min(today));
                let effective = (!clamped.is_empty()).then_some(clamped);
                let warning = RangeWarning {
                    requested,
                    effective,
                };
                warn!("{} ({})", warning, violation);
                Ok((effective, Some(warning)))
            }
        }
    }

    /// Downloads and stores one unit. A download failure is returned, not raised.
    fn apply(&mut self, task: SyncTask, today: NaiveDate) -> Result<Option<FetchFailure>, StoreError> {
        let rows = match self.fetcher.fetch(task.target) {
            Ok(rows) => rows,
            Err(error) => {
                warn!("Fetching {} failed: {}", task.unit, error);
                return Ok(Some(FetchFailure {
                    unit: task.unit,
                    error,
                }));
            }
        };

        match task.unit {
            SyncUnit::Year(year) => {
                let (rows, stray): (Vec<Observation>, Vec<Observation>) =
                    rows.into_iter().partition(|obs| obs.date.year() == year.get());
                if !stray.is_empty() {
                    warn!("Dropping {} observations outside {}", stray.len(), year);
                }

                let stored = self
                    .store
                    .insert_all(&rows, |obs| DayStatus::for_day(obs.date, today))?;
                info!("Stored {} observations for {}", stored, year);
            }
            SyncUnit::Day(day) => {
                let (rows, stray): (Vec<Observation>, Vec<Observation>) =
                    rows.into_iter().partition(|obs| obs.date == day);
                if !stray.is_empty() {
                    warn!("Dropping {} observations not dated {}", stray.len(), day);
                }

                let status = DayStatus::for_day(day, today);
                if task.refresh {
                    info!("Replacing partial data for {}", day);
                    self.store.replace_day(day, &rows, status)?;
                } else {
                    self.store.insert_all(&rows, |_| status)?;
                }
            }
        }
        Ok(None)
    }
}
