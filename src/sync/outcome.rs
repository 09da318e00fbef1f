use crate::sync::plan::SyncUnit;
use crate::types::dates::DateSpan;
use crate::types::observation::Observation;
use crate::weather_data::error::FetchError;
use std::fmt;

/// A unit that could not be downloaded during a sync.
///
/// Failures are not fatal: the sync carries on with the remaining units and
/// the caller gets whatever the store holds for the range.
#[derive(Debug)]
pub struct FetchFailure {
    pub unit: SyncUnit,
    pub error: FetchError,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.unit, self.error)
    }
}

/// The requested range reached outside the station's operational window and
/// was shrunk to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeWarning {
    pub requested: DateSpan,
    /// `None` when nothing of the requested range was left.
    pub effective: Option<DateSpan>,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.effective {
            Some(effective) => write!(
                f,
                "Requested range {} was narrowed to {}",
                self.requested, effective
            ),
            None => write!(
                f,
                "Requested range {} has no available data",
                self.requested
            ),
        }
    }
}

/// Stored observations for a synced range, ordered by date and time.
///
/// Yields each observation once.
#[derive(Debug)]
pub struct Observations {
    rows: std::vec::IntoIter<Observation>,
}

impl Observations {
    pub(crate) fn new(rows: Vec<Observation>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }
}

impl Iterator for Observations {
    type Item = Observation;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Observations {}

/// Everything a sync produced: the rows plus the non-fatal problems met on the way.
#[derive(Debug)]
pub struct SyncOutcome {
    observations: Observations,
    failures: Vec<FetchFailure>,
    range_warning: Option<RangeWarning>,
}

impl SyncOutcome {
    pub(crate) fn new(
        rows: Vec<Observation>,
        failures: Vec<FetchFailure>,
        range_warning: Option<RangeWarning>,
    ) -> Self {
        Self {
            observations: Observations::new(rows),
            failures,
            range_warning,
        }
    }

    /// Units whose download failed.
    pub fn failures(&self) -> &[FetchFailure] {
        &self.failures
    }

    pub fn range_warning(&self) -> Option<&RangeWarning> {
        self.range_warning.as_ref()
    }

    /// Number of observations returned.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A single warning text listing every failed unit, or `None` if all downloads succeeded.
    ///
    /// ```text
    /// There were problems accessing data from the following dates:
    /// 2009-03-04
    /// 2005 (full year)
    /// ```
    pub fn failure_summary(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let mut message =
            String::from("There were problems accessing data from the following dates:");
        for failure in &self.failures {
            message.push('\n');
            message.push_str(&failure.unit.to_string());
        }
        Some(message)
    }

    pub fn into_observations(self) -> Observations {
        self.observations
    }

    pub fn into_parts(self) -> (Observations, Vec<FetchFailure>, Option<RangeWarning>) {
        (self.observations, self.failures, self.range_warning)
    }
}

impl IntoIterator for SyncOutcome {
    type Item = Observation;
    type IntoIter = Observations;

    fn into_iter(self) -> Self::IntoIter {
        self.observations
    }
}
