//! This module provides the main entry point of the crate: a client that keeps a
//! local SQLite copy of the Lake Pend Oreille station data and answers date
//! range requests from it, downloading whatever is missing first.

use crate::clock::{Clock, SystemClock};
use crate::config::{
    is_valid_table_name, RangePolicy, SyncSettings, YearMarker, DEFAULT_BASE_URL,
    DEFAULT_CUTOFF_YEAR, DEFAULT_TABLE,
};
use crate::error::LpoError;
use crate::store::observation_store::ObservationStore;
use crate::sync::outcome::SyncOutcome;
use crate::sync::synchronizer::Synchronizer;
use crate::types::dates::AnyDate;
use crate::utils::default_db_path;
use crate::weather_data::fetcher::{EraFetcher, Fetcher};
use bon::bon;
use chrono::NaiveDate;
use reqwest::blocking::Client;
use std::path::PathBuf;
use std::time::Duration;

/// The main client for station observations.
///
/// Holds the local store and the upstream fetcher. Create one with
/// [`LpoWeather::new()`] for the defaults or with [`LpoWeather::open()`] to
/// configure the database location, the upstream URL, the clock and so on.
///
/// All calls block the current thread until downloads and writes are done.
///
/// # Examples
///
/// ```no_run
/// # use lpo_weather::{LpoWeather, LpoError};
/// # fn run() -> Result<(), LpoError> {
/// let mut client = LpoWeather::new()?;
/// let outcome = client.sync_and_fetch("2014-01-01", "2014-01-31")?;
/// if let Some(warning) = outcome.failure_summary() {
///     eprintln!("{warning}");
/// }
/// let temps: Vec<f64> = outcome.into_iter().map(|obs| obs.air_temp).collect();
/// println!("{} air temperature readings", temps.len());
/// # Ok(())
/// # }
/// ```
pub struct LpoWeather {
    synchronizer: Synchronizer,
}

#[bon]
impl LpoWeather {
    /// Opens the store and wires up the upstream source.
    ///
    /// This method uses a builder pattern; every argument is optional.
    ///
    /// # Arguments
    ///
    /// * `.db_path(PathBuf)`: SQLite file to use. Defaults to `lpo.db` in the platform cache directory.
    /// * `.table(&str)`: Table to keep observations in. Defaults to `Weather`.
    /// * `.base_url(&str)`: Upstream directory. Defaults to [`DEFAULT_BASE_URL`].
    /// * `.cutoff_year(i32)`: First year served as daily files. Defaults to `2007`.
    /// * `.year_marker(YearMarker)`: Day standing for a loaded archive year. Defaults to January 12.
    /// * `.station_start(NaiveDate)`: First day of station data. Defaults to `2001-01-12`.
    /// * `.range_policy(RangePolicy)`: What to do with ranges outside the operational window. Defaults to [`RangePolicy::Clamp`].
    /// * `.timeout(Duration)`: Per-request HTTP timeout. Defaults to the HTTP client's own.
    /// * `.clock(Box<dyn Clock>)`: Source of "today". Defaults to [`SystemClock`].
    /// * `.fetcher(Box<dyn Fetcher>)`: Replaces the HTTP fetcher entirely (`base_url` and `timeout` are then unused).
    ///
    /// # Errors
    ///
    /// * [`LpoError::InvalidConfig`] for a table name that isn't a plain identifier
    ///   or a cutoff year outside the supported calendar.
    /// * [`LpoError::CacheDirResolution`] if no `db_path` is given and the cache directory is unknown.
    /// * [`LpoError::Store`] if the database can't be opened or created.
    /// * [`LpoError::HttpClient`] if the HTTP client can't be built.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use lpo_weather::{LpoWeather, LpoError, RangePolicy};
    /// # use std::time::Duration;
    /// # fn run() -> Result<(), LpoError> {
    /// let client = LpoWeather::open()
    ///     .db_path("/tmp/lpo.db".into())
    ///     .table("Weather")
    ///     .range_policy(RangePolicy::Reject)
    ///     .timeout(Duration::from_secs(20))
    ///     .call()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn open(
        db_path: Option<PathBuf>,
        #[builder(into)] table: Option<String>,
        #[builder(into)] base_url: Option<String>,
        cutoff_year: Option<i32>,
        year_marker: Option<YearMarker>,
        station_start: Option<NaiveDate>,
        range_policy: Option<RangePolicy>,
        timeout: Option<Duration>,
        clock: Option<Box<dyn Clock>>,
        fetcher: Option<Box<dyn Fetcher>>,
    ) -> Result<Self, LpoError> {
        let table = table.unwrap_or_else(|| DEFAULT_TABLE.to_string());
        if !is_valid_table_name(&table) {
            return Err(LpoError::InvalidConfig(format!(
                "table name '{table}' must be a plain identifier"
            )));
        }

        let defaults = SyncSettings::default();
        let settings = SyncSettings {
            cutoff_year: cutoff_year.unwrap_or(DEFAULT_CUTOFF_YEAR),
            year_marker: year_marker.unwrap_or(defaults.year_marker),
            station_start: station_start.unwrap_or(defaults.station_start),
            range_policy: range_policy.unwrap_or(defaults.range_policy),
        };
        if settings.cutoff_date().is_none() {
            return Err(LpoError::InvalidConfig(format!(
                "cutoff year {} is out of range",
                settings.cutoff_year
            )));
        }

        let fetcher = match fetcher {
            Some(fetcher) => fetcher,
            None => {
                let mut client = Client::builder();
                if let Some(timeout) = timeout {
                    client = client.timeout(timeout);
                }
                let client = client.build().map_err(LpoError::HttpClient)?;
                let base_url = base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
                Box::new(EraFetcher::http(client, base_url, settings.cutoff_year))
            }
        };

        let db_path = match db_path {
            Some(path) => path,
            None => default_db_path()?,
        };
        let store = ObservationStore::open(&db_path, &table)?;

        Ok(Self {
            synchronizer: Synchronizer::new(
                store,
                fetcher,
                clock.unwrap_or_else(|| Box::new(SystemClock)),
                settings,
            ),
        })
    }

    /// Creates a client with every setting at its default.
    ///
    /// # Errors
    ///
    /// See [`LpoWeather::open()`].
    pub fn new() -> Result<Self, LpoError> {
        Self::open().call()
    }

    /// Brings the store up to date for `[start, end]` and returns the stored
    /// observations for that range.
    ///
    /// Days already complete in the store are not downloaded again; days that
    /// are missing or still partial (today) are. Pre-2007 data is downloaded a
    /// whole year at a time.
    ///
    /// # Arguments
    ///
    /// * `start`, `end` - Anything implementing [`AnyDate`]: a `NaiveDate`, a
    ///   `"YYYY-MM-DD"` string or a `(year, month, day)` tuple. Both ends are inclusive.
    ///
    /// # Returns
    ///
    /// A [`SyncOutcome`] holding the observations (ordered by date and time)
    /// together with any per-day download failures and range warnings. Failed
    /// downloads don't fail the call; the outcome simply holds what the store has.
    ///
    /// # Errors
    ///
    /// * [`LpoError::InvalidDate`] if either date does not exist. Nothing is touched.
    /// * [`LpoError::Sync`] with [`crate::SyncError::InvalidRange`] if `start` is
    ///   after `end` (or, under [`RangePolicy::Reject`], outside the operational window).
    /// * [`LpoError::Sync`] with [`crate::SyncError::Store`] if the store fails mid-sync.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use lpo_weather::{LpoWeather, LpoError};
    /// # use chrono::NaiveDate;
    /// # fn run() -> Result<(), LpoError> {
    /// let mut client = LpoWeather::new()?;
    ///
    /// // Form input as (year, month, day); April 31st is rejected.
    /// assert!(matches!(
    ///     client.sync_and_fetch((2014, 4, 31), (2014, 5, 2)),
    ///     Err(LpoError::InvalidDate(_))
    /// ));
    ///
    /// let start = NaiveDate::from_ymd_opt(2006, 12, 30).unwrap();
    /// let outcome = client.sync_and_fetch(start, "2007-01-02")?;
    /// for failure in outcome.failures() {
    ///     eprintln!("{failure}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn sync_and_fetch<S: AnyDate, E: AnyDate>(
        &mut self,
        start: S,
        end: E,
    ) -> Result<SyncOutcome, LpoError> {
        let start = start.to_date()?;
        let end = end.to_date()?;
        Ok(self.synchronizer.sync_and_fetch(start, end)?)
    }

    /// Deletes every stored observation.
    pub fn clear(&mut self) -> Result<(), LpoError> {
        Ok(self.synchronizer.store_mut().clear()?)
    }

    pub fn store(&self) -> &ObservationStore {
        self.synchronizer.store()
    }

    pub fn settings(&self) -> &SyncSettings {
        self.synchronizer.settings()
    }
}
