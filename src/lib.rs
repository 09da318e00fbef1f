mod clock;
mod config;
mod error;
mod lpo_weather;
mod store;
mod sync;
mod types;
mod utils;
mod weather_data;

pub use error::LpoError;
pub use lpo_weather::*;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    RangePolicy, SyncSettings, YearMarker, DEFAULT_BASE_URL, DEFAULT_CUTOFF_YEAR, DEFAULT_TABLE,
};
pub use utils::default_db_path;

pub use types::dates::{AnyDate, DateSpan, Year};
pub use types::observation::{DayStatus, Observation};

pub use store::error::StoreError;
pub use store::observation_store::ObservationStore;

pub use sync::error::{RangeViolation, SyncError};
pub use sync::outcome::{FetchFailure, Observations, RangeWarning, SyncOutcome};
pub use sync::plan::{SyncTask, SyncUnit};
pub use sync::synchronizer::Synchronizer;

pub use weather_data::daily_metrics::{DailyMetrics, Metric};
pub use weather_data::error::{FetchError, LineError};
pub use weather_data::fetcher::{Era, EraFetcher, Fetcher};
pub use weather_data::http::RemoteText;
pub use weather_data::yearly_archive::YearlyArchive;
