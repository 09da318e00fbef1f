use chrono::NaiveDate;
use thiserror::Error;

/// Why downloading the observations for one date (or one archive year) failed.
///
/// Every variant carries the date that was requested, see [`FetchError::date`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request for {date} failed: {url}")]
    NetworkRequest {
        date: NaiveDate,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request for {date} failed for {url} with status {status}")]
    HttpStatus {
        date: NaiveDate,
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed line {line_no} in {url} (requested for {date})")]
    MalformedLine {
        date: NaiveDate,
        url: String,
        line_no: usize,
        #[source]
        source: LineError,
    },

    // The three metric files of a day must line up one-to-one.
    #[error("Metric files for {date} differ in length (air temp {air_temp}, pressure {barometric_pressure}, wind speed {wind_speed})")]
    LengthMismatch {
        date: NaiveDate,
        air_temp: usize,
        barometric_pressure: usize,
        wind_speed: usize,
    },

    #[error("Metric files for {date} disagree on the timestamp of line {line_no}")]
    TimestampMismatch { date: NaiveDate, line_no: usize },
}

impl FetchError {
    /// The date whose fetch failed.
    pub fn date(&self) -> NaiveDate {
        match self {
            FetchError::NetworkRequest { date, .. }
            | FetchError::HttpStatus { date, .. }
            | FetchError::MalformedLine { date, .. }
            | FetchError::LengthMismatch { date, .. }
            | FetchError::TimestampMismatch { date, .. } => *date,
        }
    }
}

/// What is wrong with a single line of an upstream document.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LineError {
    #[error("expected at least {expected} columns, found {found}")]
    MissingColumns { expected: usize, found: usize },

    #[error("unreadable date '{0}'")]
    Date(String),

    #[error("unreadable time '{0}'")]
    Time(String),

    #[error("unreadable {field} value '{raw}'")]
    Value { field: &'static str, raw: String },
}
