use crate::store::error::StoreError;
use crate::sync::error::SyncError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LpoError {
    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid date '{0}', expected a real calendar day as YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution,
}
