use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to create database directory '{path}'")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' is not a valid table name")]
    InvalidTableName(String),

    // A stored Date, Time or Status cell that can't be read back.
    #[error("Unreadable value '{value}' in column {column}")]
    CorruptRow { column: &'static str, value: String },
}
