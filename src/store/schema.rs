//! Table layout for stored observations.

use crate::store::error::StoreError;
use rusqlite::Connection;

/// Create the observation table and its date index if they don't exist yet.
///
/// Column names follow the layout the station data has always been kept in:
/// `Date`, `Time`, `Status`, `Air_Temp`, `Barometric_Press`, `Wind_Speed`.
pub(crate) fn initialize(conn: &Connection, table: &str) -> Result<(), StoreError> {
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            Date TEXT NOT NULL,
            Time TEXT NOT NULL,
            Status TEXT NOT NULL,
            Air_Temp REAL,
            Barometric_Press REAL,
            Wind_Speed REAL,
            UNIQUE(Date, Time)
        );
        CREATE INDEX IF NOT EXISTS idx_{table}_date ON {table}(Date);
        "#
    ))?;
    Ok(())
}

pub(crate) fn drop_table(conn: &Connection, table: &str) -> Result<(), StoreError> {
    conn.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
    Ok(())
}
