use crate::config::is_valid_table_name;
use crate::store::error::StoreError;
use crate::store::schema;
use crate::types::observation::{DayStatus, Observation, DATE_FORMAT, TIME_FORMAT};
use chrono::{NaiveDate, NaiveTime};
use log::{debug, info};
use rusqlite::{params, Connection, Transaction};
use std::path::Path;

/// SQLite-backed table of observations, one row per `(date, time)`.
///
/// Every mutating call commits before it returns. The store assumes a single
/// writer; nothing coordinates two stores opened on the same file.
pub struct ObservationStore {
    conn: Connection,
    table: String,
}

impl ObservationStore {
    /// Open or create a database file and make sure `table` exists.
    pub fn open<P: AsRef<Path>>(path: P, table: &str) -> Result<Self, StoreError> {
        let path = path.as_ref();
        check_table_name(table)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening observation store at {}", path.display());
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = FULL;",
        )?;
        schema::initialize(&conn, table)?;

        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    /// Open a throwaway in-memory database.
    pub fn open_in_memory(table: &str) -> Result<Self, StoreError> {
        check_table_name(table)?;
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn, table)?;
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Distinct `(date, status)` pairs stored for days in `[start, end]`, ordered by date.
    pub fn statuses_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(NaiveDate, DayStatus)>, StoreError> {
        let sql = format!(
            "SELECT DISTINCT Date, Status FROM {} WHERE Date BETWEEN ?1 AND ?2 ORDER BY Date",
            self.table
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let raw = stmt
            .query_map(params![format_date(start), format_date(end)], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(date, status)| Ok((parse_date(&date)?, parse_status(&status)?)))
            .collect()
    }

    /// All observations for days in `[start, end]`, ordered by date then time.
    pub fn rows_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Observation>, StoreError> {
        let sql = format!(
            "SELECT Date, Time, Air_Temp, Barometric_Press, Wind_Speed FROM {}
             WHERE Date BETWEEN ?1 AND ?2 ORDER BY Date, Time",
            self.table
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let raw = stmt
            .query_map(params![format_date(start), format_date(end)], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(date, time, air_temp, barometric_pressure, wind_speed)| {
                Ok(Observation {
                    date: parse_date(&date)?,
                    time: parse_time(&time)?,
                    air_temp,
                    barometric_pressure,
                    wind_speed,
                })
            })
            .collect()
    }

    /// Remove every row of `date`. Returns how many rows went away.
    pub fn delete_day(&mut self, date: NaiveDate) -> Result<usize, StoreError> {
        let deleted = delete_day_in(&self.conn, &self.table, date)?;
        debug!("Deleted {} rows for {}", deleted, date);
        Ok(deleted)
    }

    /// Store a single observation. An existing row with the same date and time is replaced.
    pub fn insert(&mut self, observation: &Observation, status: DayStatus) -> Result<(), StoreError> {
        insert_in(&self.conn, &self.table, observation, status)
    }

    /// Store a batch in one transaction, tagging each row with `status_of(row)`.
    ///
    /// Either the whole batch is committed or none of it is.
    pub fn insert_all<F>(&mut self, rows: &[Observation], status_of: F) -> Result<usize, StoreError>
    where
        F: Fn(&Observation) -> DayStatus,
    {
        let tx = self.conn.transaction()?;
        insert_rows(&tx, &self.table, rows, status_of)?;
        tx.commit()?;
        debug!("Inserted {} rows into {}", rows.len(), self.table);
        Ok(rows.len())
    }

    /// Swap the stored rows of `date` for `rows` in one transaction.
    pub fn replace_day(
        &mut self,
        date: NaiveDate,
        rows: &[Observation],
        status: DayStatus,
    ) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let deleted = delete_day_in(&tx, &self.table, date)?;
        insert_rows(&tx, &self.table, rows, |_| status)?;
        tx.commit()?;
        debug!(
            "Replaced {} rows for {} with {} {} rows",
            deleted,
            date,
            rows.len(),
            status
        );
        Ok(rows.len())
    }

    /// Drop every stored observation.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        info!("Clearing table {}", self.table);
        schema::drop_table(&self.conn, &self.table)?;
        schema::initialize(&self.conn, &self.table)
    }
}

fn check_table_name(table: &str) -> Result<(), StoreError> {
    if is_valid_table_name(table) {
        Ok(())
    } else {
        Err(StoreError::InvalidTableName(table.to_string()))
    }
}

fn delete_day_in(conn: &Connection, table: &str, date: NaiveDate) -> Result<usize, StoreError> {
    let sql = format!("DELETE FROM {table} WHERE Date = ?1");
    Ok(conn.execute(&sql, params![format_date(date)])?)
}

fn insert_in(
    conn: &Connection,
    table: &str,
    observation: &Observation,
    status: DayStatus,
) -> Result<(), StoreError> {
    let sql = format!(
        "INSERT OR REPLACE INTO {table} (Date, Time, Status, Air_Temp, Barometric_Press, Wind_Speed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
    );
    conn.execute(
        &sql,
        params![
            format_date(observation.date),
            format_time(observation.time),
            status.as_str(),
            observation.air_temp,
            observation.barometric_pressure,
            observation.wind_speed,
        ],
    )?;
    Ok(())
}

fn insert_rows<F>(
    tx: &Transaction<'_>,
    table: &str,
    rows: &[Observation],
    status_of: F,
) -> Result<(), StoreError>
where
    F: Fn(&Observation) -> DayStatus,
{
    for row in rows {
        insert_in(tx, table, row, status_of(row))?;
    }
    Ok(())
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn parse_date(value: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| StoreError::CorruptRow {
        column: "Date",
        value: value.to_string(),
    })
}

fn parse_time(value: &str) -> Result<NaiveTime, StoreError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| StoreError::CorruptRow {
        column: "Time",
        value: value.to_string(),
    })
}

fn parse_status(value: &str) -> Result<DayStatus, StoreError> {
    value.parse().map_err(|value| StoreError::CorruptRow {
        column: "Status",
        value,
    })
}
