//! Line parsers for the two upstream document shapes.
//!
//! Both formats are whitespace separated and start each line with the date
//! (`YYYY_MM_DD`, occasionally `YYYY-MM-DD`) followed by the time (`HH:MM:SS`).

use crate::types::observation::{Observation, TIME_FORMAT};
use crate::weather_data::error::LineError;
use chrono::{NaiveDate, NaiveTime};

// Column positions in the yearly archive.
const ARCHIVE_WIND_SPEED: usize = 2;
const ARCHIVE_AIR_TEMP: usize = 5;
const ARCHIVE_BAROMETRIC_PRESS: usize = 7;

/// One line of a per-metric daily file: `date time value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MetricSample {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub value: f64,
}

/// Parse one data line of a yearly archive.
pub(crate) fn parse_archive_line(line: &str) -> Result<Observation, LineError> {
    let columns: Vec<&str> = line.split_whitespace().collect();
    require_columns(&columns, ARCHIVE_BAROMETRIC_PRESS + 1)?;

    Ok(Observation {
        date: parse_date(columns[0])?,
        time: parse_time(columns[1])?,
        air_temp: parse_value(columns[ARCHIVE_AIR_TEMP], "air temperature")?,
        barometric_pressure: parse_value(
            columns[ARCHIVE_BAROMETRIC_PRESS],
            "barometric pressure",
        )?,
        wind_speed: parse_value(columns[ARCHIVE_WIND_SPEED], "wind speed")?,
    })
}

/// Parse one line of a per-metric daily file. `field` names the metric in errors.
pub(crate) fn parse_metric_line(line: &str, field: &'static str) -> Result<MetricSample, LineError> {
    let columns: Vec<&str> = line.split_whitespace().collect();
    require_columns(&columns, 3)?;

    Ok(MetricSample {
        date: parse_date(columns[0])?,
        time: parse_time(columns[1])?,
        value: parse_value(columns[2], field)?,
    })
}

/// Non-blank lines, numbered from 1 as they appear in the document.
pub(crate) fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn require_columns(columns: &[&str], expected: usize) -> Result<(), LineError> {
    if columns.len() < expected {
        return Err(LineError::MissingColumns {
            expected,
            found: columns.len(),
        });
    }
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, LineError> {
    let normalized = raw.replace('_', "-");
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").map_err(|_| LineError::Date(raw.to_string()))
}

fn parse_time(raw: &str) -> Result<NaiveTime, LineError> {
    NaiveTime::parse_from_str(raw, TIME_FORMAT).map_err(|_| LineError::Time(raw.to_string()))
}

/// Only finite readings are accepted; the store has no representation for `nan` or `inf`.
fn parse_value(raw: &str, field: &'static str) -> Result<f64, LineError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LineError::Value {
            field,
            raw: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_line_column_mapping() {
        let obs = parse_archive_line("2003_06_15 13:04:00  7.2  180  9.1  18.4  55.0  30.05  0.0")
            .unwrap();
        assert_eq!(obs.date, NaiveDate::from_ymd_opt(2003, 6, 15).unwrap());
        assert_eq!(obs.time, NaiveTime::from_hms_opt(13, 4, 0).unwrap());
        assert_eq!(obs.wind_speed, 7.2);
        assert_eq!(obs.air_temp, 18.4);
        assert_eq!(obs.barometric_pressure, 30.05);
    }

    #[test]
    fn test_archive_line_too_short() {
        assert_eq!(
            parse_archive_line("2003_06_15 13:04:00 7.2 180"),
            Err(LineError::MissingColumns {
                expected: 8,
                found: 4
            })
        );
    }

    #[test]
    fn test_metric_line_accepts_both_date_separators() {
        let a = parse_metric_line("2014_01_20 00:05:31 -3.5", "air temperature").unwrap();
        let b = parse_metric_line("2014-01-20 00:05:31 -3.5", "air temperature").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.value, -3.5);
    }

    #[test]
    fn test_metric_line_bad_fields() {
        assert_eq!(
            parse_metric_line("2014_01_20 00:05:31 n/a", "wind speed"),
            Err(LineError::Value {
                field: "wind speed",
                raw: "n/a".to_string()
            })
        );
        assert_eq!(
            parse_metric_line("2014_13_20 00:05:31 1.0", "wind speed"),
            Err(LineError::Date("2014_13_20".to_string()))
        );
        assert_eq!(
            parse_metric_line("2014_01_20 25:05:31 1.0", "wind speed"),
            Err(LineError::Time("25:05:31".to_string()))
        );
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        for raw in ["nan", "NaN", "inf", "-inf", "infinity"] {
            assert_eq!(
                parse_metric_line(&format!("2013_01_01 00:00:00 {raw}"), "air temperature"),
                Err(LineError::Value {
                    field: "air temperature",
                    raw: raw.to_string()
                })
            );
        }
        assert!(matches!(
            parse_archive_line("2003_06_15 13:04:00  7.2  180  9.1  NaN  55.0  30.05  0.0"),
            Err(LineError::Value {
                field: "air temperature",
                ..
            })
        ));
    }

    #[test]
    fn test_data_lines_skip_blanks_and_keep_numbers() {
        let lines: Vec<_> = data_lines("a\n\n  \nb\n").collect();
        assert_eq!(lines, [(1, "a"), (4, "b")]);
    }
}
