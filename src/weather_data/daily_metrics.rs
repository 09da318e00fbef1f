use crate::types::observation::Observation;
use crate::weather_data::error::FetchError;
use crate::weather_data::fetcher::Fetcher;
use crate::weather_data::http::RemoteText;
use crate::weather_data::parse::{data_lines, parse_metric_line, MetricSample};
use chrono::{Datelike, NaiveDate};
use log::info;
use std::fmt;

/// The three quantities published as separate daily files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    AirTemp,
    BarometricPressure,
    WindSpeed,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::AirTemp, Metric::BarometricPressure, Metric::WindSpeed];

    pub(crate) fn path_segment(&self) -> &'static str {
        match self {
            Metric::AirTemp => "Air_Temp",
            Metric::BarometricPressure => "Barometric_Press",
            Metric::WindSpeed => "Wind_Speed",
        }
    }

    fn field_name(&self) -> &'static str {
        match self {
            Metric::AirTemp => "air temperature",
            Metric::BarometricPressure => "barometric pressure",
            Metric::WindSpeed => "wind speed",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

/// Newer data: one file per day and metric, merged line by line.
#[derive(Debug, Clone)]
pub struct DailyMetrics {
    remote: RemoteText,
}

impl DailyMetrics {
    pub fn new(remote: RemoteText) -> Self {
        Self { remote }
    }

    pub(crate) fn url_for(&self, date: NaiveDate, metric: Metric) -> String {
        format!(
            "{}/{}/{}/{}",
            self.remote.base_url(),
            date.year(),
            date.format("%Y_%m_%d"),
            metric.path_segment()
        )
    }

    fn fetch_metric(&self, date: NaiveDate, metric: Metric) -> Result<Vec<MetricSample>, FetchError> {
        let url = self.url_for(date, metric);
        let text = self.remote.get(&url, date)?;
        parse_metric(&text, date, metric, &url)
    }
}

impl Fetcher for DailyMetrics {
    fn fetch(&self, date: NaiveDate) -> Result<Vec<Observation>, FetchError> {
        info!("Fetching online data for {}", date);
        let air_temp = self.fetch_metric(date, Metric::AirTemp)?;
        let barometric_pressure = self.fetch_metric(date, Metric::BarometricPressure)?;
        let wind_speed = self.fetch_metric(date, Metric::WindSpeed)?;
        merge_metrics(date, &air_temp, &barometric_pressure, &wind_speed)
    }
}

pub(crate) fn parse_metric(
    text: &str,
    date: NaiveDate,
    metric: Metric,
    url: &str,
) -> Result<Vec<MetricSample>, FetchError> {
    data_lines(text)
        .map(|(line_no, line)| {
            parse_metric_line(line, metric.field_name()).map_err(|source| {
                FetchError::MalformedLine {
                    date,
                    url: url.to_string(),
                    line_no,
                    source,
                }
            })
        })
        .collect()
}

/// Zip the three metric series into observations.
///
/// The series must have equal length and agree on the timestamp at every
/// index, otherwise the upstream files are treated as corrupt.
pub(crate) fn merge_metrics(
    date: NaiveDate,
    air_temp: &[MetricSample],
    barometric_pressure: &[MetricSample],
    wind_speed: &[MetricSample],
) -> Result<Vec<Observation>, FetchError> {
    if air_temp.len() != barometric_pressure.len() || air_temp.len() != wind_speed.len() {
        return Err(FetchError::LengthMismatch {
            date,
            air_temp: air_temp.len(),
            barometric_pressure: barometric_pressure.len(),
            wind_speed: wind_speed.len(),
        });
    }

    air_temp
        .iter()
        .zip(barometric_pressure)
        .zip(wind_speed)
        .enumerate()
        .map(|(i, ((air, press), wind))| {
            let stamp = (air.date, air.time);
            if stamp != (press.date, press.time) || stamp != (wind.date, wind.time) {
                return Err(FetchError::TimestampMismatch {
                    date,
                    line_no: i + 1,
                });
            }
            Ok(Observation {
                date: air.date,
                time: air.time,
                air_temp: air.value,
                barometric_pressure: press.value,
                wind_speed: wind.value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::blocking::Client;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2013, 10, 4).unwrap()
    }

    fn series(text: &str, metric: Metric) -> Vec<MetricSample> {
        parse_metric(text, day(), metric, "test").unwrap()
    }

    #[test]
    fn test_merge_by_line() {
        let air = series("2013_10_04 00:00:00 10.5\n2013_10_04 00:05:00 10.4\n", Metric::AirTemp);
        let press = series(
            "2013_10_04 00:00:00 29.8\n2013_10_04 00:05:00 29.9\n",
            Metric::BarometricPressure,
        );
        let wind = series("2013_10_04 00:00:00 2.0\n2013_10_04 00:05:00 2.2\n", Metric::WindSpeed);

        let rows = merge_metrics(day(), &air, &press, &wind).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].air_temp, 10.4);
        assert_eq!(rows[1].barometric_pressure, 29.9);
        assert_eq!(rows[1].wind_speed, 2.2);
        assert_eq!(rows[1].time.to_string(), "00:05:00");
    }

    #[test]
    fn test_length_mismatch_fails_day() {
        let air = series("2013_10_04 00:00:00 10.5\n2013_10_04 00:05:00 10.4\n", Metric::AirTemp);
        let press = series("2013_10_04 00:00:00 29.8\n", Metric::BarometricPressure);
        let wind = series("2013_10_04 00:00:00 2.0\n2013_10_04 00:05:00 2.2\n", Metric::WindSpeed);

        let err = merge_metrics(day(), &air, &press, &wind).unwrap_err();
        assert!(matches!(
            err,
            FetchError::LengthMismatch {
                air_temp: 2,
                barometric_pressure: 1,
                wind_speed: 2,
                ..
            }
        ));
        assert_eq!(err.date(), day());
    }

    #[test]
    fn test_timestamp_mismatch_fails_day() {
        let air = series("2013_10_04 00:00:00 10.5\n2013_10_04 00:05:00 10.4\n", Metric::AirTemp);
        let press = series(
            "2013_10_04 00:00:00 29.8\n2013_10_04 00:06:00 29.9\n",
            Metric::BarometricPressure,
        );
        let wind = series("2013_10_04 00:00:00 2.0\n2013_10_04 00:05:00 2.2\n", Metric::WindSpeed);

        assert!(matches!(
            merge_metrics(day(), &air, &press, &wind),
            Err(FetchError::TimestampMismatch { line_no: 2, .. })
        ));
    }

    #[test]
    fn test_empty_day_merges_to_nothing() {
        assert!(merge_metrics(day(), &[], &[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_url_per_day_and_metric() {
        let daily = DailyMetrics::new(RemoteText::new(Client::new(), "http://host/data/DM"));
        let urls: Vec<String> = Metric::ALL.iter().map(|m| daily.url_for(day(), *m)).collect();
        assert_eq!(
            urls,
            [
                "http://host/data/DM/2013/2013_10_04/Air_Temp",
                "http://host/data/DM/2013/2013_10_04/Barometric_Press",
                "http://host/data/DM/2013/2013_10_04/Wind_Speed",
            ]
        );
    }
}
