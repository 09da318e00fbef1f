use crate::types::observation::Observation;
use crate::weather_data::daily_metrics::DailyMetrics;
use crate::weather_data::error::FetchError;
use crate::weather_data::http::RemoteText;
use crate::weather_data::yearly_archive::YearlyArchive;
use chrono::{Datelike, NaiveDate};
use reqwest::blocking::Client;

/// Retrieves the raw observations behind one calendar date.
///
/// Implementations may return more than the requested day: a yearly archive
/// answers with the whole year the date falls in.
pub trait Fetcher {
    fn fetch(&self, date: NaiveDate) -> Result<Vec<Observation>, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    fn fetch(&self, date: NaiveDate) -> Result<Vec<Observation>, FetchError> {
        (**self).fetch(date)
    }
}

/// Which upstream format serves a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Era {
    YearlyArchive,
    DailyMetrics,
}

impl Era {
    pub fn of(date: NaiveDate, cutoff_year: i32) -> Self {
        if date.year() < cutoff_year {
            Era::YearlyArchive
        } else {
            Era::DailyMetrics
        }
    }
}

/// Sends dates before the cutoff year to `Y` and the rest to `D`.
#[derive(Debug, Clone)]
pub struct EraFetcher<Y = YearlyArchive, D = DailyMetrics> {
    cutoff_year: i32,
    yearly: Y,
    daily: D,
}

impl<Y: Fetcher, D: Fetcher> EraFetcher<Y, D> {
    pub fn new(cutoff_year: i32, yearly: Y, daily: D) -> Self {
        Self {
            cutoff_year,
            yearly,
            daily,
        }
    }
}

impl EraFetcher {
    /// Both formats read from `base_url` through `client`.
    pub fn http(client: Client, base_url: &str, cutoff_year: i32) -> Self {
        let remote = RemoteText::new(client, base_url);
        EraFetcher::new(
            cutoff_year,
            YearlyArchive::new(remote.clone()),
            DailyMetrics::new(remote),
        )
    }
}

impl<Y: Fetcher, D: Fetcher> Fetcher for EraFetcher<Y, D> {
    fn fetch(&self, date: NaiveDate) -> Result<Vec<Observation>, FetchError> {
        match Era::of(date, self.cutoff_year) {
            Era::YearlyArchive => self.yearly.fetch(date),
            Era::DailyMetrics => self.daily.fetch(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recording {
        seen: RefCell<Vec<NaiveDate>>,
    }

    impl Recording {
        fn new() -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Fetcher for Recording {
        fn fetch(&self, date: NaiveDate) -> Result<Vec<Observation>, FetchError> {
            self.seen.borrow_mut().push(date);
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_routes_by_cutoff_year() {
        let fetcher = EraFetcher::new(2007, Recording::new(), Recording::new());
        let old = NaiveDate::from_ymd_opt(2006, 12, 31).unwrap();
        let new = NaiveDate::from_ymd_opt(2007, 1, 1).unwrap();

        fetcher.fetch(old).unwrap();
        fetcher.fetch(new).unwrap();

        assert_eq!(*fetcher.yearly.seen.borrow(), [old]);
        assert_eq!(*fetcher.daily.seen.borrow(), [new]);
    }

    #[test]
    fn test_era_of() {
        let date = NaiveDate::from_ymd_opt(2010, 6, 1).unwrap();
        assert_eq!(Era::of(date, 2007), Era::DailyMetrics);
        assert_eq!(Era::of(date, 2011), Era::YearlyArchive);
    }

    #[test]
    fn test_boxed_fetcher_delegates() {
        let boxed: Box<dyn Fetcher> = Box::new(Recording::new());
        assert!(boxed
            .fetch(NaiveDate::from_ymd_opt(2010, 6, 1).unwrap())
            .unwrap()
            .is_empty());
    }
}
