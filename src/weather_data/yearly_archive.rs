use crate::types::observation::Observation;
use crate::weather_data::error::FetchError;
use crate::weather_data::fetcher::Fetcher;
use crate::weather_data::http::RemoteText;
use crate::weather_data::parse::{data_lines, parse_archive_line};
use chrono::{Datelike, NaiveDate};
use log::info;

/// Older data: one document per year holding every timestamp of that year.
#[derive(Debug, Clone)]
pub struct YearlyArchive {
    remote: RemoteText,
}

impl YearlyArchive {
    pub fn new(remote: RemoteText) -> Self {
        Self { remote }
    }

    pub(crate) fn url_for(&self, year: i32) -> String {
        format!("{}/Environmental_Data_{}.txt", self.remote.base_url(), year)
    }
}

impl Fetcher for YearlyArchive {
    /// Fetches the whole year `date` falls in.
    fn fetch(&self, date: NaiveDate) -> Result<Vec<Observation>, FetchError> {
        let url = self.url_for(date.year());
        info!("Fetching online data for {} (full year)", date.year());
        let text = self.remote.get(&url, date)?;
        parse_archive(&text, date, &url)
    }
}

/// Parse a yearly archive. The first line is a column header.
pub(crate) fn parse_archive(
    text: &str,
    date: NaiveDate,
    url: &str,
) -> Result<Vec<Observation>, FetchError> {
    data_lines(text)
        .filter(|(line_no, _)| *line_no > 1)
        .map(|(line_no, line)| {
            parse_archive_line(line).map_err(|source| FetchError::MalformedLine {
                date,
                url: url.to_string(),
                line_no,
                source,
            })
        })
        .collect()
}
