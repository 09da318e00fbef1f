use crate::weather_data::error::FetchError;
use chrono::NaiveDate;
use log::{info, warn};
use reqwest::blocking::Client;

/// Blocking text download shared by both upstream formats.
#[derive(Debug, Clone)]
pub struct RemoteText {
    client: Client,
    base_url: String,
}

impl RemoteText {
    pub fn new(client: Client, base_url: &str) -> Self {
        RemoteText {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Downloads `url` as text. `date` is the date the document was requested for.
    pub fn get(&self, url: &str, date: NaiveDate) -> Result<String, FetchError> {
        info!("Downloading {} for {}", url, date);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::NetworkRequest {
                date,
                url: url.to_string(),
                source: e,
            })?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        date,
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest {
                        date,
                        url: url.to_string(),
                        source: e,
                    }
                });
            }
        };

        response.text().map_err(|e| FetchError::NetworkRequest {
            date,
            url: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let remote = RemoteText::new(Client::new(), "http://example.invalid/data/DM//");
        assert_eq!(remote.base_url(), "http://example.invalid/data/DM");
    }

    #[test]
    fn test_unreachable_host_reports_requested_date() {
        let remote = RemoteText::new(Client::new(), "http://127.0.0.1:9");
        let date = NaiveDate::from_ymd_opt(2012, 4, 1).unwrap();
        let err = remote.get("http://127.0.0.1:9/nothing", date).unwrap_err();
        assert!(matches!(err, FetchError::NetworkRequest { .. }));
        assert_eq!(err.date(), date);
    }
}
