//! REST Countries (v3.1) source.
//!
//! - `GET {base}/all?fields=...` for the initial listing
//! - `GET {base}/name/{name}?fields=...` for searches (partial, case-insensitive match)
//!
//! The API answers an unmatched name with HTTP 404, which is mapped to an
//! empty result set rather than an error.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{StatusCode, Url};

use crate::api::types::{CountryEntry, CountryRecord, REQUESTED_FIELDS};
use crate::api::{CountrySource, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the REST Countries API.
pub struct RestCountriesClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestCountriesClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Config(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| FetchError::Config(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base}/{segments...}?fields=...`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::Config(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| FetchError::Config(format!("base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair("fields", REQUESTED_FIELDS);
        Ok(url)
    }

    async fn get_records(&self, url: Url) -> Result<Vec<CountryRecord>, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!("No countries matched ({})", url.path());
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("REST Countries returned HTTP {}: {}", status.as_u16(), message);
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let entries: Vec<CountryEntry> =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        info!("Fetched {} countries from {}", entries.len(), url.path());
        Ok(entries.into_iter().map(CountryRecord::from).collect())
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    fn name(&self) -> &str {
        "restcountries"
    }

    async fn fetch_all_countries(&self) -> Result<Vec<CountryRecord>, FetchError> {
        let url = self.endpoint(&["all"])?;
        self.get_records(url).await
    }

    async fn fetch_country_by_name(&self, name: &str) -> Result<Vec<CountryRecord>, FetchError> {
        let name = name.trim();
        if name.is_empty() {
            // `/name/` with no name is a 404; a blank search lists everything instead
            return self.fetch_all_countries().await;
        }
        let url = self.endpoint(&["name", name])?;
        self.get_records(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> RestCountriesClient {
        RestCountriesClient::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_endpoint_for_all() {
        let url = client(DEFAULT_BASE_URL).endpoint(&["all"]).unwrap();
        assert_eq!(url.path(), "/v3.1/all");
        assert_eq!(
            url.query(),
            Some("fields=name%2Ccapital%2Cregion%2Cpopulation%2Carea%2Cflags%2Cmaps%2Cflag")
        );
    }

    #[test]
    fn test_endpoint_encodes_name_segment() {
        let url = client(DEFAULT_BASE_URL)
            .endpoint(&["name", "united states/x"])
            .unwrap();
        assert_eq!(url.path(), "/v3.1/name/united%20states%2Fx");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let c = client("http://localhost:9999/v3.1/");
        assert_eq!(c.base_url(), "http://localhost:9999/v3.1");
        assert_eq!(c.endpoint(&["all"]).unwrap().path(), "/v3.1/all");
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let result = RestCountriesClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(FetchError::Config(_))));
    }

    #[test]
    fn test_network_failure_maps_to_network_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let c = client("http://127.0.0.1:9");
        let result = tokio_test::block_on(c.fetch_all_countries());
        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
