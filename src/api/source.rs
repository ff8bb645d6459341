use std::fmt;

use async_trait::async_trait;

use super::types::CountryRecord;

/// Errors that can occur while fetching country data.
#[derive(Debug)]
pub enum FetchError {
    /// Source misconfigured (unparseable base URL). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status other than 404.
    Api { status: u16, message: String },
    /// Response body was not the expected JSON.
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Config(msg) => write!(f, "config error: {msg}"),
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// The data collaborator behind the search screen.
///
/// Both operations resolve to the complete result set for their query. Callers
/// replace whatever they were showing with it.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Returns the name of the source, for logging.
    fn name(&self) -> &str;

    /// Every country the source knows about.
    async fn fetch_all_countries(&self) -> Result<Vec<CountryRecord>, FetchError>;

    /// Countries whose name matches `name`. An unmatched name yields an empty vector.
    async fn fetch_country_by_name(&self, name: &str) -> Result<Vec<CountryRecord>, FetchError>;
}
