//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::api::{CountryRecord, CountrySource, FetchError};
use crate::platform::LinkOpener;

/// A record with predictable field values derived from `name`.
pub fn record(name: &str, map: &str) -> CountryRecord {
    CountryRecord {
        name: name.to_string(),
        capital: format!("{name} City"),
        region: "Testland".to_string(),
        population: 1_000,
        area: 250.0,
        flag: format!("https://flags.test/{}.png", name.to_lowercase()),
        map: map.to_string(),
        flag_emoji: None,
    }
}

pub fn sample_records() -> Vec<CountryRecord> {
    vec![
        CountryRecord {
            name: "France".to_string(),
            capital: "Paris".to_string(),
            region: "Europe".to_string(),
            population: 67391582,
            area: 551695.0,
            flag: "https://flagcdn.com/w320/fr.png".to_string(),
            map: "https://goo.gl/maps/g7QxxSFsWyTPKuzd7".to_string(),
            flag_emoji: Some("🇫🇷".to_string()),
        },
        CountryRecord {
            name: "Japan".to_string(),
            capital: "Tokyo".to_string(),
            region: "Asia".to_string(),
            population: 125836021,
            area: 377930.0,
            flag: "https://flagcdn.com/w320/jp.png".to_string(),
            map: "https://goo.gl/maps/NGTLSCSrA8bMrvnX9".to_string(),
            flag_emoji: Some("🇯🇵".to_string()),
        },
        CountryRecord {
            name: "Peru".to_string(),
            capital: "Lima".to_string(),
            region: "Americas".to_string(),
            population: 32971846,
            area: 1285216.0,
            flag: "https://flagcdn.com/w320/pe.png".to_string(),
            map: "https://goo.gl/maps/uDWEUaXNcZTng1fP6".to_string(),
            flag_emoji: Some("🇵🇪".to_string()),
        },
    ]
}

/// An in-memory source that matches names case-insensitively by substring.
pub struct StaticSource {
    records: Vec<CountryRecord>,
    pub calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(records: Vec<CountryRecord>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CountrySource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_all_countries(&self) -> Result<Vec<CountryRecord>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }

    async fn fetch_country_by_name(&self, name: &str) -> Result<Vec<CountryRecord>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let needle = name.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

/// A source whose every call fails with a network error.
pub struct FailingSource;

#[async_trait]
impl CountrySource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch_all_countries(&self) -> Result<Vec<CountryRecord>, FetchError> {
        Err(FetchError::Network("connection refused".to_string()))
    }

    async fn fetch_country_by_name(&self, _name: &str) -> Result<Vec<CountryRecord>, FetchError> {
        Err(FetchError::Network("connection refused".to_string()))
    }
}

/// Records every URI it is asked to open instead of launching anything.
#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&self, uri: &str) -> io::Result<()> {
        self.opened.lock().unwrap().push(uri.to_string());
        Ok(())
    }
}
