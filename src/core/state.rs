//! # Application State
//!
//! Core state for the search screen. Domain data only. Presentation state
//! (focus, scroll offsets, animation) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── query: String                  // search box contents
//! ├── results: Vec<CountryRecord>    // most recent settled fetch
//! ├── is_loading: bool               // a fetch is in flight
//! ├── error: Option<String>          // last fetch failure
//! ├── status_message: String         // status bar text
//! ├── selected: Option<usize>        // highlighted card
//! ├── latest_request: Option<RequestId>
//! └── next_request: u64              // RequestId counter
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::fmt;

use crate::api::CountryRecord;

/// Identifies one fetch. Strictly increasing per `App`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a fetch asks the country source for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchKind {
    All,
    ByName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub kind: FetchKind,
}

pub struct App {
    pub query: String,
    pub results: Vec<CountryRecord>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub status_message: String,
    pub selected: Option<usize>,
    /// Only a response carrying this id may touch `results`.
    pub latest_request: Option<RequestId>,
    next_request: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            is_loading: false,
            error: None,
            status_message: String::from("Welcome to Atlas!"),
            selected: None,
            latest_request: None,
            next_request: 0,
        }
    }

    /// Starts a fetch: flips the loading flag and issues a fresh id,
    /// which supersedes any request still in flight.
    pub fn begin_fetch(&mut self, kind: FetchKind) -> FetchRequest {
        self.next_request += 1;
        let id = RequestId(self.next_request);
        self.latest_request = Some(id);
        self.is_loading = true;
        self.error = None;
        FetchRequest { id, kind }
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        self.latest_request == Some(id)
    }

    pub fn selected_record(&self) -> Option<&CountryRecord> {
        self.selected.and_then(|i| self.results.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_new_defaults() {
        let app = App::new();
        assert_eq!(app.status_message, "Welcome to Atlas!");
        assert!(!app.is_loading);
        assert!(app.results.is_empty());
        assert!(app.latest_request.is_none());
    }

    #[test]
    fn test_begin_fetch_issues_increasing_ids() {
        let mut app = App::new();
        let first = app.begin_fetch(FetchKind::All);
        let second = app.begin_fetch(FetchKind::ByName("Peru".to_string()));

        assert!(second.id > first.id);
        assert!(app.is_loading);
        assert!(app.is_current(second.id));
        assert!(!app.is_current(first.id));
    }

    #[test]
    fn test_begin_fetch_clears_previous_error() {
        let mut app = App::new();
        app.error = Some("network error: boom".to_string());
        app.begin_fetch(FetchKind::All);
        assert!(app.error.is_none());
    }
}
