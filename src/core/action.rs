//! # Actions
//!
//! Everything that can happen on the search screen becomes an `Action`.
//! User presses Enter in the search box? That's `Action::Search`.
//! The country source answers? That's `Action::FetchSettled { .. }`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! adapter must perform (spawn a fetch, open a link). No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::api::CountryRecord;
use crate::core::state::{App, FetchKind, FetchRequest, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Initial listing of every country. Dispatched once at startup.
    Load,
    /// Search box contents changed. Never triggers a fetch on its own.
    QueryChanged(String),
    /// Search for the current query.
    Search,
    /// A fetch finished, successfully or not.
    FetchSettled {
        id: RequestId,
        outcome: Result<Vec<CountryRecord>, String>,
    },
    SelectNext,
    SelectPrev,
    Select(usize),
    /// Open the map link of the card at this index.
    OpenLocation(usize),
    Quit,
}

/// Side effects requested by `update()`, performed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Fetch(FetchRequest),
    OpenLink(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Load => {
            let request = app.begin_fetch(FetchKind::All);
            app.status_message = String::from("Loading all countries...");
            info!("Loading all countries (request {})", request.id);
            Effect::Fetch(request)
        }
        Action::QueryChanged(query) => {
            app.query = query;
            Effect::None
        }
        Action::Search => {
            let request = app.begin_fetch(FetchKind::ByName(app.query.clone()));
            app.status_message = format!("Searching for '{}'...", app.query);
            info!("Searching for {:?} (request {})", app.query, request.id);
            Effect::Fetch(request)
        }
        Action::FetchSettled { id, outcome } => {
            if !app.is_current(id) {
                debug!(
                    "Discarding stale response {} (latest is {:?})",
                    id, app.latest_request
                );
                return Effect::None;
            }
            app.is_loading = false;
            match outcome {
                Ok(records) => {
                    app.status_message = match records.len() {
                        1 => String::from("1 country"),
                        n => format!("{n} countries"),
                    };
                    app.selected = if records.is_empty() { None } else { Some(0) };
                    app.results = records;
                    app.error = None;
                }
                Err(message) => {
                    warn!("Request {} failed: {}", id, message);
                    app.status_message = String::from("Fetch failed");
                    app.error = Some(message);
                }
            }
            Effect::None
        }
        // Old results are hidden behind placeholders while loading
        Action::SelectNext | Action::SelectPrev if app.is_loading => Effect::None,
        Action::SelectNext => {
            if !app.results.is_empty() {
                let last = app.results.len() - 1;
                app.selected = Some(app.selected.map_or(0, |i| (i + 1).min(last)));
            }
            Effect::None
        }
        Action::SelectPrev => {
            if !app.results.is_empty() {
                app.selected = Some(app.selected.map_or(0, |i| i.saturating_sub(1)));
            }
            Effect::None
        }
        Action::Select(index) => {
            if index < app.results.len() {
                app.selected = Some(index);
            }
            Effect::None
        }
        Action::OpenLocation(index) => {
            // Placeholders are on screen while loading; there is nothing to open
            if app.is_loading {
                return Effect::None;
            }
            match app.results.get(index) {
                Some(record) if !record.map.is_empty() => {
                    app.selected = Some(index);
                    app.status_message = format!("Opening map for {}", record.name);
                    Effect::OpenLink(record.map.clone())
                }
                Some(record) => {
                    app.status_message = format!("No map link for {}", record.name);
                    Effect::None
                }
                None => Effect::None,
            }
        }
        Action::Quit => Effect::Quit,
    }
}
