//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the screen,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Loading**: draws every ~80ms so the placeholder shimmer animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! ## Fetches
//!
//! Fetches run as tokio tasks and report back over an `mpsc` channel as
//! `Action::FetchSettled`. Starting a fetch aborts the one in flight, and the
//! request id carried by each response lets `update()` drop anything stale
//! that slipped through. Quitting aborts whatever is still running.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::api::{CountrySource, RestCountriesClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, FetchKind, FetchRequest};
use crate::platform::{LinkOpener, SystemLinkOpener};
use crate::tui::component::EventHandler;
use crate::tui::components::results_list::card_count;
use crate::tui::components::{CardHit, ResultsListState, SearchBar, SearchEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::ScreenHit;

/// Which area receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Typing edits the query; Enter searches.
    Search,
    /// Arrow keys move between cards; Enter opens the selected map.
    Results,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_bar: SearchBar,
    pub results: ResultsListState,
    pub focus: Focus,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            search_bar: SearchBar::new(),
            results: ResultsListState::new(),
            focus: Focus::Search, // User expects to type immediately
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Performs the effects `update()` asks for.
pub struct EffectRunner {
    source: Arc<dyn CountrySource>,
    opener: Arc<dyn LinkOpener>,
    tx: mpsc::Sender<Action>,
    in_flight: Option<tokio::task::AbortHandle>,
}

impl EffectRunner {
    pub fn new(
        source: Arc<dyn CountrySource>,
        opener: Arc<dyn LinkOpener>,
        tx: mpsc::Sender<Action>,
    ) -> Self {
        Self {
            source,
            opener,
            tx,
            in_flight: None,
        }
    }

    /// Applies `action` and runs its effect. Returns `true` when the app should quit.
    pub fn dispatch(&mut self, app: &mut App, action: Action) -> bool {
        match update(app, action) {
            Effect::None => false,
            Effect::Fetch(request) => {
                self.abort_in_flight();
                self.in_flight = Some(spawn_fetch(self.source.clone(), request, self.tx.clone()));
                false
            }
            Effect::OpenLink(uri) => {
                if let Err(e) = self.opener.open(&uri) {
                    warn!("Failed to open {}: {}", uri, e);
                    app.status_message = format!("Could not open link: {e}");
                }
                false
            }
            Effect::Quit => true,
        }
    }

    pub fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            debug!("Aborting in-flight fetch");
            handle.abort();
        }
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}

fn spawn_fetch(
    source: Arc<dyn CountrySource>,
    request: FetchRequest,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!("Spawning fetch {} ({:?}) on {}", request.id, request.kind, source.name());
    let handle = tokio::spawn(async move {
        let started = std::time::Instant::now();
        let result = match &request.kind {
            FetchKind::All => source.fetch_all_countries().await,
            FetchKind::ByName(name) => source.fetch_country_by_name(name).await,
        };
        let outcome = match result {
            Ok(records) => {
                debug!(
                    "Fetch {} returned {} records in {}ms",
                    request.id,
                    records.len(),
                    started.elapsed().as_millis()
                );
                Ok(records)
            }
            Err(e) => {
                warn!("Fetch {} failed: {}", request.id, e);
                Err(e.to_string())
            }
        };
        if tx
            .send(Action::FetchSettled {
                id: request.id,
                outcome,
            })
            .is_err()
        {
            warn!("Failed to deliver fetch {}: receiver dropped", request.id);
        }
    });
    handle.abort_handle()
}

/// Routes one terminal event. Returns `true` when the app should quit.
fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    runner: &mut EffectRunner,
    event: TuiEvent,
    frame_area: Rect,
) -> bool {
    match event {
        TuiEvent::ForceQuit => return runner.dispatch(app, Action::Quit),
        TuiEvent::Resize => return false,
        TuiEvent::ToggleFocus => {
            tui.focus = match tui.focus {
                Focus::Search => Focus::Results,
                Focus::Results => Focus::Search,
            };
            return false;
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.results.handle_event(&event);
            return false;
        }
        TuiEvent::MouseClick(column, row) => {
            return handle_click(app, tui, runner, column, row, frame_area);
        }
        _ => {}
    }

    match tui.focus {
        Focus::Search => match event {
            TuiEvent::Escape | TuiEvent::CursorDown => {
                tui.focus = Focus::Results;
                false
            }
            _ => match tui.search_bar.handle_event(&event) {
                Some(SearchEvent::Changed(text)) => runner.dispatch(app, Action::QueryChanged(text)),
                Some(SearchEvent::Submit) => search(app, tui, runner),
                None => false,
            },
        },
        Focus::Results => match event {
            TuiEvent::CursorUp | TuiEvent::InputChar('k') => {
                let quit = runner.dispatch(app, Action::SelectPrev);
                scroll_to_selection(app, tui);
                quit
            }
            TuiEvent::CursorDown | TuiEvent::InputChar('j') => {
                let quit = runner.dispatch(app, Action::SelectNext);
                scroll_to_selection(app, tui);
                quit
            }
            TuiEvent::Submit | TuiEvent::InputChar('o') => match app.selected {
                Some(index) => runner.dispatch(app, Action::OpenLocation(index)),
                None => false,
            },
            TuiEvent::InputChar('q') => runner.dispatch(app, Action::Quit),
            TuiEvent::Escape | TuiEvent::InputChar('/') => {
                tui.focus = Focus::Search;
                false
            }
            // Typing anything else switches to the search box and forwards the keystroke
            TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace => {
                tui.focus = Focus::Search;
                match tui.search_bar.handle_event(&event) {
                    Some(SearchEvent::Changed(text)) => {
                        runner.dispatch(app, Action::QueryChanged(text))
                    }
                    _ => false,
                }
            }
            _ => false,
        },
    }
}

fn handle_click(
    app: &mut App,
    tui: &mut TuiState,
    runner: &mut EffectRunner,
    column: u16,
    row: u16,
    frame_area: Rect,
) -> bool {
    let count = card_count(app.is_loading, app.results.len());
    match ui::hit_test(frame_area, column, row, tui.results.offset_y(), count) {
        Some(ScreenHit::SearchButton) => search(app, tui, runner),
        Some(ScreenHit::SearchInput) => {
            tui.focus = Focus::Search;
            false
        }
        // Placeholder cards are not interactive
        Some(ScreenHit::Card(_)) if app.is_loading => false,
        Some(ScreenHit::Card(CardHit::Location(index))) => {
            runner.dispatch(app, Action::OpenLocation(index))
        }
        Some(ScreenHit::Card(CardHit::Card(index))) => {
            tui.focus = Focus::Results;
            runner.dispatch(app, Action::Select(index))
        }
        None => false,
    }
}

fn search(app: &mut App, tui: &mut TuiState, runner: &mut EffectRunner) -> bool {
    tui.results.scroll_to_top();
    runner.dispatch(app, Action::Search)
}

fn scroll_to_selection(app: &App, tui: &mut TuiState) {
    if app.is_loading {
        return;
    }
    if let Some(index) = app.selected {
        tui.results.scroll_to_card(index);
    }
}

/// Build the country source from the resolved config.
pub fn build_source(config: &ResolvedConfig) -> std::io::Result<Arc<dyn CountrySource>> {
    let client = RestCountriesClient::new(config.base_url.clone(), config.timeout)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    info!("Using country source at {}", client.base_url());
    Ok(Arc::new(client))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source = build_source(&config)?;
    let opener: Arc<dyn LinkOpener> = Arc::new(SystemLinkOpener);

    let mut app = App::new();
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut runner = EffectRunner::new(source, opener, tx);

    // Initial listing, requested exactly once before the first frame
    runner.dispatch(&mut app, Action::Load);
    if let Some(query) = &config.initial_query {
        tui.search_bar.set_text(query);
        runner.dispatch(&mut app, Action::QueryChanged(query.clone()));
        search(&mut app, &mut tui, &mut runner);
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        let animating = app.is_loading;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let frame_index = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, frame_index)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let frame_area = terminal.get_frame().area();
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, &mut runner, event, frame_area) {
                should_quit = true;
                break;
            }
        }
        if should_quit {
            break Ok(());
        }

        // Settled fetches from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", summarize(&action));
            runner.dispatch(&mut app, action);
        }
    };

    info!("Shutting down");
    runner.abort_in_flight();
    drop(_terminal_mode_guard);
    ratatui::restore();
    result
}

/// Short description of an action for logging (results can hold hundreds of records).
fn summarize(action: &Action) -> String {
    match action {
        Action::FetchSettled { id, outcome: Ok(records) } => {
            format!("FetchSettled {{ id: {id}, records: {} }}", records.len())
        }
        Action::FetchSettled { id, outcome: Err(e) } => {
            format!("FetchSettled {{ id: {id}, error: {e} }}")
        }
        other => format!("{other:?}"),
    }
}
