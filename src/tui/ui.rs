use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::results_list::{self, CardHit};
use crate::tui::components::{ResultsList, SearchBar, StatusBar};
use crate::tui::{Focus, TuiState};

pub const HEADING: &str = "World Country Information";

/// Areas of the single screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub heading: Rect,
    pub search: Rect,
    pub results: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    use Constraint::{Length, Min};
    let inner = area.inner(ratatui::layout::Margin::new(1, 0));
    let [heading, search, results, status] =
        Layout::vertical([Length(1), Length(3), Min(0), Length(1)]).areas(inner);
    ScreenLayout {
        heading,
        search,
        results,
        status,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, frame_index: usize) {
    let layout = screen_layout(frame.area());

    let heading = Paragraph::new(HEADING)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    frame.render_widget(heading, layout.heading);

    tui.search_bar.focused = tui.focus == Focus::Search;
    tui.search_bar.render(frame, layout.search);

    ResultsList::new(
        &mut tui.results,
        &app.results,
        app.is_loading,
        app.selected,
        frame_index,
    )
    .render(frame, layout.results);

    StatusBar::new(
        &app.status_message,
        app.error.as_deref(),
        tui.focus == Focus::Results,
    )
    .render(frame, layout.status);
}

/// What a mouse click at a screen position targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenHit {
    SearchInput,
    SearchButton,
    Card(CardHit),
}

pub fn hit_test(
    frame_area: Rect,
    column: u16,
    row: u16,
    scroll_offset_y: u16,
    card_count: usize,
) -> Option<ScreenHit> {
    let layout = screen_layout(frame_area);
    let position = Position::new(column, row);

    if layout.search.contains(position) {
        let [input, button] = SearchBar::split(layout.search);
        if button.contains(position) {
            return Some(ScreenHit::SearchButton);
        }
        if input.contains(position) {
            return Some(ScreenHit::SearchInput);
        }
        return None;
    }

    results_list::hit_test(layout.results, scroll_offset_y, column, row, card_count)
        .map(ScreenHit::Card)
}
