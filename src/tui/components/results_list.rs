//! # ResultsList Component
//!
//! Scrollable column of country cards, or of placeholder cards while loading.
//!
//! ## Architecture
//!
//! `ResultsList` is a transient component (created each frame) that wraps
//! `&'a mut ResultsListState` (persistent scroll state) and the results (props).
//! Every card has the same height, so layout is arithmetic on `CARD_STRIDE`
//! rather than a measured height cache.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::CountryRecord;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::country_card::{
    CARD_HEIGHT, CARD_STRIDE, CountryCard, LOCATION_ROW, MAX_CARD_WIDTH,
};
use crate::tui::components::placeholder_card::PlaceholderCard;
use crate::tui::event::TuiEvent;

/// Placeholder cards rendered while a fetch is pending.
pub const PLACEHOLDER_COUNT: usize = 2;

/// Number of cards on screen: always `PLACEHOLDER_COUNT` while loading,
/// otherwise one per record.
pub fn card_count(is_loading: bool, results_len: usize) -> usize {
    if is_loading {
        PLACEHOLDER_COUNT
    } else {
        results_len
    }
}

/// Height of the scrollable canvas holding `count` cards (no gap after the last).
pub fn content_height(count: usize) -> u16 {
    if count == 0 {
        return 0;
    }
    let total = count as u32 * CARD_STRIDE as u32 - (CARD_STRIDE - CARD_HEIGHT) as u32;
    total.min(u16::MAX as u32) as u16
}

/// Width of each card inside a results area of `area_width` columns.
pub fn card_width(area_width: u16) -> u16 {
    // -1 for the scrollbar
    area_width.saturating_sub(1).min(MAX_CARD_WIDTH)
}

/// What a click inside the results area landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardHit {
    /// The `Location` link of card `n`
    Location(usize),
    /// Anywhere else on card `n`
    Card(usize),
}

/// Maps a screen position to the card under it.
pub fn hit_test(
    area: Rect,
    scroll_offset_y: u16,
    column: u16,
    row: u16,
    count: usize,
) -> Option<CardHit> {
    if !area.contains(Position::new(column, row)) {
        return None;
    }
    if column >= area.x + card_width(area.width) {
        return None;
    }

    let content_y = (row - area.y) as usize + scroll_offset_y as usize;
    let index = content_y / CARD_STRIDE as usize;
    let within = (content_y % CARD_STRIDE as usize) as u16;

    if index >= count || within >= CARD_HEIGHT {
        return None;
    }
    if within == LOCATION_ROW {
        Some(CardHit::Location(index))
    } else {
        Some(CardHit::Card(index))
    }
}

/// Scroll state for the results list.
/// Must be persisted in the parent TuiState.
pub struct ResultsListState {
    pub scroll_state: ScrollViewState,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Content height from the last render
    content_height: u16,
}

impl Default for ResultsListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            viewport_height: 0,
            content_height: 0,
        }
    }

    pub fn offset_y(&self) -> u16 {
        self.scroll_state.offset().y
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_state.scroll_to_top();
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the viewport so card `index` is fully visible.
    pub fn scroll_to_card(&mut self, index: usize) {
        let top = (index as u32 * CARD_STRIDE as u32).min(u16::MAX as u32) as u16;
        let bottom = top.saturating_add(CARD_HEIGHT);
        let offset_y = self.offset_y();

        if top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: top });
        } else if bottom > offset_y + self.viewport_height {
            let new_y = bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }
}

/// Created fresh each frame with references to state and data.
pub struct ResultsList<'a> {
    pub state: &'a mut ResultsListState,
    pub results: &'a [CountryRecord],
    pub is_loading: bool,
    pub selected: Option<usize>,
    pub frame_index: usize,
}

impl<'a> ResultsList<'a> {
    pub fn new(
        state: &'a mut ResultsListState,
        results: &'a [CountryRecord],
        is_loading: bool,
        selected: Option<usize>,
        frame_index: usize,
    ) -> Self {
        Self {
            state,
            results,
            is_loading,
            selected,
            frame_index,
        }
    }
}

impl<'a> Component for ResultsList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let count = card_count(self.is_loading, self.results.len());
        let content_width = area.width.saturating_sub(1);
        let width = card_width(area.width);
        let total_height = content_height(count);

        self.state.viewport_height = area.height;
        self.state.content_height = total_height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        // Only cards intersecting the viewport are drawn
        let offset = self.state.offset_y() as usize;
        let stride = CARD_STRIDE as usize;
        let first = offset / stride;
        let last = ((offset + area.height as usize) / stride + 1).min(count);

        for i in first..last {
            let card_area = Rect::new(0, (i * stride) as u16, width, CARD_HEIGHT);
            if self.is_loading {
                scroll_view.render_widget(PlaceholderCard::new(self.frame_index), card_area);
            } else {
                let card = CountryCard::new(&self.results[i], self.selected == Some(i));
                scroll_view.render_widget(card, card_area);
            }
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl EventHandler for ResultsListState {
    type Event = (); // Scrolling is handled internally

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}
