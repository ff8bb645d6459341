//! # SearchBar Component
//!
//! Single-line country name input plus a `Search` button.
//!
//! ## Responsibilities
//!
//! - Capture text input and basic editing (backspace, delete, cursor movement, paste)
//! - Emit `Changed` whenever the query text changes, `Submit` on Enter
//! - Keep the cursor visible by scrolling long queries horizontally
//!
//! Unlike a chat input, submitting does not clear the buffer: the query stays
//! visible next to the results it produced.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const PLACEHOLDER: &str = "Country name";
/// Width of the `Search` button including its border.
pub const BUTTON_WIDTH: u16 = 12;
/// Indigo accent used for the button face (#504ec3).
const BUTTON_COLOR: Color = Color::Rgb(0x50, 0x4e, 0xc3);

/// High-level events emitted by the SearchBar
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// The query text changed; carries the full new text
    Changed(String),
    /// User asked to search (Enter)
    Submit,
}

pub struct SearchBar {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Whether the input has keyboard focus (Prop)
    pub focused: bool,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            focused: true,
            cursor: 0,
        }
    }

    /// Replace the buffer (e.g. from a `--query` flag) and park the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
    }

    /// Splits the search row into `[input, button]`.
    pub fn split(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)])
            .spacing(1)
            .areas(area)
    }

    fn changed(&self) -> Option<SearchEvent> {
        Some(SearchEvent::Changed(self.buffer.clone()))
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}

/// Returns `(start_byte, cursor_column)` so that the text from `start_byte`
/// shows the cursor within `width` columns.
fn visible_window(text: &str, cursor: usize, width: u16) -> (usize, u16) {
    let width = width as usize;
    if width == 0 {
        return (cursor, 0);
    }
    // Walk back from the cursor until the prefix no longer fits (one column kept for the cursor)
    let mut start = cursor;
    let mut cols = 0usize;
    for (i, c) in text[..cursor].char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if cols + w >= width {
            break;
        }
        cols += w;
        start = i;
    }
    (start, cols as u16)
}

impl Component for SearchBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [input_area, button_area] = Self::split(area);

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(input_area);

        let (start, cursor_col) = visible_window(&self.buffer, self.cursor, inner.width);
        let content = if self.buffer.is_empty() {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(&self.buffer[start..])
        };
        frame.render_widget(Paragraph::new(content).block(block), input_area);

        let button = Paragraph::new("Search")
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::White)
                    .bg(BUTTON_COLOR)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(BUTTON_COLOR)),
            );
        frame.render_widget(button, button_area);

        if self.focused && inner.width > 0 {
            frame.set_cursor_position((inner.x + cursor_col, inner.y));
        }
    }
}

impl EventHandler for SearchBar {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                // Single-line input: newlines in pasted text become spaces
                let flattened = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &flattened);
                self.cursor += flattened.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(SearchEvent::Submit),
            _ => None,
        }
    }
}
