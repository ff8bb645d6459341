//! # StatusBar Component
//!
//! Bottom line showing the current status (or the last fetch error) on the
//! left and key hints for the focused area on the right.
//!
//! Purely presentational: all data arrives as props. An error takes priority
//! over the status message so a failed fetch is never silently replaced by
//! "Loading..." text from an older state.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const SEARCH_HINTS: &str = "Enter search · Tab results · Ctrl+C quit";
pub const RESULTS_HINTS: &str = "↑/↓ select · Enter/o open map · Tab search · q quit";

pub struct StatusBar<'a> {
    pub status_message: &'a str,
    pub error: Option<&'a str>,
    pub results_focused: bool,
}

impl<'a> StatusBar<'a> {
    pub fn new(status_message: &'a str, error: Option<&'a str>, results_focused: bool) -> Self {
        Self {
            status_message,
            error,
            results_focused,
        }
    }

    fn hints(&self) -> &'static str {
        if self.results_focused {
            RESULTS_HINTS
        } else {
            SEARCH_HINTS
        }
    }
}

impl<'a> Component for StatusBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hints = self.hints();
        let hints_width = (hints.chars().count() as u16).min(area.width / 2);
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(hints_width)]).areas(area);

        let status = match self.error {
            Some(error) => Line::from(vec![
                Span::styled(
                    "Error: ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(error, Style::default().fg(Color::Red)),
            ]),
            None => Line::from(Span::styled(
                self.status_message,
                Style::default().fg(Color::Gray),
            )),
        };
        frame.render_widget(Paragraph::new(status), left);
        frame.render_widget(
            Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
            right,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(bar: &mut StatusBar) -> String {
        let backend = TestBackend::new(120, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_shows_status_message() {
        let text = render(&mut StatusBar::new("3 countries", None, false));
        assert!(text.contains("3 countries"));
        assert!(text.contains("Enter search"));
    }

    #[test]
    fn test_error_wins_over_status() {
        let text = render(&mut StatusBar::new(
            "Fetch failed",
            Some("network error: timed out"),
            false,
        ));
        assert!(text.contains("Error: network error: timed out"));
        assert!(!text.contains("Fetch failed"));
    }

    #[test]
    fn test_hints_follow_focus() {
        let text = render(&mut StatusBar::new("", None, true));
        assert!(text.contains("open map"));
        assert!(!text.contains("Enter search"));
    }
}
