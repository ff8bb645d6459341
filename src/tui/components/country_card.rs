use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};

use crate::api::CountryRecord;

/// Rows taken by the flag block at the top of a card.
pub const FLAG_HEIGHT: u16 = 3;
/// Text rows under the flag: name, capital, region, population, area, location.
pub const DETAIL_ROWS: u16 = 6;
/// Total card height including the top and bottom border.
pub const CARD_HEIGHT: u16 = 2 + FLAG_HEIGHT + DETAIL_ROWS;
/// Blank rows between consecutive cards.
pub const CARD_GAP: u16 = 1;
/// Vertical distance from one card's top edge to the next.
pub const CARD_STRIDE: u16 = CARD_HEIGHT + CARD_GAP;
/// Row of the `Location` link, relative to the card's top edge.
pub const LOCATION_ROW: u16 = 1 + FLAG_HEIGHT + DETAIL_ROWS - 1;
/// Cards stop growing past this width on wide terminals.
pub const MAX_CARD_WIDTH: u16 = 64;

pub const LOCATION_LABEL: &str = "Location";

const FLAG_BG: Color = Color::Rgb(48, 48, 56);

fn heading_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::UNDERLINED)
}

/// A stateless card showing one country's facts.
///
/// Created fresh each frame by `ResultsList`. The flag image itself cannot be
/// drawn in a terminal, so the flag block shows the Unicode flag (when the API
/// provides one) above the image URI.
#[derive(Clone, Copy)]
pub struct CountryCard<'a> {
    pub record: &'a CountryRecord,
    pub is_selected: bool,
}

impl<'a> CountryCard<'a> {
    pub fn new(record: &'a CountryRecord, is_selected: bool) -> Self {
        Self {
            record,
            is_selected,
        }
    }

    fn labelled(label: &'static str, value: String) -> Line<'static> {
        Line::from(vec![Span::styled(label, heading_style()), Span::raw(value)])
    }

    fn render_flag(&self, area: Rect, buf: &mut Buffer) {
        let emoji = self.record.flag_emoji.as_deref().unwrap_or("⚑");
        let lines = vec![
            Line::default(),
            Line::from(emoji),
            Line::from(Span::styled(
                self.record.flag.as_str(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(FLAG_BG))
            .render(area, buf);
    }
}

impl<'a> Widget for CountryCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let flag_area = Rect {
            height: FLAG_HEIGHT.min(inner.height),
            ..inner
        };
        self.render_flag(flag_area, buf);

        let details_area = Rect {
            y: inner.y + flag_area.height,
            height: inner.height.saturating_sub(flag_area.height),
            ..inner
        };
        let record = self.record;
        let details = vec![
            Line::from(Span::styled(
                record.name.as_str(),
                heading_style().fg(Color::White),
            )),
            Self::labelled("Capital: ", record.capital.clone()),
            Self::labelled("Region: ", record.region.clone()),
            Self::labelled("Population: ", record.population_label()),
            Self::labelled("Area: ", record.area_label()),
            Line::from(Span::styled(LOCATION_LABEL, link_style())),
        ];
        Paragraph::new(details).render(
            Rect {
                x: details_area.x + 1,
                width: details_area.width.saturating_sub(1),
                ..details_area
            },
            buf,
        );
    }
}
