//! # Placeholder Card
//!
//! Skeleton shown in place of country cards while a fetch is in flight.
//!
//! Same outer frame and height as `CountryCard`: a flag-sized block followed
//! by six bars (name, capital, region, population, area, map link). A lighter
//! band sweeps left to right across every block, looping with the animation
//! frame. The band position depends only on `frame_index`, so all placeholders
//! on screen shimmer in step.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Widget};

use super::country_card::{DETAIL_ROWS, FLAG_HEIGHT};

/// Bar widths as a percentage of the inner card width, top to bottom.
pub const LINE_WIDTHS: [u16; DETAIL_ROWS as usize] = [80, 60, 50, 70, 40, 30];

/// Half-width of the highlight band, in columns.
const BAND_HALF_WIDTH: f32 = 6.0;
/// Columns the band advances per animation frame.
const BAND_SPEED: f32 = 3.0;

const BASE: (u8, u8, u8) = (58, 58, 64);
const HIGHLIGHT: (u8, u8, u8) = (120, 120, 130);

/// Highlight strength (0.0..=1.0) of column `x` at `frame_index`, for a sweep
/// spanning `span` columns. The band enters from the left edge and fully
/// leaves the right one before wrapping.
pub fn shimmer_level(x: u16, span: u16, frame_index: usize) -> f32 {
    let period = span as f32 + 2.0 * BAND_HALF_WIDTH;
    if period <= 0.0 {
        return 0.0;
    }
    let center = (frame_index as f32 * BAND_SPEED) % period - BAND_HALF_WIDTH;
    let distance = (x as f32 - center).abs();
    (1.0 - distance / BAND_HALF_WIDTH).max(0.0)
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

pub fn shimmer_color(level: f32) -> Color {
    let t = level.clamp(0.0, 1.0);
    Color::Rgb(
        lerp(BASE.0, HIGHLIGHT.0, t),
        lerp(BASE.1, HIGHLIGHT.1, t),
        lerp(BASE.2, HIGHLIGHT.2, t),
    )
}

/// Width in columns of a bar that is `percent` of `inner_width` (at least 1).
pub fn bar_width(inner_width: u16, percent: u16) -> u16 {
    ((inner_width as u32 * percent as u32) / 100).max(1) as u16
}

#[derive(Clone, Copy)]
pub struct PlaceholderCard {
    pub frame_index: usize,
}

impl PlaceholderCard {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }

    /// Paints `area` as a shimmer block; `origin_x` anchors the sweep to the card.
    fn fill(&self, area: Rect, origin_x: u16, span: u16, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let level = shimmer_level(x - origin_x, span, self.frame_index);
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(" ").set_bg(shimmer_color(level));
                }
            }
        }
    }
}

impl Widget for PlaceholderCard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let span = inner.width;
        let flag = Rect {
            height: FLAG_HEIGHT.min(inner.height),
            ..inner
        };
        self.fill(flag, inner.x, span, buf);

        // One row per detail line, leaving the padding column like CountryCard
        let text_x = inner.x + 1;
        let text_width = inner.width.saturating_sub(1);
        for (row, percent) in LINE_WIDTHS.iter().enumerate() {
            let y = flag.bottom() + row as u16;
            if y >= inner.bottom() || text_width == 0 {
                break;
            }
            let line = Rect::new(text_x, y, bar_width(text_width, *percent), 1);
            self.fill(line, inner.x, span, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::country_card::CARD_HEIGHT;

    #[test]
    fn test_line_widths_descend_and_vary() {
        assert_eq!(LINE_WIDTHS.len(), 6);
        assert_eq!(LINE_WIDTHS, [80, 60, 50, 70, 40, 30]);
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(50, 80), 40);
        assert_eq!(bar_width(50, 30), 15);
        assert_eq!(bar_width(1, 30), 1);
    }

    #[test]
    fn test_shimmer_peaks_at_band_center() {
        // Frame 2: center = 6.0 - 6.0 = 0
        assert_eq!(shimmer_level(0, 40, 2), 1.0);
        assert_eq!(shimmer_level(30, 40, 2), 0.0);
    }

    #[test]
    fn test_shimmer_moves_right_over_time() {
        let early = shimmer_level(20, 40, 2);
        let later = shimmer_level(20, 40, 8);
        assert!(later > early);
    }

    #[test]
    fn test_shimmer_loops() {
        // A 52-column period at 3 columns per frame repeats every 52 frames
        let frames_per_three_periods = 52;
        for x in [0, 10, 39] {
            assert_eq!(
                shimmer_level(x, 40, 5),
                shimmer_level(x, 40, 5 + frames_per_three_periods)
            );
        }
    }

    #[test]
    fn test_shimmer_color_endpoints() {
        assert_eq!(shimmer_color(0.0), Color::Rgb(BASE.0, BASE.1, BASE.2));
        assert_eq!(shimmer_color(1.0), Color::Rgb(HIGHLIGHT.0, HIGHLIGHT.1, HIGHLIGHT.2));
    }

    #[test]
    fn test_renders_flag_block_and_six_bars() {
        let area = Rect::new(0, 0, 42, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        PlaceholderCard::new(0).render(area, &mut buf);

        let painted = |x: u16, y: u16| buf[(x, y)].bg != Color::Reset;

        // Flag block spans the full inner width
        for y in 1..=FLAG_HEIGHT {
            assert!(painted(1, y));
            assert!(painted(40, y));
        }

        // Inner width 40, bar area 39 columns starting at x = 2
        let first_bar_row = 1 + FLAG_HEIGHT;
        for (row, percent) in LINE_WIDTHS.iter().enumerate() {
            let y = first_bar_row + row as u16;
            let width = bar_width(39, *percent);
            assert!(painted(2, y), "row {row} should start painted");
            assert!(painted(2 + width - 1, y));
            assert!(!painted(2 + width, y), "row {row} should stop at {percent}%");
        }
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        PlaceholderCard::new(3).render(area, &mut buf);
    }
}
