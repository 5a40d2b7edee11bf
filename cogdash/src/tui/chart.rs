//! Chart card widget.
//!
//! Maps the terminal area to a pixel surface (one cell = 8 × 16 px), lays
//! the chart out with [`layout_chart`] and rasterises the result:
//!
//! - gridlines become `─` runs across the plot
//! - bars become full blocks, with an eighth-block cap so sub-cell heights
//!   (and therefore every animation frame) stay visible
//! - the count sits on the row above each bar, the label under the baseline

// Pixel → cell conversions are bounded by the area size
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::theme::{bar_color, GRID, LABEL_GRAY, NAVY, TEXT_DIM};
use crate::chart::{layout_chart, BarLayout, ChartInput, ChartLayout};

pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Lower-eighth blocks, index = filled eighths
const EIGHTHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

const STYLE_HEADER: Style = Style::new().fg(TEXT_DIM).add_modifier(Modifier::BOLD);
const STYLE_GRID: Style = Style::new().fg(GRID);
const STYLE_COUNT: Style = Style::new().fg(NAVY).add_modifier(Modifier::BOLD);
const STYLE_LABEL: Style = Style::new().fg(LABEL_GRAY);

/// Bar chart for one recording session
pub struct ChartWidget<'a> {
    input: ChartInput<'a>,
}

impl<'a> ChartWidget<'a> {
    #[must_use]
    pub fn new(input: ChartInput<'a>) -> Self {
        Self { input }
    }

    /// Pixel surface equivalent of a terminal area
    #[must_use]
    pub fn surface_size(area: Rect) -> (f64, f64) {
        (f64::from(area.width) * CELL_WIDTH_PX, f64::from(area.height) * CELL_HEIGHT_PX)
    }
}

impl Widget for ChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = Self::surface_size(area);
        let layout = layout_chart(&self.input, width, height);
        paint(&layout, area, buf);
    }
}

/// Rasterise a computed layout into `area`. Anything outside is clipped.
pub fn paint(layout: &ChartLayout, area: Rect, buf: &mut Buffer) {
    let mut canvas = Canvas { area, buf };

    let grid_from = col_of(layout.plot.x0);
    let grid_to = col_of(layout.plot.x1);
    for &y in &layout.gridlines {
        let row = row_of(y);
        for col in grid_from..grid_to {
            canvas.set(col, row, '─', STYLE_GRID);
        }
    }

    for bar in &layout.bars {
        paint_bar(&mut canvas, bar);
    }

    let (hx, hy) = layout.header_anchor;
    canvas.text(col_of(hx), row_of(hy), &layout.header, STYLE_HEADER);
}

fn paint_bar(canvas: &mut Canvas<'_>, bar: &BarLayout) {
    let style = Style::new().fg(bar_color(bar.color));
    let first_col = col_of(bar.rect.x0);
    let last_col = if bar.rect.width() > 0.0 { col_of(bar.rect.x1).max(first_col + 1) } else { first_col };

    // Bars stand on the row above the baseline gridline
    let baseline = row_of(bar.rect.y1);
    let rows = bar.rect.height() / CELL_HEIGHT_PX;
    let full = rows.floor() as i32;
    let eighths = ((rows - rows.floor()) * 8.0).round() as usize;

    let mut top = baseline;
    for offset in 1..=full {
        top = baseline - offset;
        for col in first_col..last_col {
            canvas.set(col, top, EIGHTHS[8], style);
        }
    }
    if eighths > 0 && first_col < last_col {
        top = baseline - full - 1;
        for col in first_col..last_col {
            canvas.set(col, top, EIGHTHS[eighths.min(8)], style);
        }
    }

    let center = col_of(bar.rect.center_x());
    let count_row = row_of(bar.value_anchor.1).min(top - 1);
    canvas.centered_text(center, count_row, &bar.count.to_string(), STYLE_COUNT);
    canvas.centered_text(center, row_of(bar.label_anchor.1), &bar.label, STYLE_LABEL);
}

fn col_of(px: f64) -> i32 {
    (px / CELL_WIDTH_PX).floor() as i32
}

fn row_of(py: f64) -> i32 {
    (py / CELL_HEIGHT_PX).floor() as i32
}

/// Area-relative, clipping writer over a buffer
struct Canvas<'b> {
    area: Rect,
    buf: &'b mut Buffer,
}

impl Canvas<'_> {
    fn set(&mut self, col: i32, row: i32, ch: char, style: Style) {
        if col < 0 || row < 0 || col >= i32::from(self.area.width) || row >= i32::from(self.area.height) {
            return;
        }
        let x = self.area.x + col as u16;
        let y = self.area.y + row as u16;
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(ch).set_style(style);
        }
    }

    fn text(&mut self, col: i32, row: i32, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            self.set(col + i as i32, row, ch, style);
        }
    }

    fn centered_text(&mut self, center: i32, row: i32, text: &str, style: Style) {
        let half = text.chars().count() as i32 / 2;
        self.text(center - half, row, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_size() {
        assert_eq!(ChartWidget::surface_size(Rect::new(0, 0, 120, 40)), (960.0, 640.0));
        assert_eq!(ChartWidget::surface_size(Rect::new(3, 4, 0, 0)), (0.0, 0.0));
    }

    #[test]
    fn test_pixel_to_cell() {
        assert_eq!(col_of(60.0), 7);
        assert_eq!(col_of(-1.0), -1);
        assert_eq!(row_of(20.0), 1);
        assert_eq!(row_of(570.0), 35);
    }
}
