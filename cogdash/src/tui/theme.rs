//! TUI color theme
//!
//! Light dashboard palette: navy text, soft grid, four bar colours.

use ratatui::style::Color;

pub const NAVY: Color = Color::Rgb(26, 26, 64);
pub const TEXT_DIM: Color = Color::Rgb(107, 114, 128);
pub const LABEL_GRAY: Color = Color::Rgb(85, 85, 85);
pub const GRID: Color = Color::Rgb(120, 120, 120);
pub const CARD_BORDER: Color = Color::Rgb(224, 224, 224);

/// Start button / "Connected" dot
pub const START_GREEN: Color = Color::Rgb(40, 199, 111);
pub const CONNECTED_GREEN: Color = Color::Rgb(54, 255, 91);
/// Stop button
pub const STOP_RED: Color = Color::Rgb(255, 76, 76);
pub const KEY_AMBER: Color = Color::Rgb(255, 176, 74);

/// Bar colours, cycled by label index
pub const BAR_PALETTE: [Color; 4] = [
    Color::Rgb(123, 124, 255),
    Color::Rgb(255, 139, 139),
    Color::Rgb(54, 197, 224),
    Color::Rgb(255, 176, 74),
];

#[must_use]
pub fn bar_color(index: usize) -> Color {
    BAR_PALETTE[index % BAR_PALETTE.len()]
}
