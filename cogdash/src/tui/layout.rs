//! Responsive layout for the dashboard.
//!
//! The chart always gets the space that is left; the chrome around it
//! shrinks as the terminal does.

// Height breakpoints
const HEIGHT_MINIMAL: u16 = 12; // Below this: chart only
const HEIGHT_COMPACT: u16 = 20; // Below this: single-line header, no border

// Width breakpoint
const WIDTH_NARROW: u16 = 60; // Below this: drop the header counters

/// Terminal size classification for layout decisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminalSize {
    /// Height < 12: chart only
    Minimal,
    /// Height 12-20: borderless single-line header and status bar
    Compact,
    /// Height > 20: full chrome
    Normal,
}

#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub size: TerminalSize,

    /// Rows used by the header (0 = hidden)
    pub header_rows: u16,

    /// Rows used by the key-hint bar (0 = hidden)
    pub status_rows: u16,

    /// Show window/total counters in the header
    pub show_counters: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { size: TerminalSize::Normal, header_rows: 3, status_rows: 3, show_counters: true }
    }
}

/// Compute layout configuration based on terminal dimensions.
///
/// | Terminal Size | Behavior |
/// |---------------|----------|
/// | Width < 60    | Header without counters |
/// | Height < 12   | Chart only |
/// | Height 12-20  | One-line header and status bar |
/// | Height > 20   | Full layout |
pub fn compute_layout(width: u16, height: u16) -> LayoutConfig {
    let mut config = LayoutConfig::default();

    if width < WIDTH_NARROW {
        config.show_counters = false;
    }

    if height < HEIGHT_MINIMAL {
        config.size = TerminalSize::Minimal;
        config.header_rows = 0;
        config.status_rows = 0;
    } else if height <= HEIGHT_COMPACT {
        config.size = TerminalSize::Compact;
        config.header_rows = 1;
        config.status_rows = 1;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_layout() {
        let config = compute_layout(120, 40);
        assert_eq!(config.size, TerminalSize::Normal);
        assert_eq!(config.header_rows, 3);
        assert_eq!(config.status_rows, 3);
        assert!(config.show_counters);
    }

    #[test]
    fn test_compact_height() {
        let config = compute_layout(120, 16);
        assert_eq!(config.size, TerminalSize::Compact);
        assert_eq!(config.header_rows, 1);
        assert_eq!(config.status_rows, 1);
    }

    #[test]
    fn test_minimal_height() {
        let config = compute_layout(120, 8);
        assert_eq!(config.size, TerminalSize::Minimal);
        assert_eq!(config.header_rows + config.status_rows, 0);
    }

    #[test]
    fn test_narrow_width_hides_counters() {
        let config = compute_layout(50, 40);
        assert!(!config.show_counters);
        assert_eq!(config.size, TerminalSize::Normal);
    }
}
