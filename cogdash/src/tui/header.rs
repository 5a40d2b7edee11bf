//! Header bar: view title, start/stop button state, counters, link status.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ RECORD › COGNITIVE  [ Stop ]  14 in window · 52 total   ● Connected │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::layout::{LayoutConfig, TerminalSize};
use super::theme::{CARD_BORDER, CONNECTED_GREEN, NAVY, START_GREEN, STOP_RED, TEXT_DIM};
use crate::domain::SessionState;

pub struct HeaderBar<'a> {
    pub title: &'a str,
    pub state: SessionState,
    pub in_window: usize,
    pub total: u64,
    pub last_label: Option<&'a str>,
}

impl HeaderBar<'_> {
    /// Styled caption of the start/stop button
    #[must_use]
    pub fn button(state: SessionState) -> Span<'static> {
        let bg = match state {
            SessionState::Idle => START_GREEN,
            SessionState::Running => STOP_RED,
        };
        Span::styled(
            format!(" {} ", state.button_label()),
            Style::new().bg(bg).fg(Color::White).add_modifier(Modifier::BOLD),
        )
    }

    pub fn render(&self, f: &mut Frame, area: Rect, config: &LayoutConfig) {
        let mut left = vec![
            Span::styled("RECORD › ", Style::new().fg(TEXT_DIM)),
            Span::styled(self.title.to_string(), Style::new().fg(NAVY).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Self::button(self.state),
        ];

        if config.show_counters {
            left.push(Span::styled(
                format!("  {} in window · {} total", self.in_window, self.total),
                Style::new().fg(TEXT_DIM),
            ));
            if let Some(label) = self.last_label {
                left.push(Span::styled(format!(" · last {label}"), Style::new().fg(TEXT_DIM)));
            }
        }

        let right = Line::from(vec![
            Span::styled("● ", Style::new().fg(CONNECTED_GREEN)),
            Span::styled("Connected", Style::new().fg(NAVY).add_modifier(Modifier::BOLD)),
        ]);

        let inner = if config.size == TerminalSize::Normal {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::new().fg(CARD_BORDER));
            let inner = block.inner(area);
            f.render_widget(block, area);
            inner
        } else {
            area
        };

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(13)])
            .split(inner);

        f.render_widget(Paragraph::new(Line::from(left)), cols[0]);
        f.render_widget(Paragraph::new(right).alignment(Alignment::Right), cols[1]);
    }
}
