//! # Terminal User Interface (TUI)
//!
//! Interactive dashboard using `ratatui` hosting the two recorder views.
//!
//! ## Screen
//!
//! - **Header** - view title, Start/Stop button state, counters, link status
//! - **Chart card** - animated bar chart of the active session
//! - **Status bar** - key hints and the active view
//!
//! ## Views
//!
//! Record Cognitive and Record Creative each own a [`RecordingSession`].
//! Both keep running while hidden; only the visible one is drawn. Switching
//! views sends the show notification, which draws the chart at once.
//!
//! ## Sub-Modules
//!
//! - `chart` - Chart card widget (layout rasterised into cells)
//! - `header` - Header bar
//! - `layout` - Size breakpoints
//! - `theme` - Color scheme

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

pub mod chart;
mod header;
pub mod layout;
mod theme;

use chart::ChartWidget;
use header::HeaderBar;
use layout::{compute_layout, TerminalSize};
use theme::{CARD_BORDER, KEY_AMBER, NAVY, TEXT_DIM};

use crate::clock::Clock;
use crate::config::View;
use crate::domain::{LabelId, TuiError};
use crate::scheduler::Scheduler;
use crate::session::RecordingSession;
use crate::source::EventSource;

// =============================================================================
// STYLE CONSTANTS
// =============================================================================

const STYLE_HEADING: Style = Style::new().fg(NAVY).add_modifier(Modifier::BOLD);
const STYLE_DIM: Style = Style::new().fg(TEXT_DIM);
const STYLE_KEY: Style = Style::new().fg(KEY_AMBER).add_modifier(Modifier::BOLD);

/// Upper bound on how long the loop sleeps waiting for input
const IDLE_POLL: Duration = Duration::from_millis(100);

// =============================================================================
// VIEW MODES
// =============================================================================

/// Current view mode determines what's displayed and how keys are handled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewMode {
    /// Chart of the active recorder
    Main,
    /// Help overlay with keyboard shortcuts
    Help,
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// Both recorder views plus the UI state around them
pub struct Dashboard<S: Scheduler, E: EventSource, C: Clock> {
    cognitive: RecordingSession<S, E, C>,
    creative: RecordingSession<S, E, C>,
    active: View,
    view_mode: ViewMode,
    should_quit: bool,
    /// UI-only changes (mode, button caption) that need a redraw
    ui_dirty: bool,
    /// Label of the latest event per view, indexed like `slot()`
    last_labels: [Option<LabelId>; 2],
}

fn slot(view: View) -> usize {
    match view {
        View::Cognitive => 0,
        View::Creative => 1,
    }
}

impl<S: Scheduler, E: EventSource, C: Clock> Dashboard<S, E, C> {
    pub fn new(
        cognitive: RecordingSession<S, E, C>,
        creative: RecordingSession<S, E, C>,
        active: View,
    ) -> Self {
        let mut dashboard = Self {
            cognitive,
            creative,
            active,
            view_mode: ViewMode::Main,
            should_quit: false,
            ui_dirty: true,
            last_labels: [None, None],
        };
        dashboard.active_session_mut().on_show();
        dashboard
    }

    #[must_use]
    pub fn session(&self, view: View) -> &RecordingSession<S, E, C> {
        match view {
            View::Cognitive => &self.cognitive,
            View::Creative => &self.creative,
        }
    }

    pub fn session_mut(&mut self, view: View) -> &mut RecordingSession<S, E, C> {
        match view {
            View::Cognitive => &mut self.cognitive,
            View::Creative => &mut self.creative,
        }
    }

    #[must_use]
    pub fn active_session(&self) -> &RecordingSession<S, E, C> {
        self.session(self.active)
    }

    pub fn active_session_mut(&mut self) -> &mut RecordingSession<S, E, C> {
        self.session_mut(self.active)
    }

    #[must_use]
    pub fn active_view(&self) -> View {
        self.active
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Show the other recorder
    pub fn switch_view(&mut self) {
        self.active = self.active.next();
        self.active_session_mut().on_show();
    }

    /// Terminal resized: debounce a redraw of the visible chart
    pub fn on_resize(&mut self) {
        self.active_session_mut().on_resize();
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) {
        self.ui_dirty = true;
        match self.view_mode {
            ViewMode::Main => match key {
                KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char(' ') | KeyCode::Enter => self.active_session_mut().toggle(),
                KeyCode::Char('r' | 'R') => self.active_session_mut().reset(),
                KeyCode::Tab | KeyCode::BackTab => self.switch_view(),
                KeyCode::Char('?') => self.view_mode = ViewMode::Help,
                _ => {}
            },
            // Any key closes help
            ViewMode::Help => self.view_mode = ViewMode::Main,
        }
    }

    /// Fire due timers in both sessions. Returns true when the screen needs
    /// to be redrawn.
    pub fn pump(&mut self) -> bool {
        let active = self.active;
        let mut redraw = false;

        for view in [View::Cognitive, View::Creative] {
            let session = self.session_mut(view);
            session.run_due();
            let last = session.drain_ticks().into_iter().rev().find_map(|t| t.label);
            let wants_render = session.take_render_request();

            if let Some(label) = last {
                self.last_labels[slot(view)] = Some(label);
            }
            // Hidden views redraw on show, not on their own timers
            if view == active {
                redraw |= wants_render;
            }
        }

        // A reset clears the "last label" too
        if self.active_session().total_recorded() == 0 {
            self.last_labels[slot(active)] = None;
        }

        redraw | std::mem::take(&mut self.ui_dirty)
    }

    /// How long the host may sleep before a timer in either session is due
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        [self.cognitive.time_until_next(), self.creative.time_until_next()]
            .into_iter()
            .flatten()
            .min()
    }

    fn last_label_name(&self) -> Option<&str> {
        let session = self.active_session();
        self.last_labels[slot(self.active)].and_then(|id| session.config().labels.name(id))
    }
}

// =============================================================================
// RENDERING
// =============================================================================

/// Draw the whole screen for the current dashboard state
pub fn draw<S: Scheduler, E: EventSource, C: Clock>(f: &mut Frame, dashboard: &Dashboard<S, E, C>) {
    let area = f.area();
    let config = compute_layout(area.width, area.height);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(config.header_rows),
            Constraint::Min(0),
            Constraint::Length(config.status_rows),
        ])
        .split(area);

    let session = dashboard.active_session();

    if config.header_rows > 0 {
        let header = HeaderBar {
            title: &session.config().title,
            state: session.state(),
            in_window: session.events_in_window(),
            total: session.total_recorded(),
            last_label: dashboard.last_label_name(),
        };
        header.render(f, rows[0], &config);
    }

    let chart_area = if config.size == TerminalSize::Minimal {
        rows[1]
    } else {
        let card = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(CARD_BORDER))
            .title(Span::styled(
                format!(" {} · {}s window ", session.config().title, session.config().window_secs),
                STYLE_HEADING,
            ));
        let inner = card.inner(rows[1]);
        f.render_widget(card, rows[1]);
        inner
    };
    f.render_widget(ChartWidget::new(session.chart_input()), chart_area);

    if config.status_rows > 0 {
        render_status_bar(f, rows[2], dashboard, config.size == TerminalSize::Normal);
    }

    if dashboard.view_mode() == ViewMode::Help {
        render_help_overlay(f, area);
    }
}

fn render_status_bar<S: Scheduler, E: EventSource, C: Clock>(
    f: &mut Frame,
    area: Rect,
    dashboard: &Dashboard<S, E, C>,
    bordered: bool,
) {
    let state = dashboard.active_session().state();
    let status_line = Line::from(vec![
        Span::styled("Space", STYLE_KEY),
        Span::styled(format!(":{} ", state.button_label()), STYLE_DIM),
        Span::styled("R", STYLE_KEY),
        Span::styled(":Reset ", STYLE_DIM),
        Span::styled("Tab", STYLE_KEY),
        Span::styled(format!(":{} ", view_name(dashboard.active_view().next())), STYLE_DIM),
        Span::styled("?", STYLE_KEY),
        Span::styled(":Help ", STYLE_DIM),
        Span::styled("Q", STYLE_KEY),
        Span::styled(":Quit ", STYLE_DIM),
        Span::styled(format!("[{}]", view_name(dashboard.active_view())), STYLE_HEADING),
    ]);

    let mut paragraph = Paragraph::new(vec![status_line]);
    if bordered {
        paragraph = paragraph
            .block(Block::default().borders(Borders::ALL).border_style(Style::new().fg(CARD_BORDER)));
    }
    f.render_widget(paragraph, area);
}

fn view_name(view: View) -> &'static str {
    match view {
        View::Cognitive => "Record Cognitive",
        View::Creative => "Record Creative",
    }
}

/// Render the help overlay with keyboard shortcuts
fn render_help_overlay(f: &mut Frame, area: Rect) {
    let popup_area = centered_popup(area, 60, 16);

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("  What You're Looking At", STYLE_HEADING)),
        Line::from(Span::styled("  Events per label over the last 60 seconds.", STYLE_DIM)),
        Line::from(Span::styled("  Bars glide to new counts; the number is exact.", STYLE_DIM)),
        Line::from(""),
        Line::from(Span::styled("  Keys", STYLE_HEADING)),
        Line::from(vec![
            Span::styled("  Space", STYLE_KEY),
            Span::styled(" Start/Stop   ", STYLE_DIM),
            Span::styled("R", STYLE_KEY),
            Span::styled(" Reset   ", STYLE_DIM),
            Span::styled("Tab", STYLE_KEY),
            Span::styled(" Switch view", STYLE_DIM),
        ]),
        Line::from(vec![
            Span::styled("  ?", STYLE_KEY),
            Span::styled(" Help   ", STYLE_DIM),
            Span::styled("Q", STYLE_KEY),
            Span::styled(" Quit", STYLE_DIM),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Press any key to close", STYLE_DIM)),
    ];

    let help_widget = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::new().bg(ratatui::style::Color::White).fg(NAVY)),
    );

    f.render_widget(ratatui::widgets::Clear, popup_area);
    f.render_widget(help_widget, popup_area);
}

/// Create a centered popup area with given width percentage and height in lines
fn centered_popup(area: Rect, width_percent: u16, height_lines: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(height_lines), Constraint::Fill(1)])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}

// =============================================================================
// LIVE ENTRY POINT
// =============================================================================

/// Run the dashboard until the user quits.
///
/// 1. Sets up the terminal in raw mode
/// 2. Fires due timers, redrawing only when something changed
/// 3. Sleeps in `event::poll` until the next timer or key press
/// 4. Restores the terminal, also when the loop fails
///
/// # Errors
/// Returns an error if terminal setup or rendering fails
pub fn run_live<S: Scheduler, E: EventSource, C: Clock>(
    mut dashboard: Dashboard<S, E, C>,
) -> Result<(), TuiError> {
    enable_raw_mode().map_err(|e| TuiError::TerminalSetup(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut dashboard);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend, S: Scheduler, E: EventSource, C: Clock>(
    terminal: &mut Terminal<B>,
    dashboard: &mut Dashboard<S, E, C>,
) -> Result<(), TuiError> {
    loop {
        if dashboard.pump() {
            terminal
                .draw(|f| draw(f, dashboard))
                .map_err(|e| TuiError::DrawFailed(e.to_string()))?;
        }

        let timeout = dashboard.time_until_next().map_or(IDLE_POLL, |t| t.min(IDLE_POLL));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => dashboard.handle_key(key.code),
                Event::Resize(_, _) => dashboard.on_resize(),
                _ => {}
            }
        }

        if dashboard.should_quit() {
            return Ok(());
        }
    }
}
