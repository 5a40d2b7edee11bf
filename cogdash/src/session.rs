//! Recording session: the start/stop/reset state machine.
//!
//! A session owns the window aggregator, the animator, the event source and
//! its timers. The host drives it with [`RecordingSession::run_due`] and
//! redraws whenever [`RecordingSession::take_render_request`] says so.
//!
//! ```text
//!            start()                 tick timer
//!   Idle ─────────────▶ Running ◀──────────────┐
//!    ▲                    │  │                  │
//!    │      stop()        │  └─ record → recompute → retarget → frame
//!    └────────────────────┘                                 │
//!    reset() from either state                      frame timer (16 ms)
//! ```
//!
//! Within one tick, record, recompute and retarget run back to back before
//! the next tick is scheduled, so the animator always sees a trimmed,
//! consistent count map. `stop()` and `reset()` cancel every pending timer;
//! a tick or frame that still reaches the session while idle is dropped.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use log::{debug, trace, warn};

use crate::aggregator::WindowAggregator;
use crate::animator::{Animator, FrameOutcome};
use crate::chart::ChartInput;
use crate::clock::{Clock, MonotonicClock};
use crate::config::RecorderConfig;
use crate::domain::{CountMap, DisplayMap, Event, LabelId, SessionState, Timestamp};
use crate::scheduler::{Scheduler, Task, TimerHandle, TimerQueue};
use crate::source::{EventSource, SeededSource};

/// Session wired to the real clock and an entropy- or seed-driven source
pub type LiveSession = RecordingSession<TimerQueue<MonotonicClock>, SeededSource, MonotonicClock>;

/// Tick reports kept for a host that does not drain them; older ones are dropped
pub const TICK_REPORT_CAPACITY: usize = 64;

/// Outcome of one tick, reported to observers such as headless output
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub timestamp: Timestamp,
    pub label: Option<LabelId>,
    pub in_window: usize,
}

pub struct RecordingSession<S: Scheduler, E: EventSource, C: Clock> {
    config: RecorderConfig,
    state: SessionState,
    aggregator: WindowAggregator,
    animator: Animator,
    scheduler: S,
    source: E,
    clock: C,

    tick_timer: Option<TimerHandle>,
    frame_timer: Option<TimerHandle>,
    redraw_timer: Option<TimerHandle>,

    last_update: Option<DateTime<Local>>,
    render_pending: bool,
    total_recorded: u64,
    /// Undrained tick reports, oldest first, capped at [`TICK_REPORT_CAPACITY`]
    ticks: VecDeque<TickReport>,
}

impl<E: EventSource, C: Clock + Clone> RecordingSession<TimerQueue<C>, E, C> {
    /// Session with a [`TimerQueue`] driven by the same clock
    pub fn new(config: RecorderConfig, source: E, clock: C) -> Self {
        let scheduler = TimerQueue::new(clock.clone());
        Self::with_scheduler(config, scheduler, source, clock)
    }
}

impl<S: Scheduler, E: EventSource, C: Clock> RecordingSession<S, E, C> {
    pub fn with_scheduler(config: RecorderConfig, scheduler: S, source: E, clock: C) -> Self {
        let label_count = config.labels.len();
        Self {
            aggregator: WindowAggregator::new(config.window_secs, label_count),
            animator: Animator::new(label_count, config.animation_steps, config.epsilon),
            config,
            state: SessionState::Idle,
            scheduler,
            source,
            clock,
            tick_timer: None,
            frame_timer: None,
            redraw_timer: None,
            last_update: None,
            render_pending: false,
            total_recorded: 0,
            ticks: VecDeque::with_capacity(TICK_REPORT_CAPACITY),
        }
    }

    // =========================================================================
    // CONTROL SURFACE
    // =========================================================================

    /// Begin generating events. No-op while already running.
    pub fn start(&mut self) {
        if self.state.is_running() {
            return;
        }
        self.state = SessionState::Running;
        debug!("{}: started", self.config.title);
        self.schedule_tick();
    }

    /// Stop generating events and freeze the display where it is.
    /// No-op while idle.
    pub fn stop(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.state = SessionState::Idle;
        self.cancel_timer(Task::Tick);
        self.cancel_timer(Task::AnimationFrame);
        self.cancel_timer(Task::Redraw);
        debug!("{}: stopped with {} events in window", self.config.title, self.aggregator.len());
    }

    /// Stop and clear all recorded data, then render the empty chart.
    pub fn reset(&mut self) {
        self.stop();
        self.cancel_timer(Task::Redraw);
        self.aggregator.reset();
        self.animator.reset();
        self.last_update = None;
        self.total_recorded = 0;
        self.ticks.clear();
        self.render_pending = true;
        debug!("{}: reset", self.config.title);
    }

    /// Single start/stop button
    pub fn toggle(&mut self) {
        match self.state {
            SessionState::Idle => self.start(),
            SessionState::Running => self.stop(),
        }
    }

    /// The view became visible: draw once at the current size.
    pub fn on_show(&mut self) {
        self.render_pending = true;
    }

    /// The surface was resized. Redraws after the debounce delay; a newer
    /// resize supersedes a pending one.
    pub fn on_resize(&mut self) {
        self.cancel_timer(Task::Redraw);
        self.redraw_timer = Some(self.scheduler.schedule(self.config.resize_debounce, Task::Redraw));
    }

    // =========================================================================
    // DRIVER HOOKS
    // =========================================================================

    /// Fire every timer that is due. Returns how many fired.
    pub fn run_due(&mut self) -> usize {
        let mut fired = 0;
        while let Some(task) = self.scheduler.pop_due() {
            self.dispatch(task);
            fired += 1;
        }
        fired
    }

    /// Clock offset of the next pending timer
    #[must_use]
    pub fn next_deadline(&self) -> Option<std::time::Duration> {
        self.scheduler.next_deadline()
    }

    /// Time left until the next pending timer fires (zero if overdue)
    #[must_use]
    pub fn time_until_next(&self) -> Option<std::time::Duration> {
        let now = self.clock.now();
        self.scheduler.next_deadline().map(|deadline| deadline.saturating_sub(now))
    }

    /// True once per batch of state changes that need a redraw
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_pending)
    }

    /// Ticks completed since the last call, oldest first. Only the latest
    /// [`TICK_REPORT_CAPACITY`] are kept between calls.
    pub fn drain_ticks(&mut self) -> Vec<TickReport> {
        self.ticks.drain(..).collect()
    }

    fn dispatch(&mut self, task: Task) {
        match task {
            Task::Tick => {
                self.tick_timer = None;
                if self.state.is_running() {
                    self.tick();
                } else {
                    warn!("{}: dropping tick that fired while idle", self.config.title);
                }
            }
            Task::AnimationFrame => {
                self.frame_timer = None;
                if self.state.is_running() {
                    self.animation_frame();
                } else {
                    warn!("{}: dropping animation frame that fired while idle", self.config.title);
                }
            }
            Task::Redraw => {
                self.redraw_timer = None;
                self.render_pending = true;
            }
        }
    }

    // =========================================================================
    // PIPELINE
    // =========================================================================

    fn tick(&mut self) {
        let now = Timestamp::from_duration(self.clock.now());
        self.last_update = Some(self.clock.wall_time());

        let label = self.source.next_label(&self.config.labels);
        if let Some(label) = label {
            self.aggregator.record(Event::new(now, label));
            self.total_recorded += 1;
        }
        self.aggregator.recompute(now);
        trace!(
            "{}: tick at {now} label={:?} in_window={}",
            self.config.title,
            label.and_then(|l| self.config.labels.name(l)),
            self.aggregator.len()
        );
        if self.ticks.len() == TICK_REPORT_CAPACITY {
            self.ticks.pop_front();
        }
        self.ticks.push_back(TickReport { timestamp: now, label, in_window: self.aggregator.len() });

        self.animator.retarget(self.aggregator.counts());
        self.cancel_timer(Task::AnimationFrame);
        self.animation_frame();

        self.schedule_tick();
    }

    fn animation_frame(&mut self) {
        let outcome = self.animator.frame();
        self.render_pending = true;
        match outcome {
            FrameOutcome::Continue => {
                self.frame_timer = Some(
                    self.scheduler.schedule(self.config.frame_interval, Task::AnimationFrame),
                );
            }
            FrameOutcome::Finished => {
                trace!("{}: animation settled after {} frames", self.config.title, self.animator.step());
            }
        }
    }

    fn schedule_tick(&mut self) {
        let delay = self.source.next_interval();
        self.tick_timer = Some(self.scheduler.schedule(delay, Task::Tick));
    }

    fn cancel_timer(&mut self, task: Task) {
        let slot = match task {
            Task::Tick => &mut self.tick_timer,
            Task::AnimationFrame => &mut self.frame_timer,
            Task::Redraw => &mut self.redraw_timer,
        };
        if let Some(handle) = slot.take() {
            self.scheduler.cancel(handle);
        }
    }

    // =========================================================================
    // READ ACCESS
    // =========================================================================

    /// Immutable render inputs for the chart
    #[must_use]
    pub fn chart_input(&self) -> ChartInput<'_> {
        ChartInput {
            labels: &self.config.labels,
            display: self.animator.display(),
            counts: self.aggregator.counts(),
            last_update: self.last_update,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    #[must_use]
    pub fn counts(&self) -> &CountMap {
        self.aggregator.counts()
    }

    #[must_use]
    pub fn display(&self) -> &DisplayMap {
        self.animator.display()
    }

    #[must_use]
    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    #[must_use]
    pub fn events_in_window(&self) -> usize {
        self.aggregator.len()
    }

    /// Events recorded since construction or the last reset
    #[must_use]
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    /// Number of timers still pending
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Tick reports waiting for [`RecordingSession::drain_ticks`]
    #[must_use]
    pub fn undrained_ticks(&self) -> usize {
        self.ticks.len()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.frame_timer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::source::ScriptedSource;
    use std::time::Duration;

    type TestSession = RecordingSession<TimerQueue<ManualClock>, ScriptedSource, ManualClock>;

    fn session(script: &[usize]) -> (TestSession, ManualClock) {
        let clock = ManualClock::new();
        let source = ScriptedSource::cycle(Duration::from_millis(500), script);
        (RecordingSession::new(RecorderConfig::default(), source, clock.clone()), clock)
    }

    fn advance(session: &mut TestSession, clock: &ManualClock, ms: u64) {
        for _ in 0..ms {
            clock.advance(Duration::from_millis(1));
            session.run_due();
        }
    }

    #[test]
    fn test_starts_idle_with_nothing_pending() {
        let (session, _) = session(&[0]);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.pending_timers(), 0);
        assert_eq!(session.counts().as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_double_start_schedules_one_tick() {
        let (mut session, _) = session(&[0]);
        session.start();
        session.start();
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.pending_timers(), 1);
    }

    #[test]
    fn test_tick_records_and_renders() {
        let (mut session, clock) = session(&[2]);
        session.start();
        advance(&mut session, &clock, 499);
        assert_eq!(session.counts().total(), 0);

        advance(&mut session, &clock, 1);
        assert_eq!(session.counts().as_slice(), &[0, 0, 1, 0]);
        assert!(session.last_update().is_some());
        assert!(session.is_animating());
        assert!(session.take_render_request());
        assert!(!session.take_render_request());
    }

    #[test]
    fn test_double_stop_is_noop() {
        let (mut session, _) = session(&[0]);
        session.stop();
        assert_eq!(session.state(), SessionState::Idle);
        session.start();
        session.stop();
        session.stop();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.pending_timers(), 0);
    }

    #[test]
    fn test_toggle_flips_state() {
        let (mut session, _) = session(&[0]);
        session.toggle();
        assert_eq!(session.state().button_label(), "Stop");
        session.toggle();
        assert_eq!(session.state().button_label(), "Start");
    }

    #[test]
    fn test_resize_is_debounced() {
        let (mut session, clock) = session(&[0]);
        session.on_resize();
        advance(&mut session, &clock, 20);
        session.on_resize();
        advance(&mut session, &clock, 20);
        assert!(!session.take_render_request());
        assert_eq!(session.pending_timers(), 1);

        advance(&mut session, &clock, 10);
        assert!(session.take_render_request());
        assert_eq!(session.pending_timers(), 0);
    }

    #[test]
    fn test_on_show_requests_render() {
        let (mut session, _) = session(&[0]);
        assert!(!session.take_render_request());
        session.on_show();
        assert!(session.take_render_request());
    }
}
