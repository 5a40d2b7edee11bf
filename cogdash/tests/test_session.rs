use std::time::Duration;

use cogdash::aggregator::WindowAggregator;
use cogdash::chart::layout_chart;
use cogdash::clock::{Clock, ManualClock};
use cogdash::config::RecorderConfig;
use cogdash::domain::{Event, LabelId, LabelSet, SessionState, Timestamp};
use cogdash::scheduler::{Scheduler, Task, TimerHandle, TimerQueue};
use cogdash::session::{RecordingSession, TICK_REPORT_CAPACITY};
use cogdash::source::ScriptedSource;

const TICK: Duration = Duration::from_millis(400);
const FRAME: Duration = Duration::from_millis(16);

type ManualSession = RecordingSession<TimerQueue<ManualClock>, ScriptedSource, ManualClock>;

fn session_with(labels: &[usize]) -> (ManualSession, ManualClock) {
    let clock = ManualClock::new();
    let source = ScriptedSource::cycle(TICK, labels);
    (RecordingSession::new(RecorderConfig::default(), source, clock.clone()), clock)
}

/// Advance in 1 ms steps, firing timers as they come due
fn advance<S: Scheduler>(
    session: &mut RecordingSession<S, ScriptedSource, ManualClock>,
    clock: &ManualClock,
    by: Duration,
) {
    for _ in 0..by.as_millis() {
        clock.advance(Duration::from_millis(1));
        session.run_due();
    }
}

#[test]
fn test_event_leaves_window_after_61_seconds() {
    let mut aggregator = WindowAggregator::new(60.0, 4);

    aggregator.record(Event::new(Timestamp(0.0), LabelId(0)));
    aggregator.recompute(Timestamp(0.0));
    assert_eq!(aggregator.counts().as_slice(), &[1, 0, 0, 0]);

    aggregator.record(Event::new(Timestamp(61.0), LabelId(1)));
    aggregator.recompute(Timestamp(61.0));
    assert_eq!(aggregator.counts().as_slice(), &[0, 1, 0, 0]);
    assert_eq!(aggregator.len(), 1);
}

#[test]
fn test_running_session_counts_only_the_last_minute() {
    let (mut session, clock) = session_with(&[0, 1, 2, 3]);
    session.start();

    // 250 ticks at 400 ms = 100 s of recording
    advance(&mut session, &clock, Duration::from_secs(100));
    assert_eq!(session.total_recorded(), 250);

    // Window [40 s, 100 s] holds ticks 100..=250
    assert_eq!(session.events_in_window(), 151);
    assert_eq!(session.counts().total(), 151);
    assert_eq!(session.counts().as_slice(), &[38, 38, 37, 38]);
    assert!((clock.now().as_secs_f64() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_display_converges_within_twelve_frames() {
    let (mut session, clock) = session_with(&[2]);
    session.start();

    clock.advance(TICK);
    session.run_due();
    let first = session.display().get(LabelId(2));
    assert!((first - 1.0 / 12.0).abs() < 1e-12, "first frame moved {first}");
    assert!(session.is_animating());

    for _ in 0..11 {
        clock.advance(FRAME);
        session.run_due();
    }
    assert_eq!(session.display().as_slice(), &[0.0, 0.0, 1.0, 0.0]);
    assert!(!session.is_animating());
}

#[test]
fn test_display_never_overshoots() {
    let (mut session, clock) = session_with(&[0]);
    session.start();

    let mut previous = 0.0;
    for _ in 0..40 {
        advance(&mut session, &clock, FRAME);
        let value = session.display().get(LabelId(0));
        let target = f64::from(session.counts().get(LabelId(0)));
        assert!(value >= previous, "display went down: {previous} -> {value}");
        assert!(value <= target + 1e-9, "display {value} overshot {target}");
        previous = value;
    }
}

#[test]
fn test_stop_mid_animation_freezes_display() {
    let (mut session, clock) = session_with(&[1]);
    session.start();

    clock.advance(TICK);
    session.run_due();
    for _ in 0..3 {
        clock.advance(FRAME);
        session.run_due();
    }
    session.stop();
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.pending_timers(), 0);

    let frozen = session.display().get(LabelId(1));
    assert!(frozen > 0.0 && frozen < 1.0, "expected a partial value, got {frozen}");
    session.take_render_request();

    clock.advance(Duration::from_secs(5));
    assert_eq!(session.run_due(), 0);
    assert!(!session.take_render_request());
    assert!((session.display().get(LabelId(1)) - frozen).abs() < f64::EPSILON);
    assert_eq!(session.counts().get(LabelId(1)), 1);
}

#[test]
fn test_restart_resumes_from_frozen_values() {
    let (mut session, clock) = session_with(&[0]);
    session.start();
    clock.advance(TICK);
    session.run_due();
    session.stop();

    let frozen = session.display().get(LabelId(0));
    session.start();
    advance(&mut session, &clock, TICK);

    let resumed = session.display().get(LabelId(0));
    assert!(resumed > frozen);
    assert_eq!(session.counts().get(LabelId(0)), 2);
}

#[test]
fn test_reset_is_idempotent() {
    let (mut session, clock) = session_with(&[0, 3]);
    session.start();
    advance(&mut session, &clock, Duration::from_secs(3));
    assert!(session.total_recorded() > 0);

    session.reset();
    let after_first = (
        session.counts().as_slice().to_vec(),
        session.display().as_slice().to_vec(),
        session.last_update(),
        session.state(),
    );
    assert!(session.take_render_request());

    session.reset();
    let after_second = (
        session.counts().as_slice().to_vec(),
        session.display().as_slice().to_vec(),
        session.last_update(),
        session.state(),
    );
    assert!(session.take_render_request());

    assert_eq!(after_first, after_second);
    assert_eq!(after_first.0, vec![0, 0, 0, 0]);
    assert_eq!(after_first.1, vec![0.0, 0.0, 0.0, 0.0]);
    assert_eq!(after_first.2, None);
    assert_eq!(after_first.3, SessionState::Idle);
    assert_eq!(session.events_in_window(), 0);
    assert_eq!(session.pending_timers(), 0);
}

#[test]
fn test_reset_while_idle_still_renders_empty_chart() {
    let (mut session, _clock) = session_with(&[0]);
    session.take_render_request();
    session.reset();
    assert!(session.take_render_request());
    assert_eq!(session.chart_input().last_update, None);
}

/// Scheduler whose cancel does nothing, so stale timers still fire
struct LeakyScheduler(TimerQueue<ManualClock>);

impl Scheduler for LeakyScheduler {
    fn schedule(&mut self, delay: Duration, task: Task) -> TimerHandle {
        self.0.schedule(delay, task)
    }

    fn cancel(&mut self, _handle: TimerHandle) -> bool {
        false
    }

    fn pop_due(&mut self) -> Option<Task> {
        self.0.pop_due()
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.0.next_deadline()
    }

    fn pending(&self) -> usize {
        self.0.pending()
    }
}

#[test]
fn test_stale_timers_after_stop_are_ignored() {
    let clock = ManualClock::new();
    let scheduler = LeakyScheduler(TimerQueue::new(clock.clone()));
    let source = ScriptedSource::cycle(TICK, &[0]);
    let mut session =
        RecordingSession::with_scheduler(RecorderConfig::default(), scheduler, source, clock.clone());

    session.start();
    clock.advance(TICK);
    session.run_due();
    session.stop();
    let display = session.display().as_slice().to_vec();

    // The leaked tick and frame still fire, but change nothing
    clock.advance(Duration::from_secs(2));
    assert!(session.run_due() >= 2);
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.total_recorded(), 1);
    assert_eq!(session.display().as_slice(), display.as_slice());
    assert_eq!(session.pending_timers(), 0);
}

#[test]
fn test_resize_burst_renders_once() {
    let (mut session, clock) = session_with(&[0]);
    session.take_render_request();

    for _ in 0..5 {
        session.on_resize();
        clock.advance(Duration::from_millis(10));
        session.run_due();
        assert!(!session.take_render_request());
    }
    clock.advance(Duration::from_millis(30));
    assert_eq!(session.run_due(), 1);
    assert!(session.take_render_request());
    assert_eq!(session.pending_timers(), 0);
}

#[test]
fn test_undrained_tick_reports_stay_bounded() {
    let (mut session, clock) = session_with(&[0, 1, 2, 3]);
    session.start();

    // One hour of 400 ms ticks, stepping one frame at a time
    for _ in 0..(3600 * 1000 / 16) {
        clock.advance(FRAME);
        session.run_due();
    }
    assert_eq!(session.total_recorded(), 9000);
    assert_eq!(session.events_in_window(), 151);
    assert_eq!(session.undrained_ticks(), TICK_REPORT_CAPACITY);

    let reports = session.drain_ticks();
    assert_eq!(reports.len(), TICK_REPORT_CAPACITY);
    let newest = reports.last().unwrap().timestamp.as_secs();
    assert!((newest - 3600.0).abs() < 1e-9, "newest report at {newest}");
    assert!(reports.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    assert_eq!(session.undrained_ticks(), 0);
}

#[test]
fn test_empty_label_set_keeps_running() {
    let clock = ManualClock::new();
    let mut config = RecorderConfig::default();
    config.labels = LabelSet::new(Vec::<String>::new());
    let source = ScriptedSource::cycle(TICK, &[0]);
    let mut session = RecordingSession::new(config, source, clock.clone());

    session.start();
    advance(&mut session, &clock, Duration::from_secs(5));

    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.total_recorded(), 0);
    assert_eq!(session.events_in_window(), 0);
    assert!(session.counts().is_empty());
    assert!(!session.is_animating());
    assert_eq!(session.pending_timers(), 1);

    let reports = session.drain_ticks();
    assert_eq!(reports.len(), 12);
    assert!(reports.iter().all(|r| r.label.is_none() && r.in_window == 0));
    assert!(session.last_update().is_some());

    let layout = layout_chart(&session.chart_input(), 900.0, 520.0);
    assert!(layout.bars.is_empty());
    assert!((layout.max_val - 20.0).abs() < f64::EPSILON);

    session.reset();
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.pending_timers(), 0);
}
