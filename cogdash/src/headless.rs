//! Headless mode: one session, no terminal UI, one JSON line per event.
//!
//! Runs on a single-threaded tokio runtime. Between timers the task sleeps
//! until the next deadline or Ctrl+C, whichever comes first.

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::clock::Clock;
use crate::scheduler::Scheduler;
use crate::session::{RecordingSession, TickReport};
use crate::source::EventSource;

/// Sleep cap while no timer is pending
const IDLE_WAIT: Duration = Duration::from_millis(100);

#[derive(Debug, Serialize, PartialEq)]
pub struct LabelCount<'a> {
    pub label: &'a str,
    pub count: u32,
}

/// One output line
#[derive(Debug, Serialize, PartialEq)]
pub struct TickLine<'a> {
    pub view: &'a str,
    pub elapsed_secs: f64,
    pub label: Option<&'a str>,
    pub counts: Vec<LabelCount<'a>>,
    pub in_window: usize,
}

/// Why and after how long the run ended
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSummary {
    pub reason: &'static str,
    pub elapsed: Duration,
    pub events: u64,
}

/// Build the output line for a tick, using the session's current counts
#[must_use]
pub fn tick_line<'a, S: Scheduler, E: EventSource, C: Clock>(
    session: &'a RecordingSession<S, E, C>,
    report: &TickReport,
) -> TickLine<'a> {
    let labels = &session.config().labels;
    TickLine {
        view: &session.config().title,
        elapsed_secs: report.timestamp.as_secs(),
        label: report.label.and_then(|id| labels.name(id)),
        counts: labels
            .iter()
            .map(|(id, label)| LabelCount { label, count: session.counts().get(id) })
            .collect(),
        in_window: report.in_window,
    }
}

/// Record until Ctrl+C or until `limit` elapses, writing lines to `out`.
///
/// # Errors
/// Returns an error if a line cannot be serialized or written, or the
/// Ctrl+C handler cannot be installed.
pub async fn run<S, E, C, W>(
    session: &mut RecordingSession<S, E, C>,
    limit: Option<Duration>,
    out: &mut W,
) -> Result<HeadlessSummary>
where
    S: Scheduler,
    E: EventSource,
    C: Clock,
    W: Write,
{
    let started = Instant::now();
    session.start();
    info!("headless: recording {}", session.config().title);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let reason = loop {
        session.run_due();
        // No surface to draw on
        session.take_render_request();

        for report in session.drain_ticks() {
            let line = serde_json::to_string(&tick_line(session, &report))
                .context("Failed to serialize tick")?;
            writeln!(out, "{line}").context("Failed to write tick")?;
        }

        let remaining = match limit {
            Some(limit) => match limit.checked_sub(started.elapsed()) {
                Some(left) if !left.is_zero() => Some(left),
                _ => break "duration limit reached",
            },
            None => None,
        };

        let mut wait = session.time_until_next().unwrap_or(IDLE_WAIT);
        if let Some(left) = remaining {
            wait = wait.min(left);
        }

        tokio::select! {
            () = tokio::time::sleep(wait) => {}
            result = &mut ctrl_c => {
                result.context("Failed to listen for Ctrl+C")?;
                break "interrupted";
            }
        }
    };

    session.stop();
    out.flush().context("Failed to flush output")?;
    info!("headless: {reason}");

    Ok(HeadlessSummary { reason, elapsed: started.elapsed(), events: session.total_recorded() })
}
