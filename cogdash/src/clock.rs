//! Time sources.
//!
//! The engine reads two kinds of time: a monotonic offset used for event
//! timestamps and timer deadlines, and local wall time used only for the
//! "Updated" header.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

pub trait Clock {
    /// Monotonic time elapsed since the clock's origin
    fn now(&self) -> Duration;

    /// Local wall-clock time corresponding to `now()`
    fn wall_time(&self) -> DateTime<Local>;
}

/// Real clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    #[must_use]
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn wall_time(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Manually advanced clock.
///
/// Clones share the same time, so a test can keep one handle while the
/// session and its scheduler own the others.
#[derive(Debug, Clone)]
pub struct ManualClock {
    elapsed: Rc<Cell<Duration>>,
    wall_origin: DateTime<Local>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::with_wall_origin(Local::now())
    }

    #[must_use]
    pub fn with_wall_origin(wall_origin: DateTime<Local>) -> Self {
        Self { elapsed: Rc::new(Cell::new(Duration::ZERO)), wall_origin }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.elapsed.set(to);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.elapsed.get()
    }

    fn wall_time(&self) -> DateTime<Local> {
        let offset =
            chrono::Duration::from_std(self.elapsed.get()).unwrap_or_else(|_| chrono::Duration::zero());
        self.wall_origin + offset
    }
}
