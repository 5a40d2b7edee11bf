//! Delayed-callback scheduling.
//!
//! Instead of closures, timers carry a [`Task`] tag. The host loop asks the
//! scheduler for due tasks and hands each one back to the session, which
//! keeps every state mutation on the one thread that owns the session.
//!
//! Every scheduled task can be cancelled by its [`TimerHandle`]; cancelling a
//! handle that already fired or was never issued is a harmless no-op.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

use crate::clock::Clock;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Generate the next event
    Tick,
    /// Advance the display animation by one frame
    AnimationFrame,
    /// Debounced redraw after a resize
    Redraw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timer#{}", self.0)
    }
}

pub trait Scheduler {
    /// Run `task` once, `delay` from now.
    fn schedule(&mut self, delay: Duration, task: Task) -> TimerHandle;

    /// Drop a pending timer. Returns `false` if it was not pending.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Remove and return the earliest task whose deadline has passed.
    fn pop_due(&mut self) -> Option<Task>;

    /// Deadline of the earliest pending task, as a clock offset
    fn next_deadline(&self) -> Option<Duration>;

    /// Number of pending timers
    fn pending(&self) -> usize;
}

/// Deadline-ordered timer queue driven by a [`Clock`].
///
/// Timers with equal deadlines fire in the order they were scheduled.
pub struct TimerQueue<C: Clock> {
    clock: C,
    next_id: u64,
    /// (deadline, handle) -> task
    timers: BTreeMap<(Duration, TimerHandle), Task>,
    deadlines: HashMap<TimerHandle, Duration>,
}

impl<C: Clock> TimerQueue<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, next_id: 0, timers: BTreeMap::new(), deadlines: HashMap::new() }
    }

    /// Time left until the earliest deadline (zero if already due)
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.next_deadline().map(|deadline| deadline.saturating_sub(now))
    }
}

impl<C: Clock> Scheduler for TimerQueue<C> {
    fn schedule(&mut self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        let deadline = self.clock.now() + delay;
        self.timers.insert((deadline, handle), task);
        self.deadlines.insert(handle, deadline);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle) {
            Some(deadline) => self.timers.remove(&(deadline, handle)).is_some(),
            None => false,
        }
    }

    fn pop_due(&mut self) -> Option<Task> {
        let now = self.clock.now();
        let (&(deadline, handle), _) = self.timers.first_key_value()?;
        if deadline > now {
            return None;
        }
        self.deadlines.remove(&handle);
        self.timers.remove(&(deadline, handle))
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.timers.first_key_value().map(|(&(deadline, _), _)| deadline)
    }

    fn pending(&self) -> usize {
        self.timers.len()
    }
}
