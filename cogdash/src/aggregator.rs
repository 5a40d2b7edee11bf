//! Sliding-window label counter.
//!
//! Events are appended in arrival order. [`WindowAggregator::recompute`]
//! evicts everything older than the window and rebuilds the counts in the
//! same call, so readers only ever see a trimmed log with matching counts.
//!
//! ```text
//!        evicted            kept (timestamp >= now - window)
//!   ──●────●──────┆───●──●───●──────●───●──▶ time
//!              now - 60s                  now
//! ```

use std::collections::VecDeque;

use crate::domain::{CountMap, Event, Timestamp};

pub struct WindowAggregator {
    window_secs: f64,
    events: VecDeque<Event>,
    counts: CountMap,
}

impl WindowAggregator {
    #[must_use]
    pub fn new(window_secs: f64, label_count: usize) -> Self {
        Self { window_secs, events: VecDeque::new(), counts: CountMap::zeroed(label_count) }
    }

    /// Append an event. Counts are not touched until the next `recompute`.
    pub fn record(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Evict events older than `now - window` and recount the rest.
    ///
    /// The lower bound is inclusive. Events stamped after `now` (clock skew)
    /// stay in the window.
    pub fn recompute(&mut self, now: Timestamp) {
        let cutoff = now.as_secs() - self.window_secs;
        self.events.retain(|e| e.timestamp.as_secs() >= cutoff);

        self.counts.clear();
        for event in &self.events {
            self.counts.increment(event.label);
        }
    }

    pub fn reset(&mut self) {
        self.events.clear();
        self.counts.clear();
    }

    #[must_use]
    pub fn counts(&self) -> &CountMap {
        &self.counts
    }

    /// Number of events currently held (in window as of the last recompute)
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}
