//! Event stream randomness.
//!
//! The tick interval and the label of each generated event are the only
//! nondeterminism in the engine. They come from an [`EventSource`] so that
//! tests and replays can supply a fixed sequence.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{LabelId, LabelSet};

pub trait EventSource {
    /// Pause before the next event
    fn next_interval(&mut self) -> Duration;

    /// Label of the next event; `None` when the label set is empty
    fn next_label(&mut self, labels: &LabelSet) -> Option<LabelId>;
}

/// Uniform draws from a seedable PRNG
pub struct SeededSource {
    rng: StdRng,
    min_ms: u64,
    max_ms: u64,
}

impl SeededSource {
    /// Reproducible stream for a given seed
    #[must_use]
    pub fn seeded(seed: u64, min: Duration, max: Duration) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), min, max)
    }

    #[must_use]
    pub fn from_entropy(min: Duration, max: Duration) -> Self {
        Self::with_rng(StdRng::from_entropy(), min, max)
    }

    fn with_rng(rng: StdRng, min: Duration, max: Duration) -> Self {
        let min_ms = u64::try_from(min.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX).max(min_ms);
        Self { rng, min_ms, max_ms }
    }
}

impl EventSource for SeededSource {
    fn next_interval(&mut self) -> Duration {
        Duration::from_millis(self.rng.gen_range(self.min_ms..=self.max_ms))
    }

    fn next_label(&mut self, labels: &LabelSet) -> Option<LabelId> {
        if labels.is_empty() {
            return None;
        }
        Some(LabelId(self.rng.gen_range(0..labels.len())))
    }
}

/// Replays a fixed cycle of `(interval, label index)` pairs.
///
/// Label indices wrap around the label set they are drawn for.
pub struct ScriptedSource {
    script: Vec<(Duration, usize)>,
    next_interval: usize,
    next_label: usize,
}

impl ScriptedSource {
    /// # Panics
    /// Panics if `script` is empty.
    #[must_use]
    pub fn new(script: Vec<(Duration, usize)>) -> Self {
        assert!(!script.is_empty(), "script needs at least one step");
        Self { script, next_interval: 0, next_label: 0 }
    }

    /// Constant interval, labels cycling through `labels`
    #[must_use]
    pub fn cycle(interval: Duration, labels: &[usize]) -> Self {
        Self::new(labels.iter().map(|&l| (interval, l)).collect())
    }
}

impl EventSource for ScriptedSource {
    fn next_interval(&mut self) -> Duration {
        let (interval, _) = self.script[self.next_interval % self.script.len()];
        self.next_interval += 1;
        interval
    }

    fn next_label(&mut self, labels: &LabelSet) -> Option<LabelId> {
        if labels.is_empty() {
            return None;
        }
        let (_, label) = self.script[self.next_label % self.script.len()];
        self.next_label += 1;
        Some(LabelId(label % labels.len()))
    }
}
