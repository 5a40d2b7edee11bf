//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers keep label indices, timestamps and the two count
//! maps apart, so a display value can never be passed where a true count is
//! expected.

use std::fmt;
use std::time::Duration;

/// Monotonic timestamp in seconds since the session clock's origin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Timestamp(pub f64);

impl Timestamp {
    #[must_use]
    pub fn from_duration(elapsed: Duration) -> Self {
        Timestamp(elapsed.as_secs_f64())
    }

    #[must_use]
    pub fn as_secs(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

/// Index of a label within its [`LabelSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(pub usize);

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label#{}", self.0)
    }
}

/// The fixed, ordered set of categories a view counts.
///
/// Order is significant: it is the bar order in the chart and the index
/// space of [`CountMap`] and [`DisplayMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    names: Vec<String>,
}

impl LabelSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { names: names.into_iter().map(Into::into).collect() }
    }

    /// Labels of the "Record Cognitive" view
    #[must_use]
    pub fn cognitive() -> Self {
        Self::new(["Cog A", "Cog B", "Cog C", "Others"])
    }

    /// Labels of the "Record Creative" view
    #[must_use]
    pub fn creative() -> Self {
        Self::new(["Cre A", "Cre B", "Cre C", "Others"])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn name(&self, id: LabelId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<LabelId> {
        self.names.iter().position(|n| n == name).map(LabelId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LabelId, &str)> {
        self.names.iter().enumerate().map(|(i, n)| (LabelId(i), n.as_str()))
    }

    /// First label name that appears more than once, if any
    #[must_use]
    pub fn first_duplicate(&self) -> Option<&str> {
        self.names
            .iter()
            .enumerate()
            .find(|(i, name)| self.names[..*i].contains(name))
            .map(|(_, name)| name.as_str())
    }
}

/// A single label observation. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub timestamp: Timestamp,
    pub label: LabelId,
}

impl Event {
    #[must_use]
    pub fn new(timestamp: Timestamp, label: LabelId) -> Self {
        Self { timestamp, label }
    }
}

/// Exact per-label count of the events currently inside the window.
///
/// Only the window aggregator rebuilds it; everyone else reads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountMap(Vec<u32>);

impl CountMap {
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        CountMap(vec![0; len])
    }

    /// Count for `id`; labels outside the set count as zero
    #[must_use]
    pub fn get(&self, id: LabelId) -> u32 {
        self.0.get(id.0).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().map(|&c| c as usize).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub(crate) fn clear(&mut self) {
        self.0.iter_mut().for_each(|c| *c = 0);
    }

    pub(crate) fn increment(&mut self, id: LabelId) {
        if let Some(c) = self.0.get_mut(id.0) {
            *c += 1;
        }
    }
}

impl From<Vec<u32>> for CountMap {
    fn from(counts: Vec<u32>) -> Self {
        CountMap(counts)
    }
}

/// Animated per-label values shown on screen
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayMap(Vec<f64>);

impl DisplayMap {
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        DisplayMap(vec![0.0; len])
    }

    #[must_use]
    pub fn get(&self, id: LabelId) -> f64 {
        self.0.get(id.0).copied().unwrap_or(0.0)
    }

    /// Largest displayed value, 0.0 for an empty map
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.0.iter().copied().fold(0.0, f64::max)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.0
    }

    pub(crate) fn clear(&mut self) {
        self.0.iter_mut().for_each(|v| *v = 0.0);
    }
}

impl From<Vec<f64>> for DisplayMap {
    fn from(values: Vec<f64>) -> Self {
        DisplayMap(values)
    }
}

/// Recording state; `Idle` is initial and the state after stop/reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
}

impl SessionState {
    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, SessionState::Running)
    }

    /// Caption of the single start/stop button for this state
    #[must_use]
    pub fn button_label(self) -> &'static str {
        match self {
            SessionState::Idle => "Start",
            SessionState::Running => "Stop",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "IDLE"),
            SessionState::Running => write!(f, "RUNNING"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_set_lookup() {
        let labels = LabelSet::cognitive();
        assert_eq!(labels.len(), 4);
        assert_eq!(labels.name(LabelId(3)), Some("Others"));
        assert_eq!(labels.position("Cog B"), Some(LabelId(1)));
        assert_eq!(labels.name(LabelId(9)), None);
    }

    #[test]
    fn test_first_duplicate() {
        assert_eq!(LabelSet::creative().first_duplicate(), None);
        assert_eq!(LabelSet::new(["a", "b", "a"]).first_duplicate(), Some("a"));
    }

    #[test]
    fn test_count_map_ignores_unknown_label() {
        let mut counts = CountMap::zeroed(2);
        counts.increment(LabelId(1));
        counts.increment(LabelId(5));
        assert_eq!(counts.as_slice(), &[0, 1]);
        assert_eq!(counts.get(LabelId(5)), 0);
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn test_display_map_max_defaults_to_zero() {
        assert!(DisplayMap::default().max_value().abs() < f64::EPSILON);
        assert!((DisplayMap::from(vec![1.5, 3.25]).max_value() - 3.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_button_label() {
        assert_eq!(SessionState::Idle.button_label(), "Start");
        assert_eq!(SessionState::Running.button_label(), "Stop");
        assert_eq!(SessionState::Running.to_string(), "RUNNING");
    }
}
