//! Recorder configuration
//!
//! Every tunable of a recording view lives in [`RecorderConfig`]. The binary
//! builds one per view from the CLI arguments; tests build them directly.

use std::time::Duration;

use clap::ValueEnum;

use crate::domain::{ConfigError, LabelSet};

/// Trailing window length in seconds
pub const WINDOW_SECONDS: f64 = 60.0;
/// Bounds of the pause between two generated events
pub const TICK_MIN_MS: u64 = 350;
pub const TICK_MAX_MS: u64 = 900;
/// Frames used to converge the display onto new counts
pub const ANIMATION_STEPS: u32 = 12;
/// ~60 fps
pub const FRAME_INTERVAL_MS: u64 = 16;
/// Distance below which a displayed value counts as converged
pub const CONVERGENCE_EPSILON: f64 = 0.001;
/// Delay before a resize-triggered redraw
pub const RESIZE_DEBOUNCE_MS: u64 = 30;

/// The two recorder views the dashboard ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    Cognitive,
    Creative,
}

impl View {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            View::Cognitive => "COGNITIVE",
            View::Creative => "CREATIVE",
        }
    }

    #[must_use]
    pub fn labels(self) -> LabelSet {
        match self {
            View::Cognitive => LabelSet::cognitive(),
            View::Creative => LabelSet::creative(),
        }
    }

    /// The other view (Tab cycles between the two)
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            View::Cognitive => View::Creative,
            View::Creative => View::Cognitive,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Heading shown above the chart
    pub title: String,
    pub labels: LabelSet,
    pub window_secs: f64,
    pub tick_min: Duration,
    pub tick_max: Duration,
    pub animation_steps: u32,
    pub frame_interval: Duration,
    pub epsilon: f64,
    pub resize_debounce: Duration,
}

impl RecorderConfig {
    #[must_use]
    pub fn for_view(view: View) -> Self {
        Self {
            title: view.title().to_string(),
            labels: view.labels(),
            window_secs: WINDOW_SECONDS,
            tick_min: Duration::from_millis(TICK_MIN_MS),
            tick_max: Duration::from_millis(TICK_MAX_MS),
            animation_steps: ANIMATION_STEPS,
            frame_interval: Duration::from_millis(FRAME_INTERVAL_MS),
            epsilon: CONVERGENCE_EPSILON,
            resize_debounce: Duration::from_millis(RESIZE_DEBOUNCE_MS),
        }
    }

    /// Check the invariants the engine relies on.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.window_secs.is_finite() || self.window_secs <= 0.0 {
            return Err(ConfigError::InvalidWindow(self.window_secs));
        }
        if self.tick_min.is_zero() || self.tick_min > self.tick_max {
            return Err(ConfigError::InvalidTickRange {
                min_ms: duration_ms(self.tick_min),
                max_ms: duration_ms(self.tick_max),
            });
        }
        if self.animation_steps == 0 {
            return Err(ConfigError::ZeroAnimationSteps);
        }
        if self.frame_interval.is_zero() {
            return Err(ConfigError::ZeroFrameInterval);
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if let Some(dup) = self.labels.first_duplicate() {
            return Err(ConfigError::DuplicateLabel(dup.to_string()));
        }
        Ok(())
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self::for_view(View::Cognitive)
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
