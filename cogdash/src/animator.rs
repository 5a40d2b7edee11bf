//! Display smoothing.
//!
//! After every aggregation update the displayed values glide toward the new
//! counts over a fixed number of frames. Each frame closes
//! `1 / (total_steps - step + 1)` of the *remaining* gap, so the step size
//! shrinks as the value approaches its target and never overshoots. The last
//! frame snaps exactly onto the target.
//!
//! The animator does no scheduling of its own: the session calls
//! [`Animator::frame`] on each animation timer and re-arms the timer while
//! the result is [`FrameOutcome::Continue`].

use crate::domain::{CountMap, DisplayMap};

/// Whether another frame should be scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Finished,
}

pub struct Animator {
    display: DisplayMap,
    targets: Vec<f64>,
    step: u32,
    total_steps: u32,
    epsilon: f64,
}

impl Animator {
    #[must_use]
    pub fn new(label_count: usize, total_steps: u32, epsilon: f64) -> Self {
        Self {
            display: DisplayMap::zeroed(label_count),
            targets: vec![0.0; label_count],
            step: 0,
            total_steps: total_steps.max(1),
            epsilon,
        }
    }

    /// Start converging toward `counts` from the current display values.
    pub fn retarget(&mut self, counts: &CountMap) {
        self.targets = counts.as_slice().iter().map(|&c| f64::from(c)).collect();
        self.step = 0;
    }

    /// Advance one frame.
    pub fn frame(&mut self) -> FrameOutcome {
        self.step += 1;
        let steps = self.total_steps;
        let step = self.step;
        let epsilon = self.epsilon;

        let mut done = true;
        for (current, &target) in self.display.values_mut().iter_mut().zip(&self.targets) {
            let delta = target - *current;
            if delta.abs() > epsilon {
                done = false;
                if step >= steps {
                    *current = target;
                } else {
                    *current += delta / f64::from(steps - step + 1);
                }
            }
        }

        if !done && step < steps {
            FrameOutcome::Continue
        } else {
            self.snap();
            FrameOutcome::Finished
        }
    }

    /// Jump every label onto its target.
    pub fn snap(&mut self) {
        for (current, &target) in self.display.values_mut().iter_mut().zip(&self.targets) {
            *current = target;
        }
    }

    pub fn reset(&mut self) {
        self.display.clear();
        self.targets.iter_mut().for_each(|t| *t = 0.0);
        self.step = 0;
    }

    #[must_use]
    pub fn display(&self) -> &DisplayMap {
        &self.display
    }

    #[must_use]
    pub fn step(&self) -> u32 {
        self.step
    }

    #[must_use]
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }
}
