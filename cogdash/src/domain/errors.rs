//! Structured error types for cogdash
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! The recording engine itself is infallible; these cover configuration and
//! the terminal host.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Window length must be a positive number of seconds, got {0}")]
    InvalidWindow(f64),

    #[error("Invalid tick interval range {min_ms}..={max_ms} ms")]
    InvalidTickRange { min_ms: u64, max_ms: u64 },

    #[error("Animation needs at least one step")]
    ZeroAnimationSteps,

    #[error("Frame interval must be non-zero")]
    ZeroFrameInterval,

    #[error("Convergence epsilon must be a finite non-negative number, got {0}")]
    InvalidEpsilon(f64),

    #[error("Duplicate label \"{0}\"")]
    DuplicateLabel(String),
}

#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Terminal setup failed: {0}")]
    TerminalSetup(String),

    #[error("Failed to draw frame: {0}")]
    DrawFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_range_display() {
        let err = ConfigError::InvalidTickRange { min_ms: 900, max_ms: 350 };
        assert_eq!(err.to_string(), "Invalid tick interval range 900..=350 ms");
    }

    #[test]
    fn test_duplicate_label_display() {
        let err = ConfigError::DuplicateLabel("Cog A".to_string());
        assert!(err.to_string().contains("Cog A"));
    }
}
