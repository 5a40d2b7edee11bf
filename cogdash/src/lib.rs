//! # cogdash - Live Sliding-Window Label Counter
//!
//! cogdash records a stream of labelled events, counts how many of each
//! label fell inside the last 60 seconds, and shows the counts as an
//! animated bar chart. Two independent views (Record Cognitive and Record
//! Creative) each run their own recording session.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐   interval + label   ┌──────────────────────────────┐
//! │ EventSource  │─────────────────────▶│       RecordingSession       │
//! │ (seeded rng) │                      │                              │
//! └──────────────┘                      │  ┌────────────┐  counts      │
//!                                       │  │ Aggregator │────────┐     │
//! ┌──────────────┐   Tick / Frame /     │  │ (60s win)  │        ▼     │
//! │  TimerQueue  │◀─────Redraw─────────▶│  └────────────┘  ┌─────────┐ │
//! │  (Scheduler) │                      │                  │Animator │ │
//! └──────┬───────┘                      │                  └────┬────┘ │
//!        │ deadlines                    └───────────────────────┼──────┘
//!        ▼                                                      │ display
//! ┌──────────────┐                      ┌──────────────┐        ▼
//! │    Clock     │                      │ layout_chart │◀── ChartInput
//! └──────────────┘                      └──────┬───────┘
//!                                              ▼
//!                                  TUI (ratatui) or JSON lines
//! ```
//!
//! ## Module Structure
//!
//! ### Engine
//!
//! - [`aggregator`]: Sliding-window event buffer and per-label counts
//! - [`animator`]: Frame-stepped convergence of displayed values
//! - [`session`]: Start/stop/reset state machine wiring it all together
//! - [`scheduler`]: Cancellable timers keyed by clock deadline
//! - [`clock`]: Monotonic and manual time sources
//! - [`source`]: Random and scripted event streams
//!
//! ### Presentation
//!
//! - [`chart`]: Pure chart layout (pixel geometry, scale, header text)
//! - [`tui`]: Interactive dashboard hosting both views
//! - [`headless`]: JSON-lines output without a terminal UI
//!
//! ### Support
//!
//! - [`config`]: Timing constants, views and recorder configuration
//! - [`cli`]: Command-line arguments
//! - [`domain`]: Core types (labels, counts, timestamps) and errors
//!
//! ## Timing
//!
//! All time is read through [`clock::Clock`] and every delay goes through
//! [`scheduler::Scheduler`]. Tests swap in [`clock::ManualClock`] and
//! [`source::ScriptedSource`] to replay a session deterministically.

pub mod aggregator;
pub mod animator;
pub mod chart;
pub mod cli;
pub mod clock;
pub mod config;
pub mod domain;
pub mod headless;
pub mod scheduler;
pub mod session;
pub mod source;
pub mod tui;
