//! # cogdash - Main Entry Point
//!
//! Supports two operational modes:
//! - **Dashboard** (default): both views in an interactive terminal UI
//! - **Headless** (`--headless`): the selected view only, one JSON line per event

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::time::Duration;

use cogdash::cli::Args;
use cogdash::clock::MonotonicClock;
use cogdash::config::View;
use cogdash::domain::ConfigError;
use cogdash::session::LiveSession;
use cogdash::source::SeededSource;
use cogdash::tui::{self, Dashboard};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.chain().any(|cause| cause.downcast_ref::<ConfigError>().is_some()) {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

/// Session for `view` with CLI overrides applied and validated
fn build_session(args: &Args, view: View, clock: MonotonicClock) -> Result<LiveSession> {
    let config = args.recorder_config(view);
    config
        .validate()
        .with_context(|| format!("Invalid configuration for the {} view", view.title().to_lowercase()))?;

    let source = match args.seed_for(view) {
        Some(seed) => SeededSource::seeded(seed, config.tick_min, config.tick_max),
        None => SeededSource::from_entropy(config.tick_min, config.tick_max),
    };
    Ok(LiveSession::new(config, source, clock))
}

fn run() -> Result<()> {
    let args = Args::parse();
    let clock = MonotonicClock::new();

    if args.headless {
        return run_headless(&args, clock);
    }

    let mut cognitive = build_session(&args, View::Cognitive, clock)?;
    let mut creative = build_session(&args, View::Creative, clock)?;
    if args.autostart {
        match args.view {
            View::Cognitive => cognitive.start(),
            View::Creative => creative.start(),
        }
    }

    info!("Starting dashboard on the {} view", args.view.title().to_lowercase());
    let dashboard = Dashboard::new(cognitive, creative, args.view);
    tui::run_live(dashboard).context("Terminal UI failed")?;
    Ok(())
}

fn run_headless(args: &Args, clock: MonotonicClock) -> Result<()> {
    let mut session = build_session(args, args.view, clock)?;
    let limit = (args.duration > 0).then(|| Duration::from_secs(args.duration));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build async runtime")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = runtime.block_on(cogdash::headless::run(&mut session, limit, &mut out))?;

    if !args.quiet {
        eprintln!(
            "\n{}: {} events in {:.1}s ({}), {} still in window",
            session.config().title,
            summary.events,
            summary.elapsed.as_secs_f64(),
            summary.reason,
            session.events_in_window(),
        );
    }
    Ok(())
}
