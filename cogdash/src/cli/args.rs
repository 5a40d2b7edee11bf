//! CLI argument definitions

use clap::Parser;

use crate::config::{RecorderConfig, View, WINDOW_SECONDS};
use crate::domain::LabelSet;

#[derive(Parser, Debug)]
#[command(
    name = "cogdash",
    about = "Live sliding-window label counter with an animated bar chart",
    after_help = "\
EXAMPLES:
    cogdash                                  Dashboard with the cognitive view first
    cogdash --view creative --autostart      Start recording the creative view at once
    cogdash --headless --duration 30         Print one JSON line per event for 30s
    cogdash --labels Focus,Drift,Idle        Custom label set for the first view"
)]
pub struct Args {
    /// View shown first (Tab switches in the dashboard)
    #[arg(long, value_enum, default_value_t = View::Cognitive)]
    pub view: View,

    /// Replace the label set of the first view (comma separated)
    #[arg(long, value_delimiter = ',', value_name = "LABELS")]
    pub labels: Option<Vec<String>>,

    /// Replace the heading of the first view
    #[arg(long)]
    pub title: Option<String>,

    /// Sliding window length in seconds
    #[arg(long, default_value_t = WINDOW_SECONDS)]
    pub window: f64,

    /// Seed the event stream for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start recording immediately
    #[arg(long)]
    pub autostart: bool,

    /// Run without TUI, printing one JSON line per event
    #[arg(long)]
    pub headless: bool,

    /// Stop after N seconds (0 = unlimited)
    #[arg(long, default_value = "0")]
    pub duration: u64,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Recorder configuration for `view`, with overrides applied when it
    /// is the view selected by `--view`
    #[must_use]
    pub fn recorder_config(&self, view: View) -> RecorderConfig {
        let mut config = RecorderConfig::for_view(view);
        config.window_secs = self.window;

        if view == self.view {
            if let Some(ref labels) = self.labels {
                config.labels = LabelSet::new(labels.iter().map(|l| l.trim().to_string()));
            }
            if let Some(ref title) = self.title {
                config.title.clone_from(title);
            }
        }
        config
    }

    /// Per-view seed so the two views do not mirror each other
    #[must_use]
    pub fn seed_for(&self, view: View) -> Option<u64> {
        self.seed.map(|seed| match view {
            View::Cognitive => seed,
            View::Creative => seed.wrapping_add(1),
        })
    }
}
