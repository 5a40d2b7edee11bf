//! Bar chart layout.
//!
//! [`layout_chart`] is a pure function of the render inputs and the surface
//! size. It produces geometry in surface pixels (origin top-left, y down);
//! the TUI widget rasterises that geometry into terminal cells.
//!
//! ```text
//!  ┌───────────────────────────────────────────────┐
//!  │   • Updated: 14:02:31                 (top 45)│
//!  │        ─────────────────────────────────      │
//!  │         12                                    │
//!  │        ████     ─────  7  ──────────────      │
//!  │        ████          ████       3             │
//!  │ (left) ████     ──── ████ ───── ████ ─▄▄▄─    │
//!  │  60    ████          ████       ████  ███ (40)│
//!  │        ─────────────────────────────────      │
//!  │        Cog A    Cog B    Cog C   Others       │
//!  │                                   (bottom 70) │
//!  └───────────────────────────────────────────────┘
//! ```
//!
//! ## Scale
//!
//! `max_val = ceil(max(20, peak * 1.15) / 5) * 5`: 15% headroom above the
//! current peak, rounded up to a multiple of 5, never below 20.

// Label indices and counts are tiny; float conversion is lossless in practice
#![allow(clippy::cast_precision_loss)]

use chrono::{DateTime, Local};

use crate::domain::{CountMap, DisplayMap, LabelSet};

/// Fallback surface used when the host reports a degenerate size
pub const DEFAULT_SURFACE_WIDTH: f64 = 900.0;
pub const DEFAULT_SURFACE_HEIGHT: f64 = 520.0;

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_TOP: f64 = 45.0;
const MARGIN_BOTTOM: f64 = 70.0;

const HEADER_Y: f64 = 20.0;
const BAR_GAP: f64 = 30.0;
const MIN_BAR_PX: f64 = 18.0;
const VALUE_LABEL_OFFSET: f64 = 14.0;
const CATEGORY_LABEL_OFFSET: f64 = 26.0;

/// Gridlines split the plot height into this many bands (steps + 1 lines)
pub const GRID_STEPS: usize = 5;

const SCALE_FLOOR: f64 = 20.0;
const SCALE_HEADROOM: f64 = 1.15;
const SCALE_STEP: f64 = 5.0;
const STUB_THRESHOLD: f64 = 0.001;

/// Everything a render needs, borrowed from the session
#[derive(Debug, Clone, Copy)]
pub struct ChartInput<'a> {
    pub labels: &'a LabelSet,
    pub display: &'a DisplayMap,
    pub counts: &'a CountMap,
    pub last_update: Option<DateTime<Local>>,
}

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PixelRect {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub label: String,
    /// True integer count, shown above the bar
    pub count: u32,
    /// Filled bar; `y1` is the plot baseline
    pub rect: PixelRect,
    /// Index into the bar palette
    pub color: usize,
    /// True when drawn at stub height because the value is ~0
    pub is_stub: bool,
    /// Centre of the count text
    pub value_anchor: (f64, f64),
    /// Centre of the category text
    pub label_anchor: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    /// Surface size actually used (after fallback)
    pub width: f64,
    pub height: f64,
    pub header: String,
    /// West anchor of the header text
    pub header_anchor: (f64, f64),
    pub plot: PixelRect,
    /// y of each gridline, bottom to top
    pub gridlines: Vec<f64>,
    pub max_val: f64,
    pub bars: Vec<BarLayout>,
}

/// Upper bound of the value axis for a given peak value
#[must_use]
pub fn scale_max(raw_max: f64) -> f64 {
    let base = SCALE_FLOOR.max(raw_max * SCALE_HEADROOM);
    (base / SCALE_STEP).ceil() * SCALE_STEP
}

/// Header line, with a placeholder before the first update
#[must_use]
pub fn header_text(last_update: Option<DateTime<Local>>) -> String {
    match last_update {
        Some(ts) => format!(" • Updated: {}", ts.format("%H:%M:%S")),
        None => " • Updated: --:--:--".to_string(),
    }
}

/// Lay out the chart on a `width` × `height` surface.
#[must_use]
pub fn layout_chart(input: &ChartInput<'_>, width: f64, height: f64) -> ChartLayout {
    let width = if width.is_finite() && width > 2.0 { width } else { DEFAULT_SURFACE_WIDTH };
    let height = if height.is_finite() && height > 2.0 { height } else { DEFAULT_SURFACE_HEIGHT };

    let chart_w = (width - MARGIN_LEFT - MARGIN_RIGHT).max(0.0);
    let chart_h = (height - MARGIN_TOP - MARGIN_BOTTOM).max(0.0);
    let plot = PixelRect {
        x0: MARGIN_LEFT,
        y0: MARGIN_TOP,
        x1: MARGIN_LEFT + chart_w,
        y1: MARGIN_TOP + chart_h,
    };

    let max_val = scale_max(input.display.max_value());

    let gridlines = (0..=GRID_STEPS)
        .map(|i| plot.y1 - (i as f64 * chart_h / GRID_STEPS as f64))
        .collect();

    let n = input.labels.len();
    let bar_w = if n == 0 {
        0.0
    } else {
        ((chart_w - BAR_GAP * (n as f64 - 1.0)) / n as f64).max(0.0)
    };

    let bars = input
        .labels
        .iter()
        .map(|(id, name)| {
            let value = input.display.get(id);
            let x0 = plot.x0 + id.0 as f64 * (bar_w + BAR_GAP);
            let x1 = x0 + bar_w;

            let is_stub = value <= STUB_THRESHOLD;
            let bar_h = if is_stub { MIN_BAR_PX } else { (value / max_val) * chart_h };
            let bar_h = bar_h.clamp(0.0, chart_h);

            let rect = PixelRect { x0, y0: plot.y1 - bar_h, x1, y1: plot.y1 };
            BarLayout {
                label: name.to_string(),
                count: input.counts.get(id),
                rect,
                color: id.0,
                is_stub,
                value_anchor: (rect.center_x(), rect.y0 - VALUE_LABEL_OFFSET),
                label_anchor: (rect.center_x(), plot.y1 + CATEGORY_LABEL_OFFSET),
            }
        })
        .collect();

    ChartLayout {
        width,
        height,
        header: header_text(input.last_update),
        header_anchor: (MARGIN_LEFT, HEADER_Y),
        plot,
        gridlines,
        max_val,
        bars,
    }
}
