use chrono::{Local, TimeZone};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use cogdash::chart::ChartInput;
use cogdash::domain::{CountMap, DisplayMap, LabelSet};
use cogdash::tui::chart::ChartWidget;

/// 120 x 40 cells = 960 x 640 px surface: plot 60..920 x 45..570,
/// bars 192.5 px wide, baseline on row 35
const AREA: Rect = Rect { x: 0, y: 0, width: 120, height: 40 };

fn render(labels: &LabelSet, display: &DisplayMap, counts: &CountMap) -> Buffer {
    let mut buf = Buffer::empty(AREA);
    let input = ChartInput { labels, display, counts, last_update: None };
    ChartWidget::new(input).render(AREA, &mut buf);
    buf
}

fn row(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
}

fn symbol(buf: &Buffer, x: u16, y: u16) -> &str {
    buf[(x, y)].symbol()
}

#[test]
fn test_empty_chart_shows_placeholder_header() {
    let labels = LabelSet::cognitive();
    let buf = render(&labels, &DisplayMap::zeroed(4), &CountMap::zeroed(4));

    let header = row(&buf, 1);
    assert_eq!(&header[..7], "       ");
    assert!(header.contains(" • Updated: --:--:--"), "header row: {header:?}");
}

#[test]
fn test_zero_counts_draw_stub_bars() {
    let labels = LabelSet::cognitive();
    let buf = render(&labels, &DisplayMap::zeroed(4), &CountMap::zeroed(4));

    // 18 px stub: one full row plus a one-eighth cap
    assert_eq!(symbol(&buf, 10, 34), "█");
    assert_eq!(symbol(&buf, 10, 33), "▁");
    assert_eq!(symbol(&buf, 10, 32), " ");

    // Count above the first bar, label below the baseline
    assert_eq!(symbol(&buf, 19, 32), "0");
    assert!(row(&buf, 37).contains("Cog A"));
    assert!(row(&buf, 37).contains("Others"));
}

#[test]
fn test_gridlines_span_plot() {
    let labels = LabelSet::cognitive();
    let buf = render(&labels, &DisplayMap::zeroed(4), &CountMap::zeroed(4));

    // Baseline and top gridline
    for y in [35, 2] {
        assert_eq!(symbol(&buf, 7, y), "─");
        assert_eq!(symbol(&buf, 114, y), "─");
        assert_eq!(symbol(&buf, 6, y), " ");
        assert_eq!(symbol(&buf, 115, y), " ");
    }
}

#[test]
fn test_bar_height_follows_display_value() {
    let labels = LabelSet::cognitive();
    // Scale 20: 10 -> half of 525 px = 262.5 px = 16.40625 rows
    let display = DisplayMap::from(vec![10.0, 0.0, 0.0, 0.0]);
    let counts = CountMap::from(vec![10, 0, 0, 0]);
    let buf = render(&labels, &display, &counts);

    assert_eq!(symbol(&buf, 10, 34), "█");
    assert_eq!(symbol(&buf, 10, 19), "█");
    // 0.40625 rows rounds to 3 eighths
    assert_eq!(symbol(&buf, 10, 18), "▃");
    assert_eq!(row(&buf, 17).trim(), "10");
}

#[test]
fn test_count_label_shows_integer_during_animation() {
    let labels = LabelSet::cognitive();
    let display = DisplayMap::from(vec![0.0, 3.4, 0.0, 0.0]);
    let counts = CountMap::from(vec![0, 5, 0, 0]);
    let buf = render(&labels, &display, &counts);

    // 3.4 of 20 -> 89.25 px: five full rows and a five-eighths cap on row 29
    assert_eq!(symbol(&buf, 47, 29), "▅");
    assert_eq!(symbol(&buf, 47, 28), "5");
    let text: String = (0..AREA.height).map(|y| row(&buf, y)).collect();
    assert!(!text.contains("3.4"));
}

#[test]
fn test_header_shows_update_time() {
    let labels = LabelSet::creative();
    let display = DisplayMap::zeroed(4);
    let counts = CountMap::zeroed(4);
    let updated = Local.with_ymd_and_hms(2024, 5, 1, 9, 7, 3).single();
    let input = ChartInput { labels: &labels, display: &display, counts: &counts, last_update: updated };

    let mut buf = Buffer::empty(AREA);
    ChartWidget::new(input).render(AREA, &mut buf);

    assert!(row(&buf, 1).contains("Updated: 09:07:03"));
    assert!(row(&buf, 37).contains("Cre A"));
}

#[test]
fn test_tiny_area_does_not_panic() {
    let labels = LabelSet::cognitive();
    let display = DisplayMap::from(vec![50.0, 1.0, 0.0, 7.0]);
    let counts = CountMap::from(vec![50, 1, 0, 7]);
    for (w, h) in [(0, 0), (1, 1), (5, 3), (20, 4)] {
        let area = Rect::new(0, 0, w, h);
        let mut buf = Buffer::empty(area);
        let input = ChartInput { labels: &labels, display: &display, counts: &counts, last_update: None };
        ChartWidget::new(input).render(area, &mut buf);
    }
}
