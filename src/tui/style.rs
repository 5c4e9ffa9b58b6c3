//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

use crate::engine::PaybackVerdict;

/// Yearly production line color.
pub const PRODUCTION_COLOR: Color = Color::Yellow;
/// Mean production reference line color.
pub const MEAN_COLOR: Color = Color::Red;
/// Cumulative cash-flow line color.
pub const CASH_FLOW_COLOR: Color = Color::Cyan;
/// Zero (break-even) reference line color.
pub const ZERO_COLOR: Color = Color::DarkGray;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Error text color.
pub const ERROR_FG: Color = Color::Red;

/// Returns the status color for a payback verdict.
pub fn verdict_color(verdict: PaybackVerdict) -> Color {
    match verdict {
        PaybackVerdict::Strong => Color::Green,
        PaybackVerdict::Slow => Color::Yellow,
        PaybackVerdict::NotReached => Color::Red,
    }
}

/// Computes Y-axis bounds over several series with 10% padding.
pub fn auto_bounds_y(series: &[&[(f64, f64)]]) -> [f64; 2] {
    let all = series.iter().flat_map(|s| s.iter()).map(|&(_, y)| y);
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}

/// X-axis bounds covering years `1..=last`, at least one year wide.
pub fn year_bounds(last: u32) -> [f64; 2] {
    [1.0, f64::from(last.max(2))]
}
