//! SVG line chart of the revealed price window.

use crate::domain::price::PricePoint;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 320.0;
const PADDING: f64 = 48.0;

pub fn format_price_chart(symbol: &str, window: &[PricePoint]) -> String {
    let title = format!("{} Stock Price History", symbol);
    if window.is_empty() {
        return format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH:.0}" height="{HEIGHT:.0}"><title>{title}</title><text x="{PADDING:.0}" y="{PADDING:.0}">No price data available.</text></svg>
"#
        );
    }

    let min_close = window.iter().map(|p| p.close).fold(f64::INFINITY, f64::min);
    let max_close = window
        .iter()
        .map(|p| p.close)
        .fold(f64::NEG_INFINITY, f64::max);

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let range = max_close - min_close;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if window.len() > 1 {
        plot_width / (window.len() - 1) as f64
    } else {
        0.0
    };

    let coords: Vec<(f64, f64)> = window
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = PADDING + i as f64 * scale_x;
            let y = HEIGHT - PADDING - (point.close - min_close) * scale_y;
            (x, y)
        })
        .collect();

    let polyline = coords
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ");

    let markers: String = coords
        .iter()
        .zip(window)
        .map(|((x, y), point)| {
            format!(
                r##"  <circle cx="{x:.1}" cy="{y:.1}" r="4" fill="#667eea" stroke="#fff" stroke-width="2"><title>{} ${:.2}</title></circle>
"##,
                point.date.format("%b %-d, %Y"),
                point.close
            )
        })
        .collect();

    let first = window[0].date.format("%b %-d, %Y");
    let last = window[window.len() - 1].date.format("%b %-d, %Y");
    let axis_y = HEIGHT - PADDING;
    let axis_x = WIDTH - PADDING;

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH:.0}" height="{HEIGHT:.0}" viewBox="0 0 {WIDTH:.0} {HEIGHT:.0}">
  <title>{title}</title>
  <rect width="100%" height="100%" fill="white"/>
  <text x="{mid:.0}" y="24" text-anchor="middle" font-family="sans-serif" font-size="16">{title}</text>
  <line x1="{PADDING:.0}" y1="{PADDING:.0}" x2="{PADDING:.0}" y2="{axis_y:.0}" stroke="rgba(0,0,0,0.3)"/>
  <line x1="{PADDING:.0}" y1="{axis_y:.0}" x2="{axis_x:.0}" y2="{axis_y:.0}" stroke="rgba(0,0,0,0.3)"/>
  <text x="4" y="{PADDING:.0}" font-family="sans-serif" font-size="11">${max_close:.2}</text>
  <text x="4" y="{axis_y:.0}" font-family="sans-serif" font-size="11">${min_close:.2}</text>
  <text x="{PADDING:.0}" y="{label_y:.0}" font-family="sans-serif" font-size="11">{first}</text>
  <text x="{axis_x:.0}" y="{label_y:.0}" text-anchor="end" font-family="sans-serif" font-size="11">{last}</text>
  <polyline fill="none" stroke="#667eea" stroke-width="3" points="{polyline}"/>
{markers}</svg>
"##,
        mid = WIDTH / 2.0,
        label_y = HEIGHT - PADDING / 2.0,
    )
}
