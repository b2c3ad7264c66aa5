//! Terminal presentation adapter.
//!
//! Draws the revealed window as a horizontal bar chart, one row per day, and
//! optionally mirrors it to an SVG file after every chart change.

use crate::adapters::chart_svg::format_price_chart;
use crate::domain::price::PricePoint;
use crate::ports::presentation_port::{GameFields, MessageKind, PresentationPort};
use chrono::NaiveDate;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::warn;

const BAR_WIDTH: usize = 40;

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// One row per close, bars scaled between the window's lowest and highest close.
pub fn format_text_chart(symbol: &str, window: &[PricePoint]) -> String {
    let mut out = format!("{} Stock Price History\n", symbol);
    if window.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    let min = window.iter().map(|p| p.close).fold(f64::INFINITY, f64::min);
    let max = window.iter().map(|p| p.close).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    for point in window {
        let len = if range > 0.0 {
            1 + ((point.close - min) / range * (BAR_WIDTH - 1) as f64).round() as usize
        } else {
            BAR_WIDTH / 2
        };
        out.push_str(&format!(
            "  {:>12}  {:>10}  {}\n",
            format_date(point.date),
            format_price(point.close),
            "█".repeat(len)
        ));
    }
    out
}

pub struct TerminalAdapter<W: Write> {
    out: W,
    chart_path: Option<PathBuf>,
    symbol: String,
    window: Vec<PricePoint>,
}

impl TerminalAdapter<io::Stdout> {
    pub fn stdout(chart_path: Option<PathBuf>) -> Self {
        Self::new(io::stdout(), chart_path)
    }
}

impl<W: Write> TerminalAdapter<W> {
    pub fn new(out: W, chart_path: Option<PathBuf>) -> Self {
        Self {
            out,
            chart_path,
            symbol: String::new(),
            window: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!(error = %e, "failed to write to terminal");
        }
    }

    fn redraw(&mut self) {
        let chart = format_text_chart(&self.symbol, &self.window);
        self.emit(&chart);

        if let Some(path) = &self.chart_path {
            let svg = format_price_chart(&self.symbol, &self.window);
            if let Err(e) = fs::write(path, svg) {
                warn!(path = %path.display(), error = %e, "failed to write svg chart");
            }
        }
    }
}

impl<W: Write> PresentationPort for TerminalAdapter<W> {
    fn render_chart(&mut self, symbol: &str, window: &[PricePoint]) {
        self.symbol = symbol.to_string();
        self.window = window.to_vec();
        self.redraw();
    }

    fn append_point(&mut self, point: &PricePoint) {
        self.window.push(*point);
        self.redraw();
    }

    fn show_message(&mut self, kind: MessageKind, text: &str) {
        let marker = match kind {
            MessageKind::Success => "✓",
            MessageKind::Error => "✗",
        };
        self.emit(&format!("{} {}\n", marker, text));
    }

    fn set_fields(&mut self, fields: &GameFields) {
        self.emit(&format!(
            "{} | {} | {} | Score: {}\n",
            fields.symbol,
            format_date(fields.date),
            format_price(fields.price),
            fields.score
        ));
    }

    fn show_loading(&mut self, loading: bool) {
        if loading {
            self.emit("Loading market data...\n");
        }
    }

    fn reset(&mut self) {
        self.symbol.clear();
        self.window.clear();
        if let Some(path) = &self.chart_path {
            if let Err(e) = fs::remove_file(path) {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %e, "failed to remove svg chart");
                }
            }
        }
        self.emit("Game reset. Enter a ticker symbol to play again.\n");
    }
}
