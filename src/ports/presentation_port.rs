//! Presentation port trait.
//!
//! The session reports every visible change through this trait and never
//! touches the screen itself.

use crate::domain::price::PricePoint;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Text fields shown next to the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GameFields {
    pub symbol: String,
    pub date: NaiveDate,
    pub price: f64,
    pub score: u32,
}

pub trait PresentationPort {
    /// Replaces the chart with `window`.
    fn render_chart(&mut self, symbol: &str, window: &[PricePoint]);

    fn append_point(&mut self, point: &PricePoint);

    fn show_message(&mut self, kind: MessageKind, text: &str);

    fn set_fields(&mut self, fields: &GameFields);

    /// Called with `true` before a fetch and `false` once it returns.
    fn show_loading(&mut self, loading: bool);

    /// Clears the chart, fields and messages.
    fn reset(&mut self);
}
