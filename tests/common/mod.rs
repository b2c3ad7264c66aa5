#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::Cell;
use std::collections::HashMap;
use stockguess::domain::calendar::is_trading_day;
use stockguess::domain::error::GameError;
pub use stockguess::domain::price::{PricePoint, Series};
use stockguess::domain::session::GameSession;
use stockguess::ports::market_data_port::MarketDataPort;
use stockguess::ports::presentation_port::{GameFields, MessageKind, PresentationPort};

pub enum MockReply {
    Series(Series),
    RateLimited,
    InvalidSymbol,
    Malformed,
}

pub struct MockDataPort {
    pub replies: HashMap<String, MockReply>,
    pub calls: Cell<usize>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: Cell::new(0),
        }
    }

    pub fn with_series(mut self, symbol: &str, series: Series) -> Self {
        self.replies
            .insert(symbol.to_string(), MockReply::Series(series));
        self
    }

    pub fn with_reply(mut self, symbol: &str, reply: MockReply) -> Self {
        self.replies.insert(symbol.to_string(), reply);
        self
    }
}

impl MarketDataPort for MockDataPort {
    fn fetch_daily_series(&self, symbol: &str) -> Result<Series, GameError> {
        self.calls.set(self.calls.get() + 1);
        match self.replies.get(symbol) {
            Some(MockReply::Series(series)) => Ok(series.clone()),
            Some(MockReply::RateLimited) => Err(GameError::RateLimited {
                note: "Our standard API call frequency is 5 calls per minute.".into(),
            }),
            Some(MockReply::Malformed) => Err(GameError::MalformedResponse {
                reason: "missing series".into(),
            }),
            Some(MockReply::InvalidSymbol) | None => Err(GameError::InvalidSymbol {
                symbol: symbol.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Chart(String, Vec<PricePoint>),
    Append(PricePoint),
    Message(MessageKind, String),
    Fields(GameFields),
    Loading(bool),
    Reset,
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub events: Vec<Event>,
}

impl RecordingPresenter {
    pub fn messages(&self) -> Vec<(MessageKind, String)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Message(kind, text) => Some((*kind, text.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn last_message(&self) -> Option<(MessageKind, String)> {
        self.messages().pop()
    }

    pub fn last_fields(&self) -> Option<GameFields> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Fields(f) => Some(f.clone()),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl PresentationPort for RecordingPresenter {
    fn render_chart(&mut self, symbol: &str, window: &[PricePoint]) {
        self.events
            .push(Event::Chart(symbol.to_string(), window.to_vec()));
    }

    fn append_point(&mut self, point: &PricePoint) {
        self.events.push(Event::Append(*point));
    }

    fn show_message(&mut self, kind: MessageKind, text: &str) {
        self.events.push(Event::Message(kind, text.to_string()));
    }

    fn set_fields(&mut self, fields: &GameFields) {
        self.events.push(Event::Fields(fields.clone()));
    }

    fn show_loading(&mut self, loading: bool) {
        self.events.push(Event::Loading(loading));
    }

    fn reset(&mut self) {
        self.events.push(Event::Reset);
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn make_series(points: &[(&str, f64)]) -> Series {
    Series::from_points(
        points
            .iter()
            .map(|(d, c)| PricePoint::new(parse_date(d), *c))
            .collect(),
    )
}

/// Every trading day from `from` to `to` inclusive, closes 100, 101, ...
pub fn trading_day_series(from: NaiveDate, to: NaiveDate) -> Series {
    let mut points = Vec::new();
    let mut day = from;
    let mut close = 100.0;
    while day <= to {
        if is_trading_day(day) {
            points.push(PricePoint::new(day, close));
            close += 1.0;
        }
        day += Duration::days(1);
    }
    Series::from_points(points)
}

pub type TestSession = GameSession<MockDataPort, RecordingPresenter, StdRng>;

pub fn session_with(port: MockDataPort, seed: u64) -> TestSession {
    GameSession::new(port, RecordingPresenter::default(), StdRng::seed_from_u64(seed))
}
