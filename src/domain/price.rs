//! Daily close representation.

use chrono::NaiveDate;
use std::fmt;
use std::ops::Deref;

/// One trading day's closing price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Full history of daily closes for one symbol, strictly increasing by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    points: Vec<PricePoint>,
}

impl Series {
    /// Sorts by date and keeps the first close seen for each date.
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Self { points }
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

impl Deref for Series {
    type Target = [PricePoint];

    fn deref(&self) -> &[PricePoint] {
        &self.points
    }
}

/// Direction of a day-over-day close move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// `Up` only when `next` is strictly above `current`; a flat close is `Down`.
    pub fn between(current: f64, next: f64) -> Self {
        if next > current {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Up => "↗",
            Direction::Down => "↘",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}
