//! Game state and the reveal/scoring rule.

use crate::domain::align::Alignment;
use crate::domain::error::GameError;
use crate::domain::price::{Direction, PricePoint, Series};
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct GameState {
    pub symbol: String,
    pub series: Series,
    /// The drawn date the game was aligned on.
    pub start_date: NaiveDate,
    /// Index of the next close to be revealed.
    pub revealed_up_to: usize,
    pub score: u32,
    pub active: bool,
    window_start: usize,
}

/// Result of one prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    pub guess: Direction,
    pub actual: Direction,
    pub correct: bool,
    pub previous_close: f64,
    pub revealed: PricePoint,
    pub score: u32,
}

impl PredictionOutcome {
    /// Percentage move from the previous close to the revealed close.
    pub fn change_pct(&self) -> f64 {
        (self.revealed.close - self.previous_close) / self.previous_close * 100.0
    }

    pub fn message(&self) -> String {
        format!(
            "{} {} Price moved {:.2}% {}. Score: {}",
            if self.correct { "Correct!" } else { "Wrong!" },
            self.actual.arrow(),
            self.change_pct().abs(),
            self.actual,
            self.score
        )
    }
}

impl GameState {
    pub fn new(
        symbol: impl Into<String>,
        series: Series,
        start_date: NaiveDate,
        alignment: &Alignment,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            series,
            start_date,
            revealed_up_to: alignment.start_index,
            score: 0,
            active: true,
            window_start: alignment.start_index - alignment.initial_window.len(),
        }
    }

    /// Closes currently shown to the player.
    pub fn window(&self) -> &[PricePoint] {
        &self.series[self.window_start..self.revealed_up_to]
    }

    /// Most recently revealed close.
    pub fn current(&self) -> Option<&PricePoint> {
        self.window().last()
    }

    pub fn is_exhausted(&self) -> bool {
        self.revealed_up_to + 1 >= self.series.len()
    }

    /// Reveals the next close and scores `guess` against it.
    ///
    /// Returns `Ok(None)` when the game is not active. Once the reveal point
    /// reaches the last index the game is deactivated and
    /// [`GameError::SeriesExhausted`] is returned; the score is kept.
    pub fn predict(&mut self, guess: Direction) -> Result<Option<PredictionOutcome>, GameError> {
        if !self.active {
            return Ok(None);
        }
        if self.is_exhausted() {
            self.active = false;
            return Err(GameError::SeriesExhausted);
        }

        let previous_close = self.series[self.revealed_up_to - 1].close;
        let revealed = self.series[self.revealed_up_to];
        let actual = Direction::between(previous_close, revealed.close);
        let correct = guess == actual;
        if correct {
            self.score += 1;
        }
        self.revealed_up_to += 1;

        Ok(Some(PredictionOutcome {
            guess,
            actual,
            correct,
            previous_close,
            revealed,
            score: self.score,
        }))
    }
}
