//! Game session: the one owner of game state.
//!
//! Every mutating operation takes `&mut self`, so a start that is still
//! waiting on the data port cannot overlap a prediction or a second start.

use crate::domain::align::align;
use crate::domain::calendar::random_historical_date;
use crate::domain::error::GameError;
use crate::domain::game::{GameState, PredictionOutcome};
use crate::domain::price::Direction;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::presentation_port::{GameFields, MessageKind, PresentationPort};
use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, info, warn};

pub struct GameSession<D, P, R> {
    data_port: D,
    presenter: P,
    rng: R,
    state: Option<GameState>,
}

impl<D, P, R> GameSession<D, P, R>
where
    D: MarketDataPort,
    P: PresentationPort,
    R: Rng,
{
    pub fn new(data_port: D, presenter: P, rng: R) -> Self {
        Self {
            data_port,
            presenter,
            rng,
            state: None,
        }
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.active)
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Starts a new game for `symbol` on a random date before `today`.
    ///
    /// On failure the previous game, if any, is left exactly as it was.
    pub fn start_game(&mut self, symbol: &str, today: NaiveDate) -> Result<(), GameError> {
        let symbol = symbol.trim().to_uppercase();
        let state = match self.prepare(&symbol, today) {
            Ok(state) => state,
            Err(e) => {
                warn!(symbol = %symbol, error = ?e, "game start failed");
                self.presenter.show_message(MessageKind::Error, &e.to_string());
                return Err(e);
            }
        };

        info!(
            symbol = %state.symbol,
            start_date = %state.start_date,
            closes = state.series.len(),
            start_index = state.revealed_up_to,
            "game started"
        );
        self.presenter.render_chart(&state.symbol, state.window());
        if let Some(fields) = fields_for(&state) {
            self.presenter.set_fields(&fields);
        }
        self.presenter.show_message(
            MessageKind::Success,
            &format!(
                "Game started! Predict the next day's movement for {}.",
                state.symbol
            ),
        );
        self.state = Some(state);
        Ok(())
    }

    fn prepare(&mut self, symbol: &str, today: NaiveDate) -> Result<GameState, GameError> {
        if symbol.is_empty() {
            return Err(GameError::EmptySymbol);
        }
        let start_date = random_historical_date(today, &mut self.rng);
        debug!(symbol, %start_date, "drew start date");
        self.presenter.show_loading(true);
        let fetched = self.data_port.fetch_daily_series(symbol);
        self.presenter.show_loading(false);
        let series = fetched?;
        let alignment = align(&series, start_date)?;
        Ok(GameState::new(symbol, series, start_date, &alignment))
    }

    /// Scores `guess` against the next close.
    ///
    /// Returns `Ok(None)` when no game is active. Running out of closes ends
    /// the game and returns [`GameError::SeriesExhausted`].
    pub fn predict(&mut self, guess: Direction) -> Result<Option<PredictionOutcome>, GameError> {
        let Some(state) = self.state.as_mut() else {
            return Ok(None);
        };

        match state.predict(guess) {
            Ok(Some(outcome)) => {
                debug!(
                    guess = %outcome.guess,
                    actual = %outcome.actual,
                    score = outcome.score,
                    "prediction scored"
                );
                self.presenter.append_point(&outcome.revealed);
                if let Some(fields) = fields_for(state) {
                    self.presenter.set_fields(&fields);
                }
                let kind = if outcome.correct {
                    MessageKind::Success
                } else {
                    MessageKind::Error
                };
                self.presenter.show_message(kind, &outcome.message());
                Ok(Some(outcome))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                self.presenter.show_message(MessageKind::Error, &e.to_string());
                self.end_game();
                Err(e)
            }
        }
    }

    /// Deactivates the current game and shows the final score.
    ///
    /// The state is kept until [`reset_game`](Self::reset_game) is called.
    pub fn end_game(&mut self) -> Option<u32> {
        let state = self.state.as_mut()?;
        state.active = false;
        let score = state.score;
        info!(symbol = %state.symbol, score, "game ended");
        self.presenter.show_message(
            MessageKind::Success,
            &format!("Game ended! Final score: {score} correct predictions."),
        );
        Some(score)
    }

    /// Discards the game state and clears the presentation.
    pub fn reset_game(&mut self) {
        self.state = None;
        self.presenter.reset();
    }
}

fn fields_for(state: &GameState) -> Option<GameFields> {
    state.current().map(|p| GameFields {
        symbol: state.symbol.clone(),
        date: p.date,
        price: p.close,
        score: state.score,
    })
}
