//! Market data access port trait.

use crate::domain::error::GameError;
use crate::domain::price::Series;

pub trait MarketDataPort {
    /// Full daily close history for `symbol`, sorted ascending by date.
    fn fetch_daily_series(&self, symbol: &str) -> Result<Series, GameError>;
}

impl<T: MarketDataPort + ?Sized> MarketDataPort for Box<T> {
    fn fetch_daily_series(&self, symbol: &str) -> Result<Series, GameError> {
        (**self).fetch_daily_series(symbol)
    }
}
