//! CSV file market data adapter for offline play.
//!
//! Reads `{base_path}/{SYMBOL}.csv`. The header row must name a `date`
//! column (`YYYY-MM-DD`) and a `close` column; any other columns are ignored.

use crate::domain::error::GameError;
use crate::domain::price::{PricePoint, Series};
use crate::ports::market_data_port::MarketDataPort;
use chrono::NaiveDate;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn malformed(reason: impl Into<String>) -> GameError {
    GameError::MalformedResponse {
        reason: reason.into(),
    }
}

impl MarketDataPort for CsvAdapter {
    fn fetch_daily_series(&self, symbol: &str) -> Result<Series, GameError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => GameError::InvalidSymbol {
                symbol: symbol.to_string(),
            },
            _ => GameError::Transport {
                reason: format!("failed to read {}: {}", path.display(), e),
            },
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| malformed(format!("CSV header error: {}", e)))?
            .clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| malformed(format!("missing {} column", name)))
        };
        let date_col = column("date")?;
        let close_col = column("close")?;

        let mut points = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| malformed(format!("CSV parse error: {}", e)))?;

            let date_str = record
                .get(date_col)
                .ok_or_else(|| malformed("missing date value"))?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
                .map_err(|e| malformed(format!("invalid date format: {}", e)))?;

            let close: f64 = record
                .get(close_col)
                .ok_or_else(|| malformed("missing close value"))?
                .trim()
                .parse()
                .map_err(|e| malformed(format!("invalid close value: {}", e)))?;
            if !(close.is_finite() && close > 0.0) {
                return Err(malformed(format!("non-positive close on {}: {}", date, close)));
            }

            points.push(PricePoint::new(date, close));
        }

        debug!(symbol, path = %path.display(), closes = points.len(), "loaded csv series");
        Ok(Series::from_points(points))
    }
}
