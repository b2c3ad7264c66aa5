//! Alpha Vantage daily time-series adapter.

use crate::domain::config_validation::{DEFAULT_BASE_URL, DEFAULT_OUTPUT_SIZE, DEFAULT_TIMEOUT_SECS};
use crate::domain::error::GameError;
use crate::domain::price::{PricePoint, Series};
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;
use chrono::NaiveDate;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

const TIME_SERIES_KEY: &str = "Time Series (Daily)";

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "4. close")]
    close: String,
}

pub struct AlphaVantageAdapter {
    client: Client,
    base_url: String,
    api_key: String,
    output_size: String,
}

impl AlphaVantageAdapter {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        output_size: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GameError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GameError::Transport {
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            output_size: output_size.into(),
        })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, GameError> {
        let api_key = config
            .get_string("provider", "api_key")
            .ok_or_else(|| GameError::ConfigMissing {
                section: "provider".into(),
                key: "api_key".into(),
            })?;
        let base_url = config
            .get_string("provider", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let output_size = config
            .get_string("provider", "output_size")
            .unwrap_or_else(|| DEFAULT_OUTPUT_SIZE.to_string());
        let timeout_secs = config.get_int("provider", "timeout_secs", DEFAULT_TIMEOUT_SECS);

        Self::new(
            api_key,
            base_url,
            output_size,
            Duration::from_secs(timeout_secs.max(1) as u64),
        )
    }

    pub fn request_url(&self, symbol: &str) -> Result<Url, GameError> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("outputsize", self.output_size.as_str()),
                ("apikey", self.api_key.as_str()),
            ],
        )
        .map_err(|e| GameError::Transport {
            reason: format!("invalid provider url {}: {}", self.base_url, e),
        })
    }
}

impl MarketDataPort for AlphaVantageAdapter {
    fn fetch_daily_series(&self, symbol: &str) -> Result<Series, GameError> {
        let url = self.request_url(symbol)?;
        debug!(symbol, base_url = %self.base_url, "requesting daily series");

        let body = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.text())
            .map_err(|e| {
                // the url carries the api key
                let e = e.without_url();
                warn!(symbol, error = %e, "provider request failed");
                GameError::Transport {
                    reason: e.to_string(),
                }
            })?;

        let series = parse_daily_series(symbol, &body)?;
        debug!(symbol, closes = series.len(), "daily series received");
        Ok(series)
    }
}

/// Phrases the provider uses when a key has exceeded its request quota.
const RATE_LIMIT_MARKERS: [&str; 3] = ["call frequency", "rate limit", "requests per"];

/// A top-level field counts only when it holds non-blank text.
fn text_field<'a>(json: &'a Value, key: &str) -> Option<&'a str> {
    json.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn is_rate_limit_notice(text: &str) -> bool {
    let text = text.to_lowercase();
    RATE_LIMIT_MARKERS.iter().any(|m| text.contains(*m))
}

/// Classifies a provider body: unknown symbol first, then rate limiting,
/// then a missing or unreadable series.
///
/// `Information` is only a rate limit when it says so; other notices, such
/// as premium-only parameters, end up as a malformed response.
pub fn parse_daily_series(symbol: &str, body: &str) -> Result<Series, GameError> {
    let json: Value = serde_json::from_str(body).map_err(|e| GameError::Transport {
        reason: format!("invalid JSON from provider: {e}"),
    })?;

    if text_field(&json, "Error Message").is_some() {
        return Err(GameError::InvalidSymbol {
            symbol: symbol.to_string(),
        });
    }

    let information = text_field(&json, "Information");
    if let Some(note) = text_field(&json, "Note")
        .or(information.filter(|text| is_rate_limit_notice(text)))
    {
        return Err(GameError::RateLimited {
            note: note.to_string(),
        });
    }

    let raw = json
        .get(TIME_SERIES_KEY)
        .ok_or_else(|| GameError::MalformedResponse {
            reason: match information {
                Some(text) => format!("missing \"{TIME_SERIES_KEY}\": {text}"),
                None => format!("missing \"{TIME_SERIES_KEY}\""),
            },
        })?;

    let bars: BTreeMap<String, DailyBar> =
        serde_json::from_value(raw.clone()).map_err(|e| GameError::MalformedResponse {
            reason: e.to_string(),
        })?;

    let points = bars
        .into_iter()
        .map(|(date, bar)| {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
                GameError::MalformedResponse {
                    reason: format!("invalid date {date}: {e}"),
                }
            })?;
            let close: f64 = bar.close.trim().parse().map_err(|e| {
                GameError::MalformedResponse {
                    reason: format!("invalid close on {date}: {e}"),
                }
            })?;
            if !(close.is_finite() && close > 0.0) {
                return Err(GameError::MalformedResponse {
                    reason: format!("non-positive close on {date}: {close}"),
                });
            }
            Ok(PricePoint::new(date, close))
        })
        .collect::<Result<Vec<_>, GameError>>()?;

    Ok(Series::from_points(points))
}
