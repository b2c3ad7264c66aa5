//! Domain error types.

/// Top-level error type for stockguess.
///
/// Game and provider variants display the sentence shown to the player.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Please enter a stock ticker symbol.")]
    EmptySymbol,

    #[error("Invalid stock symbol. Please try again with a valid ticker symbol.")]
    InvalidSymbol { symbol: String },

    #[error("API call frequency limit reached. Please try again in a minute.")]
    RateLimited { note: String },

    #[error("Unable to fetch stock data. Please check the symbol and try again.")]
    MalformedResponse { reason: String },

    #[error("Unable to reach the market data provider: {reason}")]
    Transport { reason: String },

    #[error("Not enough historical data for this date range.")]
    InsufficientHistory { target: chrono::NaiveDate },

    #[error("No more data available. Game over!")]
    SeriesExhausted,

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&GameError> for std::process::ExitCode {
    fn from(err: &GameError) -> Self {
        let code: u8 = match err {
            GameError::Io(_) => 1,
            GameError::ConfigParse { .. }
            | GameError::ConfigMissing { .. }
            | GameError::ConfigInvalid { .. } => 2,
            GameError::InvalidSymbol { .. }
            | GameError::RateLimited { .. }
            | GameError::MalformedResponse { .. }
            | GameError::Transport { .. } => 3,
            GameError::EmptySymbol
            | GameError::InsufficientHistory { .. }
            | GameError::SeriesExhausted => 4,
        };
        std::process::ExitCode::from(code)
    }
}
