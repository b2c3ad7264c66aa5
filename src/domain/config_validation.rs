//! Configuration validation.
//!
//! Validates all config fields before a game session is built.

use crate::domain::error::GameError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_OUTPUT_SIZE: &str = "full";
pub const DEFAULT_TIMEOUT_SECS: i64 = 30;
pub const DEFAULT_RESET_DELAY_MS: i64 = 3000;

/// Validates the whole file; the provider section is skipped when the game
/// plays offline from `[game] csv_dir`.
pub fn validate_config(config: &dyn ConfigPort) -> Result<(), GameError> {
    if config.get_string("game", "csv_dir").is_none() {
        validate_provider_config(config)?;
    }
    validate_game_config(config)
}

pub fn validate_provider_config(config: &dyn ConfigPort) -> Result<(), GameError> {
    validate_api_key(config)?;
    validate_base_url(config)?;
    validate_output_size(config)?;
    validate_timeout(config)?;
    Ok(())
}

pub fn validate_game_config(config: &dyn ConfigPort) -> Result<(), GameError> {
    validate_reset_delay(config)
}

fn validate_api_key(config: &dyn ConfigPort) -> Result<(), GameError> {
    match config.get_string("provider", "api_key") {
        None => Err(GameError::ConfigMissing {
            section: "provider".to_string(),
            key: "api_key".to_string(),
        }),
        Some(key) if key.trim().is_empty() => Err(GameError::ConfigInvalid {
            section: "provider".to_string(),
            key: "api_key".to_string(),
            reason: "api_key must not be empty".to_string(),
        }),
        Some(_) => Ok(()),
    }
}

fn validate_base_url(config: &dyn ConfigPort) -> Result<(), GameError> {
    let Some(url) = config.get_string("provider", "base_url") else {
        return Ok(());
    };
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(GameError::ConfigInvalid {
            section: "provider".to_string(),
            key: "base_url".to_string(),
            reason: "base_url must start with http:// or https://".to_string(),
        });
    }
    Ok(())
}

fn validate_output_size(config: &dyn ConfigPort) -> Result<(), GameError> {
    let value = config
        .get_string("provider", "output_size")
        .unwrap_or_else(|| DEFAULT_OUTPUT_SIZE.to_string());
    if value != "full" && value != "compact" {
        return Err(GameError::ConfigInvalid {
            section: "provider".to_string(),
            key: "output_size".to_string(),
            reason: format!("output_size must be full or compact, got {value}"),
        });
    }
    Ok(())
}

fn validate_timeout(config: &dyn ConfigPort) -> Result<(), GameError> {
    let value = config.get_int("provider", "timeout_secs", DEFAULT_TIMEOUT_SECS);
    if value <= 0 {
        return Err(GameError::ConfigInvalid {
            section: "provider".to_string(),
            key: "timeout_secs".to_string(),
            reason: "timeout_secs must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_reset_delay(config: &dyn ConfigPort) -> Result<(), GameError> {
    let value = config.get_int("game", "reset_delay_ms", DEFAULT_RESET_DELAY_MS);
    if value < 0 {
        return Err(GameError::ConfigInvalid {
            section: "game".to_string(),
            key: "reset_delay_ms".to_string(),
            reason: "reset_delay_ms must be non-negative".to_string(),
        });
    }
    Ok(())
}
