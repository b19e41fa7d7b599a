//! Configuration validation

use super::*;
use crate::error::{MochowError, Result};

const MAX_TIMEOUT_MS: u64 = 600_000;
const MAX_RETRIES: u32 = 10;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_client_config(&config.client)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validate connection settings
pub fn validate_client_config(config: &ClientConfig) -> Result<()> {
    if config.endpoint.is_empty() {
        return Err(MochowError::Config(
            "Endpoint is required".to_string()
        ));
    }

    if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
        return Err(MochowError::Config(
            "Endpoint must start with http:// or https://".to_string()
        ));
    }

    if config.account.is_empty() {
        return Err(MochowError::Config(
            "Account is required".to_string()
        ));
    }

    if config.api_key.expose_secret().is_empty() {
        return Err(MochowError::Config(
            "API key is required".to_string()
        ));
    }

    if config.timeout_ms == 0 {
        return Err(MochowError::Config(
            "Timeout must be greater than 0".to_string()
        ));
    }

    if config.timeout_ms > MAX_TIMEOUT_MS {
        return Err(MochowError::Config(
            format!("Timeout too large (max: {} ms)", MAX_TIMEOUT_MS)
        ));
    }

    if config.max_retries > MAX_RETRIES {
        return Err(MochowError::Config(
            format!("Max retries too large (max: {})", MAX_RETRIES)
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    match config.format.as_str() {
        "json" | "compact" | "pretty" => Ok(()),
        other => Err(MochowError::Config(
            format!("Unknown log format: {}", other)
        )),
    }
}
