//! Environment variable parsing for configuration.
//!
//! Invariants:
//! - Environment variables overwrite values loaded from the config file.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Invalid values return `ConfigError::InvalidValue`.

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{ENV_CHANNEL_CAPACITY, ENV_LOG_JSON, ENV_LOG_LEVEL, ENV_PREVENT_DEFAULT};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(value) = env_var_or_none(ENV_PREVENT_DEFAULT) {
        loader.set_prevent_default(Some(parse_bool(ENV_PREVENT_DEFAULT, &value)?));
    }
    if let Some(value) = env_var_or_none(ENV_CHANNEL_CAPACITY) {
        let capacity: usize = value.parse().map_err(|_| ConfigError::InvalidValue {
            var: ENV_CHANNEL_CAPACITY.to_string(),
            message: "must be a positive integer".to_string(),
        })?;
        loader.set_channel_capacity(Some(capacity));
    }
    if let Some(level) = env_var_or_none(ENV_LOG_LEVEL) {
        loader.set_log_level(Some(level));
    }
    if let Some(value) = env_var_or_none(ENV_LOG_JSON) {
        loader.set_log_json(Some(parse_bool(ENV_LOG_JSON, &value)?));
    }
    Ok(())
}
