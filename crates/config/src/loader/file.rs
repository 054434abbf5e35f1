//! JSON configuration file loading.
//!
//! Invariants:
//! - An explicit path wins over `ZSKARTE_SHORTCUTS_CONFIG`.
//! - A path that does not exist leaves the loader untouched.
//! - Only keys present in the file overwrite loader values.

use std::path::PathBuf;

use serde::Deserialize;

use super::builder::ConfigLoader;
use super::env::env_var_or_none;
use super::error::ConfigError;
use crate::constants::ENV_CONFIG_PATH;
use crate::types::{LoggingConfig, ShortcutOverrides};

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    overrides: Option<ShortcutOverrides>,
    prevent_default: Option<bool>,
    channel_capacity: Option<usize>,
    log: Option<LoggingConfig>,
}

fn resolve_path(loader: &ConfigLoader) -> Option<PathBuf> {
    loader
        .config_path()
        .cloned()
        .or_else(|| env_var_or_none(ENV_CONFIG_PATH).map(PathBuf::from))
}

/// Apply the configuration file, if any, to the loader.
pub fn apply_file(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let Some(path) = resolve_path(loader) else {
        return Ok(());
    };

    if !path.exists() {
        tracing::debug!(path = %path.display(), "Shortcut config file not found, using defaults");
        return Ok(());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.clone(),
        source,
    })?;
    let file: ConfigFile =
        serde_json::from_str(&content).map_err(|e| ConfigError::ConfigFileParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

    if let Some(overrides) = file.overrides {
        for (command, spec) in overrides.overrides {
            loader.set_override(command, spec);
        }
    }
    if file.prevent_default.is_some() {
        loader.set_prevent_default(file.prevent_default);
    }
    if file.channel_capacity.is_some() {
        loader.set_channel_capacity(file.channel_capacity);
    }
    if let Some(log) = file.log {
        loader.set_log_level(Some(log.level));
        loader.set_log_json(Some(log.json));
    }

    tracing::debug!(path = %path.display(), "Loaded shortcut config file");
    Ok(())
}
