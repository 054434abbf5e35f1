//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Build and validate the final `ShortcutConfig`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Config file reading (delegated to file.rs).
//!
//! Invariants / Assumptions:
//! - Layers and builder methods apply in call order; the last writer wins.
//! - `build()` rejects invalid overrides and out-of-range channel capacities.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::env::apply_env;
use super::error::ConfigError;
use super::file::apply_file;
use crate::constants::MAX_CHANNEL_CAPACITY;
use crate::keybind::validate_overrides;
use crate::types::{
    LoggingConfig, ShortcutCommand, ShortcutConfig, ShortcutOverrides, default_channel_capacity,
    default_log_level, default_prevent_default,
};

/// Configuration loader that builds config from a file and environment variables.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    overrides: BTreeMap<ShortcutCommand, String>,
    prevent_default: Option<bool>,
    channel_capacity: Option<usize>,
    log_level: Option<String>,
    log_json: Option<bool>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the config file from this path instead of `ZSKARTE_SHORTCUTS_CONFIG`.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Load values from the JSON config file, if one is configured and present.
    pub fn from_file(mut self) -> Result<Self, ConfigError> {
        apply_file(&mut self)?;
        Ok(self)
    }

    /// Load values from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Bind a command to a combination spec.
    pub fn with_override(mut self, command: ShortcutCommand, spec: impl Into<String>) -> Self {
        self.set_override(command, spec.into());
        self
    }

    /// Set whether matched shortcuts cancel the browser default action.
    pub fn with_prevent_default(mut self, prevent: bool) -> Self {
        self.prevent_default = Some(prevent);
        self
    }

    /// Set the key event channel capacity.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = Some(capacity);
        self
    }

    /// Set the log filter directive.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Build the final configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidChannelCapacity` if the capacity is zero or
    /// above the maximum, and `ConfigError::Keybind` if the overrides do not validate.
    pub fn build(self) -> Result<ShortcutConfig, ConfigError> {
        let channel_capacity = self.channel_capacity.unwrap_or_else(default_channel_capacity);
        if channel_capacity == 0 || channel_capacity > MAX_CHANNEL_CAPACITY {
            return Err(ConfigError::InvalidChannelCapacity {
                message: format!(
                    "must be between 1 and {} (got {})",
                    MAX_CHANNEL_CAPACITY, channel_capacity
                ),
            });
        }

        validate_overrides(&self.overrides)?;

        Ok(ShortcutConfig {
            overrides: ShortcutOverrides {
                overrides: self.overrides,
            },
            prevent_default: self.prevent_default.unwrap_or_else(default_prevent_default),
            channel_capacity,
            log: LoggingConfig {
                level: self.log_level.unwrap_or_else(default_log_level),
                json: self.log_json.unwrap_or(false),
            },
        })
    }

    pub(crate) fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub(crate) fn set_override(&mut self, command: ShortcutCommand, spec: String) {
        self.overrides.insert(command, spec);
    }

    pub(crate) fn set_prevent_default(&mut self, prevent: Option<bool>) {
        self.prevent_default = prevent;
    }

    pub(crate) fn set_channel_capacity(&mut self, capacity: Option<usize>) {
        self.channel_capacity = capacity;
    }

    pub(crate) fn set_log_level(&mut self, level: Option<String>) {
        self.log_level = level;
    }

    pub(crate) fn set_log_json(&mut self, json: Option<bool>) {
        self.log_json = json;
    }
}
