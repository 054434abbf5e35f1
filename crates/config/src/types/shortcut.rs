//! Dispatcher configuration types.

use serde::{Deserialize, Serialize};

use super::keybind::ShortcutOverrides;
use crate::constants::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_LOG_LEVEL};

/// Default for `ShortcutConfig::prevent_default`.
pub fn default_prevent_default() -> bool {
    true
}

/// Default for `ShortcutConfig::channel_capacity`.
pub fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

/// Default for `LoggingConfig::level`.
pub fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. `info`, `zskarte_shortcuts=debug`).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Complete dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutConfig {
    /// Per-command combination overrides.
    #[serde(default)]
    pub overrides: ShortcutOverrides,
    /// Cancel the browser default action of matched shortcuts.
    #[serde(default = "default_prevent_default")]
    pub prevent_default: bool,
    /// Capacity of the key event broadcast channel.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Logging settings.
    #[serde(default)]
    pub log: LoggingConfig,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            overrides: ShortcutOverrides::default(),
            prevent_default: default_prevent_default(),
            channel_capacity: default_channel_capacity(),
            log: LoggingConfig::default(),
        }
    }
}
