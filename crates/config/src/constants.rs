//! Centralized constants for the ZS Karte shortcut workspace.

// =============================================================================
// Dispatcher Defaults
// =============================================================================

/// Default capacity of the key event broadcast channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Upper bound for the key event channel capacity.
pub const MAX_CHANNEL_CAPACITY: usize = 4096;

/// Default log filter directive.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Environment Variables
// =============================================================================

/// Path of the JSON configuration file.
pub const ENV_CONFIG_PATH: &str = "ZSKARTE_SHORTCUTS_CONFIG";

/// Overrides `ShortcutConfig::prevent_default`.
pub const ENV_PREVENT_DEFAULT: &str = "ZSKARTE_SHORTCUTS_PREVENT_DEFAULT";

/// Overrides `ShortcutConfig::channel_capacity`.
pub const ENV_CHANNEL_CAPACITY: &str = "ZSKARTE_SHORTCUTS_CHANNEL_CAPACITY";

/// Overrides `LoggingConfig::level`.
pub const ENV_LOG_LEVEL: &str = "ZSKARTE_LOG_LEVEL";

/// Overrides `LoggingConfig::json`.
pub const ENV_LOG_JSON: &str = "ZSKARTE_LOG_JSON";
