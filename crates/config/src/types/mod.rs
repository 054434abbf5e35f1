//! Configuration type definitions for the shortcut dispatcher.
//!
//! Responsibilities:
//! - Define bindable command identifiers and user overrides.
//! - Define the dispatcher and logging configuration with serde defaults.
//!
//! Does NOT handle:
//! - Configuration loading from files or environment variables (see `loader` module).
//! - Combination parsing or validation (see `keybind` module at crate root).

pub mod keybind;
mod shortcut;

pub use keybind::{ShortcutCommand, ShortcutOverrides};
pub use shortcut::{
    LoggingConfig, ShortcutConfig, default_channel_capacity, default_log_level,
    default_prevent_default,
};
