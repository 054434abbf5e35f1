//! Configuration for the ZS Karte shortcut dispatcher.
//!
//! This crate provides the shortcut combination parser, the bindable command
//! identifiers, and loaders for dispatcher configuration from files and
//! environment variables.

pub mod constants;
pub mod keybind;
mod loader;
pub mod types;

pub use keybind::{KeyCombination, KeyFilter, KeybindError, ModifierFlags};
pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{LoggingConfig, ShortcutCommand, ShortcutConfig, ShortcutOverrides};
