//! Error types for configuration loading.
//!
//! Invariants:
//! - All error variants include context for debugging (variable names, paths).

use std::path::PathBuf;
use thiserror::Error;

use crate::keybind::KeybindError;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Failed to read config file at {path}")]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {message}")]
    ConfigFileParse { path: PathBuf, message: String },

    #[error("invalid channel capacity: {message}")]
    InvalidChannelCapacity { message: String },

    #[error("invalid shortcut override: {0}")]
    Keybind(#[from] KeybindError),
}
