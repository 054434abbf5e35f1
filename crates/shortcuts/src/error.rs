//! Error types for the shortcut dispatcher.
//!
//! Invariants:
//! - None of these errors is ever surfaced for a key press; they only guard
//!   subscription management.

use thiserror::Error;

/// Errors raised when attaching to the dispatcher or its event source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShortcutError {
    /// The key event source is not running.
    #[error("key event source is stopped")]
    SourceStopped,

    /// The dispatcher has been shut down and releases no new listeners.
    #[error("shortcut service has been shut down")]
    ShutDown,
}
