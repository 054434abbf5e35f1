//! Tests for the configuration loader builder.
//!
//! Invariants:
//! - Tests touching environment variables use `serial_test` and `global_test_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod env_tests;
pub mod file_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
