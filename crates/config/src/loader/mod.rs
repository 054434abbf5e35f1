//! Configuration loader for environment variables and files.
//!
//! Responsibilities:
//! - Load dispatcher configuration from a JSON file and environment variables.
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//!
//! Does NOT handle:
//! - Writing configuration back to disk.
//! - Applying the configuration to a running dispatcher (see shortcuts crate).
//!
//! Invariants / Assumptions:
//! - Layers are applied in call order; later layers overwrite earlier ones.
//! - A missing configuration file is not an error.

mod builder;
mod env;
mod error;
mod file;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

#[cfg(test)]
mod tests;
