//! Tracing subscriber setup for hosts embedding the dispatcher.
//!
//! `RUST_LOG` wins over the configured level when it is set.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use zskarte_config::LoggingConfig;
use zskarte_config::constants::DEFAULT_LOG_LEVEL;

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the global subscriber.
///
/// Returns false if a global subscriber was already installed.
pub fn init(config: &LoggingConfig) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(config));
    let result = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };
    result.is_ok()
}
