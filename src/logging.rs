//! Tracing subscriber setup
//!
//! Logs go to stderr so they never mix with the dialog on stdout.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{PogodaError, Result};

/// Filter from `RUST_LOG` when set, otherwise the configured level
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(config))
        .with_target(false);

    let installed = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| PogodaError::config(format!("Failed to initialize logging: {e}")))
}
