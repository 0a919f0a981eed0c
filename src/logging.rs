//! Tracing subscriber setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Build the filter for `config`
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(format!("dbptools={},warn", config.level))
        .map_err(|e| Error::config(format!("invalid log level '{}': {e}", config.level)))
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns `Error::Config` for an invalid level or if a global subscriber is
/// already installed
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;

    let installed = match config.format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    installed.map_err(|e| Error::config(format!("failed to install tracing subscriber: {e}")))
}
