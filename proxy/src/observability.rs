//! Logging setup.
//!
//! Installs a `tracing_subscriber` fmt subscriber filtered by
//! [`LogConfig::filter`], writing JSON or plain lines to stdout.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Builds the env filter for `config`.
pub fn build_filter(config: &LogConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter {:?}", config.filter))
}

/// Installs the global subscriber.
///
/// Fails if the filter does not parse or a subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(build_filter(config)?);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install tracing subscriber")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        filter = %config.filter,
        json = config.json,
        "Logging initialized"
    );

    Ok(())
}
