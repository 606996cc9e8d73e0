use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, DEFAULT_LOG_FILTER};

/// Send tracing output to the log file in the data directory. The TUI owns
/// the terminal, so nothing is written to stdout or stderr.
pub(crate) fn init(config: &Config) -> Result<()> {
    let path = config.log_path();
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Could not open log file: {}", path.display()))?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Could not install log subscriber: {e}"))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "pesowise starting");
    Ok(())
}
