//! Diagnostic logging to a file. The terminal belongs to the TUI, so nothing
//! is ever written to stdout or stderr once the dashboard is running.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILTER_ENV: &str = "USAGE_DASH_LOG";

fn build_env_filter(raw: Option<&str>) -> EnvFilter {
    let base = "info,ureq=warn,rustls=warn";
    match raw {
        Some(filter) => EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(base)),
        None => EnvFilter::new(base),
    }
}

/// Installs a file-backed subscriber writing to `log_path`.
pub fn init_file_logging(log_path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let filter = build_env_filter(std::env::var(LOG_FILTER_ENV).ok().as_deref());
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}
