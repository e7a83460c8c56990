//! Home-based storage paths for the dashboard under `~/.usage-dashboard/`:
//! - `config.yaml` - Optional configuration file
//! - `logs/dashboard.log` - Diagnostic log
//! - `logs/events.jsonl` - Structured event log

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

const DASHBOARD_DIR: &str = ".usage-dashboard";

/// Overrides the home directory; used by tests and sandboxed runs.
pub const HOME_OVERRIDE_ENV: &str = "USAGE_DASH_HOME";

fn base_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_OVERRIDE_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DASHBOARD_DIR))
}

/// Returns `~/.usage-dashboard/`, creating it if needed.
pub fn dashboard_home_dir() -> Result<PathBuf> {
    let dir = base_dir()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create dashboard directory: {}", dir.display()))?;
    Ok(dir)
}

/// Returns `~/.usage-dashboard/logs/`, creating it if needed.
pub fn logs_dir() -> Result<PathBuf> {
    let dir = dashboard_home_dir()?.join("logs");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create logs directory: {}", dir.display()))?;
    Ok(dir)
}

pub fn log_file_path() -> Result<PathBuf> {
    Ok(logs_dir()?.join("dashboard.log"))
}

/// Default config location. Does not create anything.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("config.yaml"))
}

#[cfg(test)]
#[path = "tests/dashboard_paths_tests.rs"]
mod tests;
