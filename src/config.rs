use crate::usage_api::Period;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Dashboard settings loaded from `config.yaml`. Every field has a default so
/// an absent or empty file yields a usable configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Backend API root, e.g. `https://platform.example.com/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token attached to every request when present.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub default_period: Period,
    /// Maximum number of recent messages shown in the activity feed.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// When set, a refresh is issued on this interval.
    #[serde(default)]
    pub auto_refresh_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost/api".to_string()
}

fn default_recent_limit() -> usize {
    50
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            default_period: Period::default(),
            recent_limit: default_recent_limit(),
            request_timeout_secs: default_request_timeout_secs(),
            tick_rate_ms: default_tick_rate_ms(),
            auto_refresh_secs: None,
        }
    }
}

/// Values taken from CLI flags or the environment, applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub period: Option<Period>,
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file as YAML: {}", path.display()))?;
        Ok(config)
    }

    /// Loads `path` when given (it must exist), otherwise the default location
    /// if a file is there, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>, default_path: Option<&Path>) -> Result<Self> {
        match (path, default_path) {
            (Some(explicit), _) => Self::load(explicit),
            (None, Some(fallback)) if fallback.exists() => Self::load(fallback),
            _ => Ok(Self::default()),
        }
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(base_url) = &overrides.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(token) = &overrides.token {
            self.token = Some(token.clone());
        }
        if let Some(period) = overrides.period {
            self.default_period = period;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            anyhow::bail!("base_url must not be empty");
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            );
        }
        if self.recent_limit == 0 {
            anyhow::bail!("recent_limit must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be at least 1");
        }
        if self.tick_rate_ms == 0 {
            anyhow::bail!("tick_rate_ms must be at least 1");
        }
        if self.auto_refresh_secs == Some(0) {
            anyhow::bail!("auto_refresh_secs must be at least 1 when set");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn auto_refresh(&self) -> Option<Duration> {
        self.auto_refresh_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
