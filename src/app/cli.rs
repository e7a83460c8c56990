use crate::config::ConfigOverrides;
use crate::usage_api::{Period, ServiceId};
use clap::Parser;
use std::path::PathBuf;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("USAGE_DASH_GIT_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "usage-dash")]
#[command(about = "Terminal dashboard for per-service bot message and API usage")]
#[command(version = VERSION)]
pub struct Cli {
    /// YAML config file (default: ~/.usage-dashboard/config.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend API root, e.g. https://platform.example.com/api
    #[arg(long, env = "USAGE_DASH_BASE_URL")]
    pub base_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, env = "USAGE_DASH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Initial reporting period: 7d, 30d or 90d
    #[arg(long)]
    pub period: Option<Period>,

    /// Service to select first (falls back to the first listed service)
    #[arg(long)]
    pub service: Option<String>,

    /// Run one fetch cycle without the TUI and print the result
    #[arg(long)]
    pub headless: bool,

    /// Print the headless result as JSON
    #[arg(long, requires = "headless")]
    pub json: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            period: self.period,
        }
    }

    pub fn preferred_service(&self) -> Option<ServiceId> {
        self.service
            .as_deref()
            .map(ServiceId::new)
            .filter(|id| !id.is_empty())
    }
}
