pub mod cli;
pub mod headless;
pub mod tui_runner;

use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::dashboard_paths;
use crate::structured_logger::StructuredLogger;
use crate::usage_api::HttpUsageApi;
use anyhow::Result;
use cli::Cli;
use std::sync::Arc;

/// Resolves the effective configuration: file (explicit or default), then
/// CLI and environment overrides, then validation.
pub fn resolve_config(cli: &Cli) -> Result<DashboardConfig> {
    let default_path = dashboard_paths::default_config_path().ok();
    let mut config =
        DashboardConfig::load_or_default(cli.config.as_deref(), default_path.as_deref())?;
    config.apply_overrides(&cli.overrides());
    config.validate()?;
    Ok(config)
}

fn open_event_log(session_id: &str) -> Option<Arc<StructuredLogger>> {
    let logs_dir = dashboard_paths::logs_dir()
        .map_err(|e| tracing::warn!(error = %e, "event log disabled"))
        .ok()?;
    match StructuredLogger::new(session_id, &logs_dir) {
        Ok(logger) => {
            tracing::info!(path = %logger.path().display(), "event log opened");
            Some(Arc::new(logger))
        }
        Err(e) => {
            tracing::warn!(error = %e, "event log disabled");
            None
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let session_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(
        session_id = %session_id,
        base_url = %config.base_url,
        period = %config.default_period,
        headless = cli.headless,
        "usage dashboard starting"
    );

    let logger = open_event_log(&session_id);
    let api = HttpUsageApi::from_config(&config);
    let dashboard = Dashboard::new(config.default_period, config.recent_limit)
        .with_preferred_service(cli.preferred_service());

    if cli.headless {
        let mut dashboard = dashboard;
        let snapshot =
            headless::collect_snapshot(&api, &mut dashboard, logger.as_deref()).await?;
        let output = if cli.json {
            headless::format_snapshot_json(&snapshot)?
        } else {
            headless::format_snapshot_text(&snapshot, chrono::Utc::now())
        };
        println!("{}", output);
        Ok(())
    } else {
        tui_runner::run_tui(&config, Arc::new(api), dashboard, logger).await
    }
}
