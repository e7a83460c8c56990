mod aggregation;
mod app;
mod charts;
mod config;
mod dashboard;
mod dashboard_paths;
mod logging;
mod structured_logger;
mod tui;
mod usage_api;

use anyhow::Result;
use app::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match dashboard_paths::log_file_path() {
        Ok(path) => {
            if let Err(e) = logging::init_file_logging(&path) {
                eprintln!("[usage-dash] Warning: file logging disabled: {:#}", e);
            }
        }
        Err(e) => eprintln!("[usage-dash] Warning: file logging disabled: {:#}", e),
    }

    let result = app::run(cli).await;
    if let Err(ref e) = result {
        tracing::error!(error = %format!("{:#}", e), "usage dashboard exited with an error");
    }
    result
}
