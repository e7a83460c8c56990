mod events;
mod input;

use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::structured_logger::StructuredLogger;
use crate::tui::{dashboard_title, spawn_auto_refresh, EventHandler, TerminalTitleManager};
use crate::usage_api::UsageApi;
use anyhow::{Context, Result};
use std::sync::Arc;

pub use events::DashboardRunner;

type DashboardTerminal = ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>;

const MAX_EVENTS_PER_FRAME: usize = 50;

pub fn restore_terminal(terminal: &mut DashboardTerminal) -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

pub async fn run_tui(
    config: &DashboardConfig,
    api: Arc<dyn UsageApi>,
    dashboard: Dashboard,
    logger: Option<Arc<StructuredLogger>>,
) -> Result<()> {
    crossterm::terminal::enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        original_hook(panic_info);
    }));

    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut title_manager = TerminalTitleManager::new();
    title_manager.save_title();

    let result = event_loop(&mut terminal, &mut title_manager, config, api, dashboard, logger).await;

    title_manager.restore_title();
    restore_terminal(&mut terminal)?;
    tracing::info!("terminal restored");
    result
}

async fn event_loop(
    terminal: &mut DashboardTerminal,
    title_manager: &mut TerminalTitleManager,
    config: &DashboardConfig,
    api: Arc<dyn UsageApi>,
    dashboard: Dashboard,
    logger: Option<Arc<StructuredLogger>>,
) -> Result<()> {
    let mut event_handler = EventHandler::new(config.tick_rate());
    if let Some(period) = config.auto_refresh() {
        tracing::info!(seconds = period.as_secs(), "auto-refresh enabled");
        spawn_auto_refresh(event_handler.sender(), period);
    }

    #[cfg(unix)]
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .context("Failed to create SIGTERM handler")?;

    let mut runner = DashboardRunner::new(dashboard, api, event_handler.sender(), logger);
    runner.start();

    loop {
        title_manager.set_title(&dashboard_title(runner.dashboard()));
        terminal.draw(|frame| {
            crate::tui::ui::draw(frame, runner.dashboard(), chrono::Utc::now())
        })?;

        #[cfg(unix)]
        let first_event = tokio::select! {
            event = event_handler.next() => event?,
            _ = sigterm.recv() => {
                tracing::info!("SIGTERM received, shutting down");
                break;
            }
        };
        #[cfg(not(unix))]
        let first_event = event_handler.next().await?;

        let mut events_to_process = vec![first_event];
        while events_to_process.len() < MAX_EVENTS_PER_FRAME {
            match event_handler.try_next() {
                Some(event) => events_to_process.push(event),
                None => break,
            }
        }

        let mut quit_requested = false;
        for event in events_to_process {
            if runner.process_event(event) {
                quit_requested = true;
            }
        }
        if quit_requested {
            tracing::info!("quit requested");
            break;
        }
    }
    Ok(())
}
