use crate::dashboard::{run_fetch, Dashboard, FetchCommand};
use crate::structured_logger::StructuredLogger;
use crate::tui::Event;
use crate::usage_api::UsageApi;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::input::{handle_key, key_label, InputAction};

/// Owns the dashboard inside the TUI loop and turns events into state
/// changes plus spawned fetches.
pub struct DashboardRunner {
    dashboard: Dashboard,
    api: Arc<dyn UsageApi>,
    output_tx: mpsc::UnboundedSender<Event>,
    logger: Option<Arc<StructuredLogger>>,
}

impl DashboardRunner {
    pub fn new(
        dashboard: Dashboard,
        api: Arc<dyn UsageApi>,
        output_tx: mpsc::UnboundedSender<Event>,
        logger: Option<Arc<StructuredLogger>>,
    ) -> Self {
        Self {
            dashboard,
            api,
            output_tx,
            logger,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Issues the initial service list request.
    pub fn start(&mut self) {
        let command = self.dashboard.start();
        self.dispatch(command);
    }

    /// Spawns `command` on the runtime; the outcome comes back as
    /// `Event::Fetch`.
    fn dispatch(&self, command: FetchCommand) {
        if let Some(logger) = &self.logger {
            logger.log_fetch_issued(&command);
        }
        let api = Arc::clone(&self.api);
        let tx = self.output_tx.clone();
        tokio::spawn(async move {
            let outcome = run_fetch(api.as_ref(), command).await;
            // Receiver dropped means the TUI is shutting down
            let _ = tx.send(Event::Fetch(outcome));
        });
    }

    /// Applies one event. Returns `true` when the user asked to quit.
    pub fn process_event(&mut self, event: Event) -> bool {
        let phase_before = self.dashboard.phase();

        let should_quit = match event {
            Event::Key(key) => {
                if let Some(logger) = &self.logger {
                    logger.log_user_input(&key_label(&key), self.dashboard.phase().label());
                }
                match handle_key(&mut self.dashboard, key) {
                    InputAction::Quit => true,
                    InputAction::Fetch(command) => {
                        self.dispatch(command);
                        false
                    }
                    InputAction::None => false,
                }
            }
            Event::Fetch(outcome) => {
                let applied = self.dashboard.apply(outcome);
                if let Some(logger) = &self.logger {
                    logger.log_disposition(&applied.disposition);
                }
                if let Some(command) = applied.next {
                    self.dispatch(command);
                }
                false
            }
            Event::AutoRefresh => {
                if self.dashboard.has_pending_fetch() {
                    tracing::debug!("skipping auto-refresh while a fetch is outstanding");
                } else if let Some(command) = self.dashboard.refresh() {
                    self.dispatch(command);
                }
                false
            }
            Event::Tick | Event::Resize => false,
        };

        let phase_after = self.dashboard.phase();
        if phase_after != phase_before {
            if let Some(logger) = &self.logger {
                logger.log_phase_transition(phase_before, phase_after);
            }
        }
        should_quit
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
