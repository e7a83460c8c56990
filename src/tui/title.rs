use crossterm::{execute, terminal::SetTitle};
use std::io::{self, IsTerminal, Write};

use crate::dashboard::Dashboard;

/// Saves, sets and restores the terminal window title when the terminal
/// supports it.
pub struct TerminalTitleManager {
    is_supported: bool,
    current: Option<String>,
}

impl TerminalTitleManager {
    pub fn new() -> Self {
        let is_supported = std::io::stdout().is_terminal()
            && std::env::var("CI").is_err()
            && std::env::var("TERM").map(|t| t != "dumb").unwrap_or(true);

        Self {
            is_supported,
            current: None,
        }
    }

    pub fn save_title(&self) {
        if self.is_supported {
            let _ = io::stdout().write_all(b"\x1b[22;0t");
            let _ = io::stdout().flush();
        }
    }

    pub fn restore_title(&self) {
        if self.is_supported {
            let _ = io::stdout().write_all(b"\x1b[23;0t");
            let _ = io::stdout().flush();
        }
    }

    /// Sets the title, skipping the write when it is unchanged.
    pub fn set_title(&mut self, title: &str) {
        if self.current.as_deref() == Some(title) {
            return;
        }
        self.current = Some(title.to_string());
        if self.is_supported {
            let _ = execute!(io::stdout(), SetTitle(title));
        }
    }
}

impl Default for TerminalTitleManager {
    fn default() -> Self {
        Self::new()
    }
}

/// `Usage · Shop bot · 7d`, or just `Usage` before a service is chosen.
pub fn dashboard_title(dashboard: &Dashboard) -> String {
    match dashboard.current_service() {
        Some(service) => format!(
            "Usage · {} · {}",
            service.display_label(),
            dashboard.selection().current_period()
        ),
        None => "Usage".to_string(),
    }
}
