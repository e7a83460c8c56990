//! Structured JSONL event log for reconstructing a dashboard session.
//!
//! Each line carries a monotonic sequence number, a microsecond timestamp,
//! the session id, the emitting component and a JSON event body.

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::dashboard::{DashboardPhase, Disposition, FetchCommand};

pub struct StructuredLogger {
    session_id: String,
    seq: AtomicU64,
    log_file: Mutex<File>,
    log_path: PathBuf,
}

#[derive(Serialize, serde::Deserialize)]
pub struct LogEntry {
    pub seq: u64,
    /// ISO 8601 with microseconds
    pub ts: String,
    pub session_id: String,
    pub component: String,
    pub event: Value,
}

impl StructuredLogger {
    /// Opens `<logs_dir>/events.jsonl` for appending.
    pub fn new(session_id: &str, logs_dir: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(logs_dir)?;
        let log_path = logs_dir.join("events.jsonl");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        Ok(Self {
            session_id: session_id.to_string(),
            seq: AtomicU64::new(0),
            log_file: Mutex::new(file),
            log_path,
        })
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Writes one event as a single line. Thread-safe; write failures are
    /// ignored so logging never takes the dashboard down.
    pub fn log(&self, component: &str, event: impl Serialize) {
        let entry = LogEntry {
            seq: self.next_seq(),
            ts: Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            session_id: self.session_id.clone(),
            component: component.to_string(),
            event: serde_json::to_value(event).unwrap_or(Value::Null),
        };

        if let Ok(mut file) = self.log_file.lock() {
            if let Ok(line) = serde_json::to_string(&entry) {
                let _ = writeln!(file, "{}", line);
                let _ = file.flush();
            }
        }
    }

    pub fn log_fetch_issued(&self, command: &FetchCommand) {
        let event = match command {
            FetchCommand::ListServices => json!({"type": "FetchIssued", "target": "services"}),
            FetchCommand::Usage(token) => json!({
                "type": "FetchIssued",
                "target": "usage",
                "request": token,
            }),
        };
        self.log("Fetch", event);
    }

    pub fn log_disposition(&self, disposition: &Disposition) {
        let event = match disposition {
            Disposition::ServicesLoaded { count } => {
                json!({"type": "ServicesLoaded", "count": count})
            }
            Disposition::NoServices => json!({"type": "NoServices"}),
            Disposition::UsageRendered { token } => {
                json!({"type": "UsageRendered", "request": token})
            }
            Disposition::Discarded { token } => json!({"type": "Discarded", "request": token}),
            Disposition::Failed { message } => json!({"type": "Failed", "message": message}),
        };
        self.log("Dashboard", event);
    }

    pub fn log_user_input(&self, key: &str, context: &str) {
        self.log(
            "TUI",
            json!({
                "type": "UserInput",
                "key": key,
                "context": context
            }),
        );
    }

    pub fn log_phase_transition(&self, from: DashboardPhase, to: DashboardPhase) {
        self.log(
            "Dashboard",
            json!({
                "type": "PhaseTransition",
                "from": from,
                "to": to
            }),
        );
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
#[path = "tests/structured_logger_tests.rs"]
mod tests;
