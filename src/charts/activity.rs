use crate::usage_api::{Direction, RecentMessage};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

pub const CONTENT_PLACEHOLDER: &str = "No content";
pub const EMPTY_FEED: &str = "No messages";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub direction: Direction,
    pub message_type: Option<String>,
    pub content: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ActivityEntry {
    pub fn direction_marker(&self) -> &'static str {
        match self.direction {
            Direction::Incoming => "▼ Incoming",
            Direction::Outgoing => "▲ Outgoing",
        }
    }

    pub fn content_or_placeholder(&self) -> &str {
        self.content.as_deref().unwrap_or(CONTENT_PLACEHOLDER)
    }
}

/// Recent messages in received order, capped at the configured window.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ActivityFeed {
    pub entries: Vec<ActivityEntry>,
}

impl ActivityFeed {
    pub fn from_messages(messages: &[RecentMessage], limit: usize) -> Self {
        let entries = messages
            .iter()
            .take(limit)
            .map(|message| ActivityEntry {
                direction: message.direction,
                message_type: message.message_type.clone(),
                content: message.content().map(str::to_string),
                created_at: message.created_at,
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Humanized age of `created_at` relative to `now`.
///
/// Timestamps in the future (clock skew) read as `just now`; a missing
/// timestamp renders as `-`.
pub fn relative_time(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(created_at) = created_at else {
        return "-".to_string();
    };

    let minutes = (now - created_at).num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else if minutes < 60 * 24 {
        format!("{} h ago", minutes / 60)
    } else if minutes < 60 * 24 * 30 {
        format!("{} days ago", minutes / (60 * 24))
    } else {
        created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d")
            .to_string()
    }
}

#[cfg(test)]
#[path = "tests/activity_tests.rs"]
mod tests;
