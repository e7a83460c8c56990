//! Data types for the services list and usage endpoints.

use super::error::FetchError;
use super::lenient;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Identifier of a customer service. The backend emits numeric ids; strings
/// are accepted as well and both normalize to the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ServiceId(pub String);

impl ServiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ServiceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self::new(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(D::Error::custom(format!("invalid service id: {}", other))),
        }
    }
}

/// Reporting window selectable by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[default]
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Week, Period::Month, Period::Quarter];

    /// Wire form used in the `period` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "7d",
            Period::Month => "30d",
            Period::Quarter => "90d",
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Quarter => 90,
        }
    }

    pub fn label(&self) -> String {
        format!("Last {} days", self.days())
    }

    /// The next period in selector order, wrapping around.
    pub fn next(&self) -> Period {
        match self {
            Period::Week => Period::Month,
            Period::Month => Period::Quarter,
            Period::Quarter => Period::Week,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "7d" => Ok(Period::Week),
            "30d" => Ok(Period::Month),
            "90d" => Ok(Period::Quarter),
            other => Err(format!(
                "unknown period '{}' (expected one of 7d, 30d, 90d)",
                other
            )),
        }
    }
}

/// A customer service as returned by the services list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub service_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub service_type: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_u64")]
    pub messages_24h: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional_u64")]
    pub api_calls_24h: Option<u64>,
}

impl Service {
    pub fn new(id: &str, service_name: &str, service_type: &str) -> Self {
        Self {
            id: ServiceId::new(id),
            service_name: service_name.to_string(),
            service_type: service_type.to_string(),
            platform: None,
            status: None,
            messages_24h: None,
            api_calls_24h: None,
        }
    }

    /// Selector label: `name (type)`.
    pub fn display_label(&self) -> String {
        let name = if self.service_name.is_empty() {
            format!("Service {}", self.id)
        } else {
            self.service_name.clone()
        };
        if self.service_type.is_empty() {
            name
        } else {
            format!("{} ({})", name, self.service_type)
        }
    }
}

/// Per-day usage counts. Fields that were missing or not numeric decode to
/// `None` and count as zero everywhere downstream.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DailyUsageRecord {
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_u64")]
    pub bot_messages: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional_u64")]
    pub api_calls: Option<u64>,
}

impl DailyUsageRecord {
    pub fn new(date: NaiveDate, bot_messages: u64, api_calls: u64) -> Self {
        Self {
            date: Some(date),
            bot_messages: Some(bot_messages),
            api_calls: Some(api_calls),
        }
    }

    pub fn bot_messages_or_zero(&self) -> u64 {
        self.bot_messages.unwrap_or(0)
    }

    pub fn api_calls_or_zero(&self) -> u64 {
        self.api_calls.unwrap_or(0)
    }
}

/// Request volume for one API category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiBreakdownRecord {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub api_type: String,
    #[serde(default, deserialize_with = "lenient::optional_u64")]
    pub total_requests: Option<u64>,
    /// Mean response time in milliseconds.
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub avg_response_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub total_cost: Option<f64>,
}

impl ApiBreakdownRecord {
    pub fn new(api_type: &str, total_requests: u64) -> Self {
        Self {
            api_type: api_type.to_string(),
            total_requests: Some(total_requests),
            avg_response_time: None,
            total_cost: None,
        }
    }

    pub fn total_requests_or_zero(&self) -> u64 {
        self.total_requests.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    #[default]
    Outgoing,
}

impl<'de> Deserialize<'de> for Direction {
    /// Anything other than `incoming` is an outgoing message.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient::optional_text(deserializer)?;
        Ok(match raw.as_deref().map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("incoming") => Direction::Incoming,
            _ => Direction::Outgoing,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecentMessage {
    #[serde(default)]
    pub direction: Direction,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub message_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub message_content: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RecentMessage {
    /// Message text, or `None` when absent or blank.
    pub fn content(&self) -> Option<&str> {
        self.message_content
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Everything the usage endpoint returns for one (service, period) pair.
///
/// Collection elements that are not records at all (`null`, bare strings)
/// are dropped one by one and counted in `skipped_records`; the rest of the
/// payload still decodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawUsagePayload")]
pub struct UsagePayload {
    pub daily_usage: Vec<DailyUsageRecord>,
    pub api_breakdown: Vec<ApiBreakdownRecord>,
    pub recent_messages: Vec<RecentMessage>,
    #[serde(skip)]
    pub skipped_records: usize,
}

#[derive(Deserialize)]
struct RawUsagePayload {
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    daily_usage: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    api_breakdown: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    recent_messages: Vec<Value>,
}

impl From<RawUsagePayload> for UsagePayload {
    fn from(raw: RawUsagePayload) -> Self {
        let mut skipped_records = 0;
        let daily_usage = lenient::decode_each(raw.daily_usage, &mut skipped_records);
        let api_breakdown = lenient::decode_each(raw.api_breakdown, &mut skipped_records);
        let recent_messages = lenient::decode_each(raw.recent_messages, &mut skipped_records);
        Self {
            daily_usage,
            api_breakdown,
            recent_messages,
            skipped_records,
        }
    }
}

/// `{success, data, message}` wrapper used by every backend endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn into_result(self) -> Result<T, FetchError> {
        if !self.success {
            return Err(FetchError::Rejected(self.message));
        }
        self.data
            .ok_or_else(|| FetchError::Decode("response has no data".to_string()))
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
