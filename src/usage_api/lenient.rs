//! Lenient field decoding for backend payloads.
//!
//! The backend serializes SQL aggregates as numbers, numeric strings, or nulls
//! depending on the driver, and may omit columns entirely. A single bad field
//! must never reject a whole payload, so numeric fields decode to `None`
//! instead of failing; consumers treat `None` as zero.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerces a JSON value into a non-negative integer.
///
/// Accepts integers and floats (truncated). Strings are read up to the first
/// non-digit after an optional sign, so `"12abc"` is 12 and `"1e3"` is 1.
/// Negative values clamp to zero. Returns `None` for anything else.
pub fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|i| i.max(0) as u64))
            .or_else(|| float_to_u64(n.as_f64()?)),
        Value::String(s) => leading_integer(s),
        _ => None,
    }
}

/// Integer prefix of `raw`: optional sign, then at least one digit.
/// Saturates on overflow.
fn leading_integer(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let run: Vec<u64> = digits
        .chars()
        .map_while(|c| c.to_digit(10))
        .map(u64::from)
        .collect();
    if run.is_empty() {
        return None;
    }
    if negative {
        return Some(0);
    }
    Some(
        run.into_iter()
            .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(d)),
    )
}

fn float_to_u64(f: f64) -> Option<u64> {
    if f.is_finite() {
        Some(f.max(0.0) as u64)
    } else {
        None
    }
}

/// Coerces a JSON value into a finite float.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// Parses a calendar date, accepting a bare `YYYY-MM-DD` or a timestamp that
/// starts with one.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let prefix = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Parses a timestamp as RFC 3339, or as a zone-less SQL datetime
/// interpreted in local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
}

pub fn optional_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_u64))
}

pub fn optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_f64))
}

pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_str).and_then(parse_date))
}

pub fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_str).and_then(parse_timestamp))
}

/// Decodes free text. Non-string scalars are rendered with their JSON form
/// rather than rejected.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

/// Decodes each element on its own, dropping the ones that fail and adding
/// them to `skipped`.
pub fn decode_each<T: DeserializeOwned>(values: Vec<Value>, skipped: &mut usize) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!(error = %e, "dropping undecodable record");
                *skipped += 1;
                None
            }
        })
        .collect()
}

/// Treats `null` as an empty collection.
pub fn vec_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
