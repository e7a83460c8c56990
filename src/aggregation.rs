//! Reduction of a usage payload into summary totals and a category breakdown.

use crate::usage_api::{ApiBreakdownRecord, DailyUsageRecord};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UsageTotals {
    pub total_bot_messages: u64,
    pub total_api_calls: u64,
    /// Numeric fields that were missing or malformed and counted as zero.
    #[serde(skip)]
    pub malformed_fields: usize,
}

/// Sums the daily counts. Accumulation saturates instead of overflowing.
pub fn aggregate(records: &[DailyUsageRecord]) -> UsageTotals {
    records.iter().fold(UsageTotals::default(), |mut totals, record| {
        totals.total_bot_messages = totals
            .total_bot_messages
            .saturating_add(record.bot_messages_or_zero());
        totals.total_api_calls = totals
            .total_api_calls
            .saturating_add(record.api_calls_or_zero());
        totals.malformed_fields +=
            usize::from(record.bot_messages.is_none()) + usize::from(record.api_calls.is_none());
        totals
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSlice {
    pub api_type: String,
    pub total_requests: u64,
    /// Share of all requests, 0-100.
    pub share_percent: f64,
    pub avg_response_time: Option<f64>,
    pub total_cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "categories", rename_all = "snake_case")]
pub enum Breakdown {
    Empty,
    Categories(Vec<BreakdownSlice>),
}

impl Breakdown {
    pub fn is_empty(&self) -> bool {
        matches!(self, Breakdown::Empty)
    }

    pub fn total_requests(&self) -> u64 {
        match self {
            Breakdown::Empty => 0,
            Breakdown::Categories(slices) => slices
                .iter()
                .fold(0u64, |acc, s| acc.saturating_add(s.total_requests)),
        }
    }
}

/// Passes category totals through unchanged and derives each share.
pub fn breakdown(records: &[ApiBreakdownRecord]) -> Breakdown {
    if records.is_empty() {
        return Breakdown::Empty;
    }

    let total = records
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.total_requests_or_zero()));

    let slices = records
        .iter()
        .map(|record| {
            let requests = record.total_requests_or_zero();
            let share_percent = if total == 0 {
                0.0
            } else {
                requests as f64 * 100.0 / total as f64
            };
            BreakdownSlice {
                api_type: record.api_type.clone(),
                total_requests: requests,
                share_percent,
                avg_response_time: record.avg_response_time,
                total_cost: record.total_cost,
            }
        })
        .collect();

    Breakdown::Categories(slices)
}

#[cfg(test)]
#[path = "tests/aggregation_tests.rs"]
mod tests;
