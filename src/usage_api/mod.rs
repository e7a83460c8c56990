//! Backend access for the usage dashboard.
//!
//! This module owns everything that crosses the wire:
//! - Wire types for the services list and per-service usage payloads
//! - Lenient decoding of the numeric fields the backend emits as strings or nulls
//! - The `UsageApi` seam and its HTTP implementation

pub mod client;
pub mod error;
#[cfg(test)]
pub mod fake;
pub mod lenient;
pub mod types;

pub use client::{HttpUsageApi, UsageApi};
pub use error::FetchError;
pub use types::{
    ApiBreakdownRecord, DailyUsageRecord, Direction, Period, RecentMessage, Service, ServiceId,
    UsagePayload,
};
