use crate::aggregation::Breakdown;
use crate::charts::activity::EMPTY_FEED;
use crate::charts::relative_time;
use crate::dashboard::{run_fetch, Dashboard, DashboardSnapshot, Disposition};
use crate::structured_logger::StructuredLogger;
use crate::tui::ui::util::{format_number, format_optional};
use crate::usage_api::UsageApi;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;

/// Drives one full load cycle (services, then usage for the default
/// selection) without a terminal and returns the rendered snapshot.
pub async fn collect_snapshot(
    api: &dyn UsageApi,
    dashboard: &mut Dashboard,
    logger: Option<&StructuredLogger>,
) -> Result<DashboardSnapshot> {
    let mut next = Some(dashboard.start());

    while let Some(command) = next.take() {
        if let Some(logger) = logger {
            logger.log_fetch_issued(&command);
        }
        let outcome = run_fetch(api, command).await;
        let applied = dashboard.apply(outcome);
        if let Some(logger) = logger {
            logger.log_disposition(&applied.disposition);
        }

        match applied.disposition {
            Disposition::Failed { message } => bail!(message),
            Disposition::NoServices => bail!("No services found for this account"),
            _ => next = applied.next,
        }
    }

    dashboard
        .snapshot()
        .context("Load cycle finished without rendering usage data")
}

pub fn format_snapshot_json(snapshot: &DashboardSnapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")
}

/// Plain-text report mirroring the dashboard regions.
pub fn format_snapshot_text(snapshot: &DashboardSnapshot, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}), {}",
        snapshot.service_label,
        snapshot.service_id,
        snapshot.period.label()
    );
    let _ = writeln!(
        out,
        "Bot messages: {}",
        format_number(snapshot.totals.total_bot_messages)
    );
    let _ = writeln!(
        out,
        "API calls:    {}",
        format_number(snapshot.totals.total_api_calls)
    );

    out.push_str("\nDaily trend\n");
    if snapshot.trend.is_empty() {
        out.push_str("  No data\n");
    }
    for point in &snapshot.trend {
        let _ = writeln!(
            out,
            "  {}  bot {:>8}  api {:>8}",
            point.date.format("%Y-%m-%d"),
            format_number(point.bot_messages),
            format_number(point.api_calls)
        );
    }

    out.push_str("\nAPI breakdown\n");
    match &snapshot.breakdown {
        Breakdown::Empty => out.push_str("  No data\n"),
        Breakdown::Categories(slices) => {
            for slice in slices {
                let _ = writeln!(
                    out,
                    "  {:<16} {:>8} {:>6.1}%  avg {} ms  cost {}",
                    slice.api_type,
                    format_number(slice.total_requests),
                    slice.share_percent,
                    format_optional(slice.avg_response_time, 0),
                    format_optional(slice.total_cost, 2)
                );
            }
        }
    }

    out.push_str("\nRecent messages\n");
    if snapshot.recent_messages.is_empty() {
        let _ = writeln!(out, "  {}", EMPTY_FEED);
    }
    for entry in &snapshot.recent_messages.entries {
        let _ = writeln!(
            out,
            "  {}  {:<10} {}",
            entry.direction_marker(),
            relative_time(entry.created_at, now),
            entry.content_or_placeholder()
        );
    }
    out
}

#[cfg(test)]
#[path = "tests/headless_tests.rs"]
mod tests;
