use crate::usage_api::DailyUsageRecord;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub bot_messages: u64,
    pub api_calls: u64,
}

/// Returns the dated records oldest-first without touching the input.
///
/// Records without a parseable date cannot be placed on the axis and are
/// skipped. The sort is stable, so duplicate dates keep their input order.
pub fn sorted_ascending_copy(records: &[DailyUsageRecord]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = records
        .iter()
        .filter_map(|record| {
            record.date.map(|date| TrendPoint {
                date,
                bot_messages: record.bot_messages_or_zero(),
                api_calls: record.api_calls_or_zero(),
            })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// Short axis label, e.g. `Jan 3`.
pub fn short_date_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Two aligned line series over a shared ascending date axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub points: Vec<TrendPoint>,
    pub labels: Vec<String>,
    pub bot_series: Vec<(f64, f64)>,
    pub api_series: Vec<(f64, f64)>,
    /// Upper y bound; the axis always starts at zero.
    pub y_max: f64,
    pub x_max: f64,
}

impl TrendChart {
    /// Builds the chart, or `None` when no record carries a usable date.
    pub fn from_records(records: &[DailyUsageRecord]) -> Option<Self> {
        let points = sorted_ascending_copy(records);
        if points.is_empty() {
            return None;
        }

        let labels = points.iter().map(|p| short_date_label(p.date)).collect();
        let bot_series = points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.bot_messages as f64))
            .collect();
        let api_series = points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.api_calls as f64))
            .collect();
        let peak = points
            .iter()
            .map(|p| p.bot_messages.max(p.api_calls))
            .max()
            .unwrap_or(0);

        Some(Self {
            y_max: (peak as f64).max(1.0),
            x_max: ((points.len() - 1) as f64).max(1.0),
            points,
            labels,
            bot_series,
            api_series,
        })
    }

    #[cfg(test)]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// At most `max` labels spread evenly across the axis, always including
    /// the first and last date.
    pub fn axis_labels(&self, max: usize) -> Vec<String> {
        let n = self.labels.len();
        if n <= max.max(2) {
            return self.labels.clone();
        }
        let slots = max.max(2);
        (0..slots)
            .map(|slot| {
                let index = slot * (n - 1) / (slots - 1);
                self.labels[index].clone()
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/trend_tests.rs"]
mod tests;
