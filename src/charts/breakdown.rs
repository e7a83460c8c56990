use crate::aggregation::{Breakdown, BreakdownSlice};

/// Proportion chart over API categories. Only exists for a non-empty
/// breakdown; the empty state is rendered as text instead.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownChart {
    pub slices: Vec<BreakdownSlice>,
    pub total_requests: u64,
}

impl BreakdownChart {
    pub fn from_breakdown(breakdown: &Breakdown) -> Option<Self> {
        match breakdown {
            Breakdown::Empty => None,
            Breakdown::Categories(slices) => Some(Self {
                total_requests: breakdown.total_requests(),
                slices: slices.clone(),
            }),
        }
    }

    /// Bar label, e.g. `chat 75.0%`.
    pub fn slice_label(slice: &BreakdownSlice) -> String {
        format!("{} {:.1}%", slice.api_type, slice.share_percent)
    }

    pub fn max_requests(&self) -> u64 {
        self.slices
            .iter()
            .map(|s| s.total_requests)
            .max()
            .unwrap_or(0)
    }
}
