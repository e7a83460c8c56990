use super::selection::SelectionKey;
use serde::Serialize;

/// Tag carried by an outstanding usage fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestToken {
    pub id: u64,
    pub key: SelectionKey,
}

/// Issues monotonically increasing request ids and decides whether a
/// response may still be applied.
#[derive(Debug, Default)]
pub struct RequestTracker {
    last_issued: u64,
    in_flight: Option<u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, key: SelectionKey) -> RequestToken {
        self.last_issued += 1;
        self.in_flight = Some(self.last_issued);
        RequestToken {
            id: self.last_issued,
            key,
        }
    }

    /// A response is current only if it answers the latest request and that
    /// request was for the selection shown now.
    pub fn is_current(&self, token: &RequestToken, current: Option<&SelectionKey>) -> bool {
        token.id == self.last_issued && current == Some(&token.key)
    }

    /// Marks the latest request as answered.
    pub fn settle(&mut self, token: &RequestToken) {
        if self.in_flight == Some(token.id) {
            self.in_flight = None;
        }
    }

    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_issued(&self) -> u64 {
        self.last_issued
    }
}
