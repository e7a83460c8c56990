//! Error type for calls across the backend boundary.

use std::fmt;

/// Why a services or usage fetch failed.
///
/// Every variant is a `FetchFailed` condition from the dashboard's point of
/// view: the caller leaves the rendered view alone and surfaces the message.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request was never sent (e.g. empty service id).
    InvalidRequest(String),
    /// Connection, timeout, or I/O failure.
    Transport(String),
    /// The backend answered with a non-2xx status.
    Status { code: u16, message: Option<String> },
    /// The body was not the expected JSON envelope.
    Decode(String),
    /// The envelope said `success: false`.
    Rejected(Option<String>),
}

impl FetchError {
    pub(crate) fn from_ureq(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => FetchError::Status {
                code,
                message: None,
            },
            other => FetchError::Transport(other.to_string()),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidRequest(reason) => write!(f, "invalid request: {}", reason),
            FetchError::Transport(reason) => write!(f, "request failed: {}", reason),
            FetchError::Status {
                code,
                message: Some(message),
            } => write!(f, "backend returned HTTP {}: {}", code, message),
            FetchError::Status { code, message: None } => {
                write!(f, "backend returned HTTP {}", code)
            }
            FetchError::Decode(reason) => write!(f, "unexpected response: {}", reason),
            FetchError::Rejected(Some(message)) => write!(f, "backend rejected request: {}", message),
            FetchError::Rejected(None) => write!(f, "backend rejected request"),
        }
    }
}

impl std::error::Error for FetchError {}
