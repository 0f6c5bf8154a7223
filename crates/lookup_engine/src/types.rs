use std::fmt;

use lookup_core::{Generation, Record, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    DebounceElapsed {
        generation: Generation,
    },
    FetchCompleted {
        request_id: RequestId,
        query: String,
        result: Result<Vec<Record>, FetchError>,
    },
    RetryDelayElapsed {
        attempt: u32,
    },
}

/// A failed lookup. `message` is what the user gets to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Non-2xx response, worded as `HTTP <status>: <statusText>`.
    pub(crate) fn http_status(status: reqwest::StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or_default();
        Self::new(
            FailureKind::HttpStatus(status.as_u16()),
            format!("HTTP {}: {}", status.as_u16(), reason),
        )
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidBody => write!(f, "response is not a json array"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
