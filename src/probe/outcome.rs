use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic used when a driver fails without any error text
const UNKNOWN_FAILURE: &str = "connection failed";

/// Why a probe did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Rejected before any network call
    #[error("invalid connection parameters: {0}")]
    InvalidParameters(String),
    /// Driver error text, passed through unmodified
    #[error("{0}")]
    ConnectionFailed(String),
}

/// Result of one probe call
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOutcome {
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl ConnectionOutcome {
    #[must_use]
    pub const fn success() -> Self {
        Self {
            succeeded: true,
            diagnostic: None,
        }
    }

    /// Failed outcome; an empty diagnostic is replaced so failures always
    /// carry some text
    #[must_use]
    pub fn failure(diagnostic: impl Into<String>) -> Self {
        let diagnostic = diagnostic.into();
        Self {
            succeeded: false,
            diagnostic: Some(if diagnostic.is_empty() {
                UNKNOWN_FAILURE.to_string()
            } else {
                diagnostic
            }),
        }
    }
}

impl From<ProbeError> for ConnectionOutcome {
    fn from(err: ProbeError) -> Self {
        Self::failure(err.to_string())
    }
}

impl From<Result<(), ProbeError>> for ConnectionOutcome {
    fn from(result: Result<(), ProbeError>) -> Self {
        result.map_or_else(Self::from, |()| Self::success())
    }
}

/// Lifecycle of the connection handle inside one probe call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    NotConnected,
    Connected,
    Closed,
}

impl ProbeState {
    /// `Closed` is terminal and no state is re-entered
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::NotConnected, Self::Connected | Self::Closed) | (Self::Connected, Self::Closed)
        )
    }
}
