use std::time::Duration;

use thiserror::Error;

/// Terminal result of one poll invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    Succeeded(T),
    TimedOut,
    FailedFatally(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("timed out after {timeout:?} waiting for {what}")]
    TimedOut { what: String, timeout: Duration },
    #[error("{what} failed: {reason}")]
    Fatal { what: String, reason: String },
    #[error("invalid poll request: {0}")]
    InvalidRequest(String),
}

impl<T> PollOutcome<T> {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, PollOutcome::Succeeded(_))
    }

    /// Turn the outcome into a `Result` for callers that treat timeout and
    /// fatal alike. `what` and `timeout` only feed the error message.
    pub fn into_result(self, what: &str, timeout: Duration) -> Result<T, PollError> {
        match self {
            PollOutcome::Succeeded(v) => Ok(v),
            PollOutcome::TimedOut => Err(PollError::TimedOut {
                what: what.to_string(),
                timeout,
            }),
            PollOutcome::FailedFatally(reason) => Err(PollError::Fatal {
                what: what.to_string(),
                reason,
            }),
        }
    }
}
