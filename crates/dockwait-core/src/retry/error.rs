//! Retry policy validation errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
    #[error("invalid retry delay: {0}")]
    InvalidDelay(String),
}
