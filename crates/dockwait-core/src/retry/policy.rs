use std::time::Duration;

use super::error::PolicyError;

/// Decision returned by the retry policy after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Give up and return the last error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Fixed-count, fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    /// Six attempts, six seconds apart.
    fn default() -> Self {
        Self {
            max_attempts: 6,
            delay: Duration::from_secs(6),
        }
    }
}

impl RetryPolicy {
    /// `max_attempts` counts the first attempt, so 1 means "no retries".
    pub fn new(max_attempts: u32, delay: Duration) -> Result<Self, PolicyError> {
        if max_attempts == 0 {
            return Err(PolicyError::ZeroAttempts);
        }
        Ok(Self {
            max_attempts,
            delay,
        })
    }

    /// A policy that makes exactly one attempt.
    pub fn single() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }

    /// Build from fractional seconds as found in config files.
    pub fn from_secs_f64(max_attempts: u32, delay_secs: f64) -> Result<Self, PolicyError> {
        let delay = Duration::try_from_secs_f64(delay_secs)
            .map_err(|e| PolicyError::InvalidDelay(format!("{delay_secs}: {e}")))?;
        Self::new(max_attempts, delay)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Decide what to do after attempt `attempt` (1-based) failed.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            RetryDecision::NoRetry
        } else {
            RetryDecision::RetryAfter(self.delay)
        }
    }
}
