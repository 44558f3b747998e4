use std::time::Duration;

use super::outcome::PollError;

/// Deadline and interval for one poll invocation.
///
/// Both durations must be non-zero. An interval longer than the timeout is
/// accepted but means at most one re-evaluation happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollRequest {
    what: String,
    timeout: Duration,
    interval: Duration,
}

impl PollRequest {
    pub fn new(
        what: impl Into<String>,
        timeout: Duration,
        interval: Duration,
    ) -> Result<Self, PollError> {
        let what = what.into();
        if timeout.is_zero() {
            return Err(PollError::InvalidRequest("timeout must be positive".into()));
        }
        if interval.is_zero() {
            return Err(PollError::InvalidRequest("interval must be positive".into()));
        }
        if interval > timeout {
            tracing::warn!(
                what = %what,
                ?interval,
                ?timeout,
                "poll interval exceeds timeout"
            );
        }
        Ok(Self {
            what,
            timeout,
            interval,
        })
    }

    /// Build from fractional seconds as found in config files.
    pub fn from_secs_f64(
        what: impl Into<String>,
        timeout_secs: f64,
        interval_secs: f64,
    ) -> Result<Self, PollError> {
        let timeout = Duration::try_from_secs_f64(timeout_secs)
            .map_err(|e| PollError::InvalidRequest(format!("timeout {timeout_secs}: {e}")))?;
        let interval = Duration::try_from_secs_f64(interval_secs)
            .map_err(|e| PollError::InvalidRequest(format!("interval {interval_secs}: {e}")))?;
        Self::new(what, timeout, interval)
    }

    /// Same timing, different subject.
    pub fn describe(&self, what: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            ..self.clone()
        }
    }

    /// Human-readable subject used in log lines and errors.
    pub fn what(&self) -> &str {
        &self.what
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
