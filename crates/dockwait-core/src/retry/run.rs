//! Retry loop: run a closure until success or the policy says stop.

use std::fmt::Display;

use super::policy::{RetryDecision, RetryPolicy};

/// Runs `f` until it succeeds or `policy.max_attempts()` attempts have failed.
///
/// Sleeps the policy delay between attempts. On exhaustion the error from the
/// final attempt is returned as-is.
pub fn run_with_retry<T, E, F>(policy: &RetryPolicy, mut f: F) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Result<T, E>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(value) => {
                if attempt > 1 {
                    tracing::debug!(attempt, "succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) => match policy.decide(attempt) {
                RetryDecision::NoRetry => {
                    if policy.max_attempts() > 1 {
                        tracing::warn!(
                            attempts = attempt,
                            error = %e,
                            "giving up after final attempt"
                        );
                    }
                    return Err(e);
                }
                RetryDecision::RetryAfter(d) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = policy.max_attempts(),
                        delay_ms = d.as_millis() as u64,
                        error = %e,
                        "attempt failed, retrying"
                    );
                    std::thread::sleep(d);
                    attempt += 1;
                }
            },
        }
    }
}
