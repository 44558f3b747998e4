//! Fixed-delay retry of a single fallible call.
//!
//! Every failure is retried until `max_attempts` is reached; the last error
//! is handed back to the caller unchanged. No backoff, no jitter: attempt
//! `n` starts roughly `(n - 1) * delay` after the first.

mod error;
mod policy;
mod run;

pub use error::PolicyError;
pub use policy::{RetryDecision, RetryPolicy};
pub use run::run_with_retry;
