//! Poll loop: evaluate, sleep, check the deadline, repeat.

use std::time::Instant;

use super::check::Check;
use super::outcome::PollOutcome;
use super::request::PollRequest;

/// Evaluates `predicate` until it succeeds, turns fatal, or the deadline passes.
///
/// The first evaluation happens immediately. After each `NotYetReady` the
/// loop sleeps one full interval and then compares the elapsed time with the
/// timeout, so a timed-out poll returns after at least `timeout` and at most
/// about `timeout + interval` (plus predicate run time). Whether one last
/// evaluation squeezes in right at the deadline depends on scheduling.
pub fn poll_until<T, F>(request: &PollRequest, mut predicate: F) -> PollOutcome<T>
where
    F: FnMut() -> Check<T>,
{
    let start = Instant::now();
    let mut evaluations = 0u32;
    loop {
        evaluations += 1;
        match predicate() {
            Check::Success(value) => {
                tracing::debug!(
                    what = request.what(),
                    evaluations,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "ready"
                );
                return PollOutcome::Succeeded(value);
            }
            Check::Fatal(reason) => {
                tracing::warn!(
                    what = request.what(),
                    evaluations,
                    reason = %reason,
                    "fatal condition, giving up"
                );
                return PollOutcome::FailedFatally(reason);
            }
            Check::NotYetReady => {
                tracing::debug!(what = request.what(), evaluations, "not ready yet");
            }
        }

        std::thread::sleep(request.interval());
        if start.elapsed() >= request.timeout() {
            tracing::warn!(
                what = request.what(),
                evaluations,
                timeout = ?request.timeout(),
                "timed out"
            );
            return PollOutcome::TimedOut;
        }
    }
}
