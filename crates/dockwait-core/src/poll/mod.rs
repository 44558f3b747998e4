//! Deadline-bounded polling of a tri-state predicate.
//!
//! A predicate probes some external resource (container list, log tail,
//! HTTP endpoint) and answers [`Check::Success`], [`Check::NotYetReady`] or
//! [`Check::Fatal`]. [`poll_until`] drives it until success, a fatal answer,
//! or the deadline, and reports exactly one [`PollOutcome`].

mod check;
mod outcome;
mod request;
mod run;

pub use check::Check;
pub use outcome::{PollError, PollOutcome};
pub use request::PollRequest;
pub use run::poll_until;
