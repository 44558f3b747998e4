//! Readiness predicates for the poller.
//!
//! Each predicate answers one [`Check`](crate::poll::Check) per evaluation
//! and never keeps state between evaluations, so the same value can be
//! polled any number of times.

mod containers;
mod endpoint;
mod exec;
mod markers;

pub use containers::{wait_for_containers, ContainerReadiness};
pub use endpoint::EndpointReadiness;
pub use exec::ExecReadiness;
pub use markers::{LogMarkers, LogVerdict};
