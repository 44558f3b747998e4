pub mod config;
pub mod logging;

pub mod exclusions;
pub mod http;
pub mod poll;
pub mod readiness;
pub mod retry;
pub mod runtime;
