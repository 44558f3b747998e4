//! CLI command handlers, one per file.

mod completions;
mod exclusions;
mod probe;
mod request;
mod wait;
mod wait_exec;

pub use completions::{run_completions, run_man};
pub use exclusions::run_exclusions;
pub use probe::run_probe;
pub use request::run_request;
pub use wait::run_wait;
pub use wait_exec::run_wait_exec;

use anyhow::Result;
use clap::Args;
use dockwait_core::config::HarnessConfig;
use dockwait_core::http::Request;
use dockwait_core::poll::PollRequest;

/// Poll timing overrides shared by the waiting commands.
#[derive(Debug, Clone, Default, Args)]
pub struct Timing {
    /// Seconds before giving up (default from config).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,
    /// Seconds between checks (default from config).
    #[arg(long, value_name = "SECS")]
    pub interval: Option<f64>,
}

impl Timing {
    pub fn request(&self, cfg: &HarnessConfig, what: &str) -> Result<PollRequest> {
        let mut poll = cfg.poll.clone();
        if let Some(t) = self.timeout {
            poll.timeout_secs = t;
        }
        if let Some(i) = self.interval {
            poll.interval_secs = i;
        }
        poll.request(what)
    }
}

/// Management API request carrying the configured TLS and credential settings.
/// Credentials only go to the configured API host.
fn api_request(cfg: &HarnessConfig, request: Request, no_auth: bool) -> Request {
    let request = request.insecure(cfg.api.insecure);
    if no_auth || cfg.api.username.is_empty() || !cfg.api.is_api_url(request.url()) {
        request
    } else {
        request.basic_auth(&cfg.api.username, &cfg.api.password)
    }
}
