//! `dockwait probe` – poll an HTTP endpoint until it answers 2xx.

use anyhow::Result;
use dockwait_core::config::HarnessConfig;
use dockwait_core::http::Request;
use dockwait_core::readiness::EndpointReadiness;

use super::{api_request, Timing};

pub fn run_probe(cfg: &HarnessConfig, url: &str, no_auth: bool, timing: &Timing) -> Result<()> {
    let url = cfg.api.resolve(url);
    let request = timing.request(cfg, &url)?;
    let readiness = EndpointReadiness::new(api_request(cfg, Request::get(&url), no_auth))
        .with_fatal_statuses(cfg.readiness.fatal_statuses.clone());

    let resp = readiness
        .wait(&request)
        .into_result(request.what(), request.timeout())?;
    println!("{} ready (HTTP {})", url, resp.status);
    Ok(())
}
