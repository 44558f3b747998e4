//! `dockwait request` – one management API call under the retry policy.

use anyhow::{anyhow, bail, Context, Result};
use dockwait_core::config::HarnessConfig;
use dockwait_core::http::{send_with_retry, Method, Request};
use dockwait_core::retry::RetryPolicy;

use super::api_request;

pub fn run_request(
    cfg: &HarnessConfig,
    method: &str,
    url: &str,
    data: Option<String>,
    headers: &[String],
    no_auth: bool,
    attempts: Option<u32>,
) -> Result<()> {
    let method: Method = method.parse()?;
    if data.is_some() && matches!(method, Method::Get | Method::Head) {
        bail!("--data cannot be sent with {method}");
    }
    let mut request = api_request(cfg, Request::new(method, cfg.api.resolve(url)), no_auth);
    for raw in headers {
        let (name, value) = parse_header(raw)?;
        request = request.header(name, value);
    }
    if let Some(body) = data {
        request = request.body(body);
    }

    let mut policy = cfg.retry.policy()?;
    if let Some(n) = attempts {
        policy = RetryPolicy::new(n, policy.delay()).context("invalid --attempts")?;
    }

    let resp = send_with_retry(&request, &policy)?;
    println!("{}", resp.text());
    Ok(())
}

/// `Name: value` → (`Name`, `value`).
fn parse_header(raw: &str) -> Result<(&str, &str)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("header {raw:?} is not `Name: value`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("header {raw:?} has an empty name"));
    }
    Ok((name, value.trim()))
}
