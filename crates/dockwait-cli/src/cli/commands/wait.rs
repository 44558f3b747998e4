//! `dockwait wait` – poll containers until they are ready.

use anyhow::{Context, Result};
use dockwait_core::config::HarnessConfig;
use dockwait_core::readiness::{wait_for_containers, ContainerReadiness};
use dockwait_core::runtime::{ContainerFilter, DockerClient};

use super::Timing;

pub fn run_wait(
    cfg: &HarnessConfig,
    labels: Vec<String>,
    names: Vec<String>,
    count: usize,
    timing: &Timing,
) -> Result<()> {
    let client = DockerClient::new(&cfg.docker_host).context("connecting to docker")?;
    let filter = ContainerFilter { labels, names };
    let request = timing.request(cfg, &format!("{count} container(s)"))?;
    let readiness = ContainerReadiness::new(&client, filter, count)
        .with_markers(cfg.readiness.markers())
        .with_log_tail(cfg.readiness.tail())
        .with_marker_label(cfg.readiness.marker_label.clone());

    let containers = wait_for_containers(&readiness, &request)
        .into_result(request.what(), request.timeout())?;
    for c in &containers {
        let short_id = c.id.get(..12).unwrap_or(c.id.as_str());
        println!("{:<14} {:<24} {}", short_id, c.display_name(), c.status);
    }
    Ok(())
}
