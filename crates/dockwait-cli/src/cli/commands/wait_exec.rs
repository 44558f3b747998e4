//! `dockwait wait-exec` – poll until a command succeeds inside a container.

use anyhow::{Context, Result};
use dockwait_core::config::HarnessConfig;
use dockwait_core::readiness::ExecReadiness;
use dockwait_core::runtime::DockerClient;

use super::Timing;

pub fn run_wait_exec(
    cfg: &HarnessConfig,
    container: &str,
    cmd: Vec<String>,
    timing: &Timing,
) -> Result<()> {
    let client = DockerClient::new(&cfg.docker_host).context("connecting to docker")?;
    let request = timing.request(cfg, &format!("`{}` in {container}", cmd.join(" ")))?;
    let out = ExecReadiness::new(&client, container, cmd)
        .wait(&request)
        .into_result(request.what(), request.timeout())?;
    print!("{}", out.output);
    Ok(())
}
