//! Readiness judged by a command run inside a container.

use crate::poll::{poll_until, Check, PollOutcome, PollRequest};
use crate::runtime::{ContainerRuntime, ExecOutput, RuntimeError};

/// `cmd` exits 0 inside `container`.
pub struct ExecReadiness<'a, R: ContainerRuntime + ?Sized> {
    runtime: &'a R,
    container: String,
    cmd: Vec<String>,
}

impl<'a, R: ContainerRuntime + ?Sized> ExecReadiness<'a, R> {
    pub fn new(runtime: &'a R, container: impl Into<String>, cmd: Vec<String>) -> Self {
        Self {
            runtime,
            container: container.into(),
            cmd,
        }
    }

    pub fn check(&self) -> Check<ExecOutput> {
        match self.runtime.exec(&self.container, &self.cmd) {
            Ok(out) if out.succeeded() => Check::Success(out),
            Ok(out) => {
                tracing::debug!(
                    container = %self.container,
                    exit_code = out.exit_code,
                    "command not successful yet"
                );
                Check::NotYetReady
            }
            Err(RuntimeError::NotFound(what)) => {
                Check::Fatal(format!("container {} not found ({what})", self.container))
            }
            Err(e) => {
                tracing::warn!(container = %self.container, error = %e, "exec failed");
                Check::NotYetReady
            }
        }
    }

    pub fn wait(&self, request: &PollRequest) -> PollOutcome<ExecOutput> {
        poll_until(request, || self.check())
    }
}
