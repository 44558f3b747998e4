//! Container runtime queries used by readiness predicates.
//!
//! The [`ContainerRuntime`] trait is the seam between predicates and the
//! runtime; [`DockerClient`] implements it against the Docker Engine API.
//! Tests substitute in-memory runtimes.

mod docker;
mod error;
mod stream;
mod types;

pub use docker::DockerClient;
pub use error::RuntimeError;
pub use stream::demux;
pub use types::{ContainerFilter, ContainerSummary, ExecOutput};

/// Read-only view of a container runtime (plus `exec`, which runs inside a
/// container but does not change its lifecycle).
pub trait ContainerRuntime {
    /// Containers matching `filter`, including stopped ones.
    fn list_containers(&self, filter: &ContainerFilter) -> Result<Vec<ContainerSummary>, RuntimeError>;

    /// Combined stdout/stderr of a container; `tail` limits to the last lines.
    fn logs(&self, id: &str, tail: Option<usize>) -> Result<String, RuntimeError>;

    /// Run `cmd` inside a running container and wait for it to exit.
    fn exec(&self, id: &str, cmd: &[String]) -> Result<ExecOutput, RuntimeError>;
}

impl<R: ContainerRuntime + ?Sized> ContainerRuntime for &R {
    fn list_containers(&self, filter: &ContainerFilter) -> Result<Vec<ContainerSummary>, RuntimeError> {
        (**self).list_containers(filter)
    }

    fn logs(&self, id: &str, tail: Option<usize>) -> Result<String, RuntimeError> {
        (**self).logs(id, tail)
    }

    fn exec(&self, id: &str, cmd: &[String]) -> Result<ExecOutput, RuntimeError> {
        (**self).exec(id, cmd)
    }
}
