use thiserror::Error;

use crate::http::RequestError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("no such container or exec instance: {0}")]
    NotFound(String),
    #[error("docker API returned HTTP {status}: {message}")]
    Api { status: u32, message: String },
    #[error("unsupported docker host {0:?} (expected unix://, tcp://, http:// or https://)")]
    InvalidHost(String),
    #[error("exec {0} finished without an exit code")]
    MissingExitCode(String),
}
