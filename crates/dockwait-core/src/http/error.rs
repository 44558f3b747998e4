use thiserror::Error;

use super::request::Method;

/// Failure of a single HTTP exchange.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Curl could not complete the exchange (connect, TLS, timeout, ...).
    #[error("{method} {url}: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: curl::Error,
    },
    /// A response arrived but its status was not 2xx.
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: Method,
        url: String,
        status: u32,
        body: String,
    },
    #[error("invalid request: {0}")]
    Invalid(String),
    #[error("decoding response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RequestError {
    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u32> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RequestError::Transport { .. })
    }
}
