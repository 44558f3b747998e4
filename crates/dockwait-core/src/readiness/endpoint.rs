//! Readiness of an HTTP endpoint.

use crate::http::{self, Request, RequestError, Response};
use crate::poll::{poll_until, Check, PollOutcome, PollRequest};

/// The endpoint answers `request` with a 2xx status.
#[derive(Debug, Clone)]
pub struct EndpointReadiness {
    request: Request,
    fatal_statuses: Vec<u32>,
}

impl EndpointReadiness {
    /// 401 and 403 are fatal by default: bad credentials do not fix themselves.
    pub fn new(request: Request) -> Self {
        Self {
            request,
            fatal_statuses: vec![401, 403],
        }
    }

    pub fn with_fatal_statuses(mut self, statuses: Vec<u32>) -> Self {
        self.fatal_statuses = statuses;
        self
    }

    pub fn check(&self) -> Check<Response> {
        match http::send(&self.request) {
            Ok(resp) if resp.is_success() => Check::Success(resp),
            Ok(resp) if self.fatal_statuses.contains(&resp.status) => Check::Fatal(format!(
                "{} {} returned HTTP {}",
                self.request.method(),
                self.request.url(),
                resp.status
            )),
            Ok(resp) => {
                tracing::debug!(url = self.request.url(), status = resp.status, "endpoint not ready");
                Check::NotYetReady
            }
            Err(RequestError::Invalid(msg)) => Check::Fatal(msg),
            Err(e) => {
                tracing::debug!(error = %e, "endpoint unreachable");
                Check::NotYetReady
            }
        }
    }

    pub fn wait(&self, request: &PollRequest) -> PollOutcome<Response> {
        poll_until(request, || self.check())
    }
}
