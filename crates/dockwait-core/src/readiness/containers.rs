//! Readiness of a set of containers, judged from state and log tails.

use crate::poll::{poll_until, Check, PollOutcome, PollRequest};
use crate::runtime::{ContainerFilter, ContainerRuntime, ContainerSummary};

use super::markers::{LogMarkers, LogVerdict};

/// All containers matching `filter` are up, and the watched ones have
/// logged the completion marker.
pub struct ContainerReadiness<'a, R: ContainerRuntime + ?Sized> {
    runtime: &'a R,
    filter: ContainerFilter,
    expected: usize,
    markers: LogMarkers,
    log_tail: Option<usize>,
    marker_label: Option<String>,
}

impl<'a, R: ContainerRuntime + ?Sized> ContainerReadiness<'a, R> {
    /// Expect exactly `expected` containers to match `filter`.
    pub fn new(runtime: &'a R, filter: ContainerFilter, expected: usize) -> Self {
        Self {
            runtime,
            filter,
            expected,
            markers: LogMarkers::default(),
            log_tail: Some(5),
            marker_label: None,
        }
    }

    pub fn with_markers(mut self, markers: LogMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// How many trailing log lines to scan; `None` scans everything.
    pub fn with_log_tail(mut self, tail: Option<usize>) -> Self {
        self.log_tail = tail;
        self
    }

    /// Only containers carrying this label (`key` or `key=value`) are judged
    /// by their logs; the rest count as ready once running.
    pub fn with_marker_label(mut self, label: Option<String>) -> Self {
        self.marker_label = label;
        self
    }

    /// One evaluation. Runtime query failures count as not ready.
    pub fn check(&self) -> Check<Vec<ContainerSummary>> {
        let containers = match self.runtime.list_containers(&self.filter) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, "listing containers failed");
                return Check::NotYetReady;
            }
        };
        if containers.len() != self.expected {
            tracing::debug!(
                found = containers.len(),
                expected = self.expected,
                "container count mismatch"
            );
            return Check::NotYetReady;
        }

        let mut ready = 0usize;
        for container in &containers {
            match self.check_one(container) {
                Check::Success(()) => ready += 1,
                Check::NotYetReady => {}
                Check::Fatal(reason) => return Check::Fatal(reason),
            }
        }
        tracing::debug!(ready, expected = self.expected, "containers ready");
        if ready == self.expected {
            Check::Success(containers)
        } else {
            Check::NotYetReady
        }
    }

    /// Poll [`check`](Self::check) under `request`.
    pub fn wait(&self, request: &PollRequest) -> PollOutcome<Vec<ContainerSummary>> {
        poll_until(request, || self.check())
    }

    fn check_one(&self, container: &ContainerSummary) -> Check<()> {
        let name = container.display_name();
        if container.has_stopped() {
            let last_line = self
                .runtime
                .logs(&container.id, self.log_tail)
                .ok()
                .and_then(|logs| logs.lines().rev().find(|l| !l.trim().is_empty()).map(str::to_string))
                .unwrap_or_default();
            return Check::Fatal(format!(
                "container {name} stopped ({}); last log line: {last_line}",
                container.status
            ));
        }
        if !container.is_running() {
            return Check::NotYetReady;
        }
        let watched = self
            .marker_label
            .as_deref()
            .map_or(true, |label| container.matches_label(label));
        if !watched {
            return Check::Success(());
        }

        let logs = match self.runtime.logs(&container.id, self.log_tail) {
            Ok(logs) => logs,
            Err(e) => {
                tracing::warn!(container = name, error = %e, "reading logs failed");
                return Check::NotYetReady;
            }
        };
        match self.markers.scan(&logs) {
            LogVerdict::Complete => Check::Success(()),
            LogVerdict::Pending => Check::NotYetReady,
            LogVerdict::Failed(line) => Check::Fatal(format!(
                "container {name} did not start properly: {line}"
            )),
        }
    }
}

/// Wait until `readiness` holds, fails for good, or `request` times out.
pub fn wait_for_containers<R: ContainerRuntime + ?Sized>(
    readiness: &ContainerReadiness<'_, R>,
    request: &PollRequest,
) -> PollOutcome<Vec<ContainerSummary>> {
    readiness.wait(request)
}
