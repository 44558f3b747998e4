/// Log substrings that decide readiness of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMarkers {
    /// Printed once provisioning finished successfully.
    pub completion: String,
    /// Any of these means startup failed for good.
    pub fatal: Vec<String>,
}

impl Default for LogMarkers {
    fn default() -> Self {
        Self {
            completion: "Ansible playbook complete".to_string(),
            fatal: vec![
                "unable to".to_string(),
                "denied".to_string(),
                "splunkd.pid file is unreadable".to_string(),
            ],
        }
    }
}

/// What a log excerpt says about startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogVerdict<'a> {
    Complete,
    /// The first line containing a fatal marker.
    Failed(&'a str),
    Pending,
}

impl LogMarkers {
    /// Fatal markers win over the completion marker.
    pub fn scan<'a>(&self, logs: &'a str) -> LogVerdict<'a> {
        let failed = logs.lines().find(|line| {
            self.fatal
                .iter()
                .filter(|m| !m.is_empty())
                .any(|m| line.contains(m.as_str()))
        });
        if let Some(line) = failed {
            return LogVerdict::Failed(line.trim());
        }
        if !self.completion.is_empty() && logs.contains(self.completion.as_str()) {
            return LogVerdict::Complete;
        }
        LogVerdict::Pending
    }
}
