//! Harness configuration: `~/.config/dockwait/config.toml`.
//!
//! Every value the harness needs (docker host, credentials, timing, log
//! markers) lives here and is passed down explicitly; nothing is global.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::poll::PollRequest;
use crate::readiness::LogMarkers;
use crate::retry::RetryPolicy;

/// Poller timing (`[poll]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Give up after this many seconds.
    pub timeout_secs: f64,
    /// Seconds between predicate evaluations.
    pub interval_secs: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 500.0,
            interval_secs: 5.0,
        }
    }
}

impl PollConfig {
    pub fn request(&self, what: &str) -> Result<PollRequest> {
        PollRequest::from_secs_f64(what, self.timeout_secs, self.interval_secs)
            .context("invalid [poll] settings")
    }
}

/// Retry parameters for management API calls (`[retry]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Fixed delay in seconds between attempts.
    pub delay_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            delay_secs: 6.0,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> Result<RetryPolicy> {
        RetryPolicy::from_secs_f64(self.max_attempts, self.delay_secs)
            .context("invalid [retry] settings")
    }
}

/// Management API endpoint and credentials (`[api]`).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Skip TLS verification (the product ships self-signed certs).
    #[serde(default)]
    pub insecure: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:8089".to_string(),
            username: "admin".to_string(),
            password: String::new(),
            insecure: true,
        }
    }
}

// Hand-written so the password never reaches the log.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &password)
            .field("insecure", &self.insecure)
            .finish()
    }
}

impl ApiConfig {
    /// Whether `url` points at the API host (same scheme, host and port as
    /// `base_url`). Credentials are only sent there.
    pub fn is_api_url(&self, url: &str) -> bool {
        match (Url::parse(&self.base_url), Url::parse(url)) {
            (Ok(base), Ok(target)) => {
                base.scheme() == target.scheme()
                    && base.host_str() == target.host_str()
                    && base.port_or_known_default() == target.port_or_known_default()
            }
            _ => false,
        }
    }

    /// Resolve `target` against `base_url` when it is a bare path.
    pub fn resolve(&self, target: &str) -> String {
        if target.starts_with('/') {
            format!("{}{}", self.base_url.trim_end_matches('/'), target)
        } else {
            target.to_string()
        }
    }
}

/// How container readiness is judged (`[readiness]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessConfig {
    pub completion_marker: String,
    pub fatal_markers: Vec<String>,
    /// Trailing log lines to scan (0 = whole log).
    pub log_tail: usize,
    /// Only containers with this label (`key` or `key=value`) are log-checked.
    #[serde(default)]
    pub marker_label: Option<String>,
    /// HTTP statuses that make an endpoint probe give up immediately.
    #[serde(default = "default_fatal_statuses")]
    pub fatal_statuses: Vec<u32>,
}

fn default_fatal_statuses() -> Vec<u32> {
    vec![401, 403]
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        let markers = LogMarkers::default();
        Self {
            completion_marker: markers.completion,
            fatal_markers: markers.fatal,
            log_tail: 5,
            marker_label: None,
            fatal_statuses: default_fatal_statuses(),
        }
    }
}

impl ReadinessConfig {
    pub fn markers(&self) -> LogMarkers {
        LogMarkers {
            completion: self.completion_marker.clone(),
            fatal: self.fatal_markers.clone(),
        }
    }

    pub fn tail(&self) -> Option<usize> {
        (self.log_tail > 0).then_some(self.log_tail)
    }
}

/// Global configuration loaded from `~/.config/dockwait/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// `unix:///var/run/docker.sock`, `tcp://host:port` or `http://host:port`.
    pub docker_host: String,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub readiness: ReadinessConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            docker_host: "unix:///var/run/docker.sock".to_string(),
            poll: PollConfig::default(),
            retry: RetryConfig::default(),
            api: ApiConfig::default(),
            readiness: ReadinessConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dockwait")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HarnessConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HarnessConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path; the file must exist.
pub fn load_from(path: &Path) -> Result<HarnessConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: HarnessConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
