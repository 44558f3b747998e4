//! Docker Engine API client over HTTP (TCP or Unix socket).

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use super::error::RuntimeError;
use super::stream::demux;
use super::types::{ContainerFilter, ContainerSummary, ExecOutput};
use super::ContainerRuntime;
use crate::http::{self, Method, Request, Response};

/// Engine API version prefix sent with every request.
pub const API_VERSION: &str = "v1.41";

/// Host used in URLs when talking over a Unix socket; the daemon ignores it.
const SOCKET_BASE_URL: &str = "http://localhost";

#[derive(Debug, Clone)]
pub struct DockerClient {
    base_url: String,
    unix_socket: Option<PathBuf>,
    timeout: Duration,
}

#[derive(Deserialize)]
struct ExecCreated {
    #[serde(rename = "Id")]
    id: String,
}

#[derive(Deserialize)]
struct ExecInspect {
    #[serde(rename = "ExitCode")]
    exit_code: Option<i64>,
}

#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

impl DockerClient {
    /// Connect according to `docker_host`: `unix:///path/to/docker.sock`,
    /// `tcp://host:port`, or an `http(s)://` base URL.
    pub fn new(docker_host: &str) -> Result<Self, RuntimeError> {
        let (base_url, unix_socket) = parse_docker_host(docker_host)?;
        Ok(Self {
            base_url,
            unix_socket,
            timeout: Duration::from_secs(60),
        })
    }

    /// Per-request timeout; exec start blocks until the command exits.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> Request {
        let req = Request::new(method, format!("{}/{}{}", self.base_url, API_VERSION, path))
            .timeout(self.timeout);
        match &self.unix_socket {
            Some(socket) => req.unix_socket(socket),
            None => req,
        }
    }

    /// Send and map 404 and other API errors; `subject` names the object for NotFound.
    fn call(&self, req: &Request, subject: &str) -> Result<Response, RuntimeError> {
        let resp = http::send(req)?;
        if resp.is_success() {
            return Ok(resp);
        }
        if resp.status == 404 {
            return Err(RuntimeError::NotFound(subject.to_string()));
        }
        let message = resp
            .json::<ApiMessage>()
            .map(|m| m.message)
            .unwrap_or_else(|_| resp.text());
        Err(RuntimeError::Api {
            status: resp.status,
            message,
        })
    }
}

impl ContainerRuntime for DockerClient {
    fn list_containers(&self, filter: &ContainerFilter) -> Result<Vec<ContainerSummary>, RuntimeError> {
        let filters = filter.to_docker_filters().to_string();
        let req = self
            .request(Method::Get, "/containers/json")
            .query(&[("all", "true"), ("filters", filters.as_str())])?;
        let resp = self.call(&req, "containers")?;
        Ok(resp.json()?)
    }

    fn logs(&self, id: &str, tail: Option<usize>) -> Result<String, RuntimeError> {
        let tail = tail.map_or_else(|| "all".to_string(), |n| n.to_string());
        let req = self
            .request(Method::Get, &format!("/containers/{id}/logs"))
            .query(&[("stdout", "true"), ("stderr", "true"), ("tail", tail.as_str())])?;
        let resp = self.call(&req, id)?;
        Ok(String::from_utf8_lossy(&demux(&resp.body)).into_owned())
    }

    fn exec(&self, id: &str, cmd: &[String]) -> Result<ExecOutput, RuntimeError> {
        let create = self
            .request(Method::Post, &format!("/containers/{id}/exec"))
            .json(&serde_json::json!({
                "AttachStdout": true,
                "AttachStderr": true,
                "Tty": false,
                "Cmd": cmd,
            }))?;
        let created: ExecCreated = self.call(&create, id)?.json()?;

        let start = self
            .request(Method::Post, &format!("/exec/{}/start", created.id))
            .json(&serde_json::json!({ "Detach": false, "Tty": false }))?;
        let started = self.call(&start, &created.id)?;
        let output = String::from_utf8_lossy(&demux(&started.body)).into_owned();

        let inspect = self.request(Method::Get, &format!("/exec/{}/json", created.id));
        let inspected: ExecInspect = self.call(&inspect, &created.id)?.json()?;
        let exit_code = inspected
            .exit_code
            .ok_or_else(|| RuntimeError::MissingExitCode(created.id.clone()))?;
        tracing::debug!(container = id, exec = %created.id, exit_code, "exec finished");
        Ok(ExecOutput { exit_code, output })
    }
}

fn parse_docker_host(host: &str) -> Result<(String, Option<PathBuf>), RuntimeError> {
    let host = host.trim();
    if let Some(path) = host.strip_prefix("unix://") {
        if path.is_empty() {
            return Err(RuntimeError::InvalidHost(host.to_string()));
        }
        return Ok((SOCKET_BASE_URL.to_string(), Some(PathBuf::from(path))));
    }
    if let Some(addr) = host.strip_prefix("tcp://") {
        if addr.is_empty() {
            return Err(RuntimeError::InvalidHost(host.to_string()));
        }
        return Ok((format!("http://{}", addr.trim_end_matches('/')), None));
    }
    if host.starts_with("http://") || host.starts_with("https://") {
        return Ok((host.trim_end_matches('/').to_string(), None));
    }
    Err(RuntimeError::InvalidHost(host.to_string()))
}
