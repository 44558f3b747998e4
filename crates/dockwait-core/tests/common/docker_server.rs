//! Fake Docker Engine API covering the endpoints the client uses.

use std::collections::HashMap;
use std::io::Write;
use std::net::TcpListener;
#[cfg(unix)]
use std::os::unix::net::UnixListener;
use std::sync::{Arc, Mutex};
use std::thread;

use super::{frame, read_request, write_response, RecordedRequest, READ_TIMEOUT};

#[derive(Debug, Default)]
pub struct DockerState {
    /// Entries of `GET /containers/json`, in Docker's JSON shape.
    pub containers: Vec<serde_json::Value>,
    /// Log text per container id, served as stdout frames.
    pub logs: HashMap<String, String>,
    pub exec_exit_code: i64,
    pub exec_output: String,
    pub requests: Vec<RecordedRequest>,
}

pub struct DockerServer {
    pub host: String,
    pub state: Arc<Mutex<DockerState>>,
    /// Holds the socket directory of a Unix-socket daemon.
    _dir: Option<tempfile::TempDir>,
}

impl DockerServer {
    pub fn with_state<R>(&self, f: impl FnOnce(&mut DockerState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }
}

pub fn container(id: &str, name: &str, state: &str, labels: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "Id": id,
        "Names": [format!("/{name}")],
        "Image": "splunk/splunk:latest",
        "Labels": labels,
        "State": state,
        "Status": if state == "running" { "Up 10 seconds" } else { "Exited (1) 2 seconds ago" },
    })
}

/// Start the fake daemon; `host` is a `tcp://` docker host string.
pub fn start(initial: DockerState) -> DockerServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let state = Arc::new(Mutex::new(initial));
    let state_srv = Arc::clone(&state);
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            let _ = stream.set_read_timeout(Some(READ_TIMEOUT));
            if let Some(request) = read_request(&mut stream) {
                handle(&mut stream, request, &state_srv);
            }
        }
    });
    DockerServer {
        host: format!("tcp://127.0.0.1:{}", port),
        state,
        _dir: None,
    }
}

/// Start the fake daemon on a Unix socket; `host` is a `unix://` docker host string.
#[cfg(unix)]
pub fn start_unix(initial: DockerState) -> DockerServer {
    let dir = tempfile::tempdir().expect("tempdir");
    let socket = dir.path().join("docker.sock");
    let listener = UnixListener::bind(&socket).expect("bind unix socket");
    let state = Arc::new(Mutex::new(initial));
    let state_srv = Arc::clone(&state);
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            let _ = stream.set_read_timeout(Some(READ_TIMEOUT));
            if let Some(request) = read_request(&mut stream) {
                handle(&mut stream, request, &state_srv);
            }
        }
    });
    DockerServer {
        host: format!("unix://{}", socket.display()),
        state,
        _dir: Some(dir),
    }
}

fn handle<S: Write>(stream: &mut S, request: RecordedRequest, state: &Mutex<DockerState>) {
    let mut st = state.lock().unwrap();
    st.requests.push(request.clone());
    let path = request.path().trim_start_matches("/v1.41");
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let json = "application/json";
    let stream_type = "application/vnd.docker.raw-stream";
    match (request.method.as_str(), segments.as_slice()) {
        ("GET", ["containers", "json"]) => {
            let body = serde_json::to_vec(&st.containers).unwrap();
            write_response(stream, 200, json, &body);
        }
        ("GET", ["containers", id, "logs"]) => match st.logs.get(*id) {
            Some(text) => {
                let tail: Option<usize> = request.query("tail").and_then(|t| t.parse().ok());
                let lines: Vec<&str> = text.lines().collect();
                let start = tail.map_or(0, |n| lines.len().saturating_sub(n));
                let mut body = Vec::new();
                for line in &lines[start..] {
                    body.extend(frame(1, &format!("{line}\n")));
                }
                write_response(stream, 200, stream_type, &body);
            }
            None => write_response(stream, 404, json, br#"{"message":"No such container"}"#),
        },
        ("POST", ["containers", id, "exec"]) => {
            if st.logs.contains_key(*id) {
                let body = format!(r#"{{"Id":"exec-{id}"}}"#);
                write_response(stream, 201, json, body.as_bytes());
            } else {
                write_response(stream, 404, json, br#"{"message":"No such container"}"#);
            }
        }
        ("POST", ["exec", _, "start"]) => {
            let body = frame(1, &st.exec_output);
            write_response(stream, 200, stream_type, &body);
        }
        ("GET", ["exec", _, "json"]) => {
            let body = format!(r#"{{"ExitCode":{},"Running":false}}"#, st.exec_exit_code);
            write_response(stream, 200, json, body.as_bytes());
        }
        _ => write_response(stream, 500, json, br#"{"message":"unexpected request"}"#),
    }
}
