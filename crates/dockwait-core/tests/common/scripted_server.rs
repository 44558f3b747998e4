//! HTTP server answering from a fixed script of statuses.
//!
//! Response `i` goes to the `i`-th request; once the script runs out the
//! last entry repeats. Every request is recorded with its arrival time.

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use super::{read_request, write_response, RecordedRequest, READ_TIMEOUT};

pub struct ScriptedServer {
    pub base_url: String,
    hits: Arc<Mutex<Vec<(Instant, RecordedRequest)>>>,
}

impl ScriptedServer {
    pub fn hits(&self) -> usize {
        self.hits.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.hits.lock().unwrap().iter().map(|(_, r)| r.clone()).collect()
    }

    pub fn arrival_times(&self) -> Vec<Instant> {
        self.hits.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Start a server replying with `script` entries of `(status, body)`.
pub fn start(script: Vec<(u16, &'static str)>) -> ScriptedServer {
    assert!(!script.is_empty(), "script needs at least one response");
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(Mutex::new(Vec::new()));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            let _ = stream.set_read_timeout(Some(READ_TIMEOUT));
            let Some(request) = read_request(&mut stream) else {
                continue;
            };
            let index = {
                let mut hits = hits_srv.lock().unwrap();
                hits.push((Instant::now(), request));
                hits.len() - 1
            };
            let (status, body) = script[index.min(script.len() - 1)];
            write_response(&mut stream, status, "application/json", body.as_bytes());
        }
    });
    ScriptedServer {
        base_url: format!("http://127.0.0.1:{}", port),
        hits,
    }
}
