//! Integration test: fixed-delay retry and endpoint readiness against a
//! local scripted HTTP server.

mod common;

use std::time::{Duration, Instant};

use dockwait_core::http::{send, send_with_retry, Request, RequestError};
use dockwait_core::poll::{PollOutcome, PollRequest};
use dockwait_core::readiness::EndpointReadiness;
use dockwait_core::retry::RetryPolicy;

const SLACK: Duration = Duration::from_millis(750);

#[test]
fn always_503_fails_after_three_attempts_with_last_status() {
    let server = common::scripted_server::start(vec![(503, r#"{"messages":["starting"]}"#)]);
    let delay = Duration::from_millis(60);
    let policy = RetryPolicy::new(3, delay).unwrap();

    let start = Instant::now();
    let err = send_with_retry(&Request::get(server.url("/services/server/info")), &policy)
        .unwrap_err();
    let elapsed = start.elapsed();

    assert_eq!(err.status(), Some(503));
    match &err {
        RequestError::Status { body, .. } => assert!(body.contains("starting")),
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(server.hits(), 3);
    assert!(elapsed >= delay * 2, "elapsed {elapsed:?}");
    assert!(elapsed < delay * 2 + SLACK, "elapsed {elapsed:?}");

    // Attempts land roughly one delay apart.
    let times = server.arrival_times();
    for pair in times.windows(2) {
        assert!(pair[1].duration_since(pair[0]) >= delay);
    }
}

#[test]
fn third_attempt_success_is_returned() {
    let server = common::scripted_server::start(vec![
        (503, "{}"),
        (500, "{}"),
        (200, r#"{"entry":[{"content":{"version":"9.0.1"}}]}"#),
    ]);
    let policy = RetryPolicy::new(3, Duration::from_millis(20)).unwrap();
    let resp = send_with_retry(&Request::get(server.url("/services/server/info")), &policy).unwrap();
    assert_eq!(resp.status, 200);
    let v: serde_json::Value = resp.json().unwrap();
    assert_eq!(v["entry"][0]["content"]["version"], "9.0.1");
    assert_eq!(server.hits(), 3);
}

#[test]
fn single_attempt_policy_does_not_retry() {
    let server = common::scripted_server::start(vec![(500, "{}"), (200, "{}")]);
    let err = send_with_retry(&Request::get(server.url("/")), &RetryPolicy::single()).unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(server.hits(), 1);
}

#[test]
fn connection_refused_is_retried_then_reported() {
    // Grab a free port and close it again so nothing listens there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let policy = RetryPolicy::new(2, Duration::from_millis(10)).unwrap();
    let err = send_with_retry(&Request::get(format!("http://127.0.0.1:{port}/")), &policy)
        .unwrap_err();
    assert!(err.is_transport(), "{err:?}");
}

#[test]
fn auth_headers_and_body_are_sent() {
    let server = common::scripted_server::start(vec![(201, "{}")]);
    let req = Request::post(server.url("/services/authentication/users"))
        .basic_auth("admin", "hello")
        .header("X-Test", "1")
        .json(&serde_json::json!({"name": "newuser"}))
        .unwrap();
    let resp = send(&req).unwrap();
    assert_eq!(resp.status, 201);

    let seen = &server.requests()[0];
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path(), "/services/authentication/users");
    assert_eq!(seen.header("authorization"), Some("Basic YWRtaW46aGVsbG8="));
    assert_eq!(seen.header("x-test"), Some("1"));
    assert_eq!(seen.header("content-type"), Some("application/json"));
    assert_eq!(seen.body, br#"{"name":"newuser"}"#);
}

#[test]
fn send_reports_non_2xx_without_error() {
    let server = common::scripted_server::start(vec![(404, r#"{"messages":[]}"#)]);
    let resp = send(&Request::get(server.url("/nope"))).unwrap();
    assert_eq!(resp.status, 404);
    assert!(!resp.is_success());
    assert_eq!(resp.header("content-type"), Some("application/json"));
}

#[test]
fn endpoint_readiness_waits_for_2xx() {
    let server = common::scripted_server::start(vec![(503, "{}"), (503, "{}"), (200, "{}")]);
    let readiness = EndpointReadiness::new(Request::get(server.url("/services/server/health")));
    let req = PollRequest::new("health", Duration::from_secs(10), Duration::from_millis(10)).unwrap();
    let out = readiness.wait(&req);
    assert!(matches!(out, PollOutcome::Succeeded(ref r) if r.status == 200), "{out:?}");
    assert_eq!(server.hits(), 3);
}

#[test]
fn endpoint_readiness_gives_up_on_unauthorized() {
    let server = common::scripted_server::start(vec![(401, "{}")]);
    let readiness = EndpointReadiness::new(Request::get(server.url("/services/server/info")));
    let req = PollRequest::new("info", Duration::from_secs(10), Duration::from_millis(10)).unwrap();
    let start = Instant::now();
    match readiness.wait(&req) {
        PollOutcome::FailedFatally(reason) => assert!(reason.contains("401"), "{reason}"),
        other => panic!("expected fatal, got {other:?}"),
    }
    assert_eq!(server.hits(), 1);
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[test]
fn endpoint_readiness_times_out() {
    let server = common::scripted_server::start(vec![(503, "{}")]);
    let readiness = EndpointReadiness::new(Request::get(server.url("/")));
    let req = PollRequest::new("root", Duration::from_millis(100), Duration::from_millis(20)).unwrap();
    assert!(matches!(readiness.wait(&req), PollOutcome::TimedOut));
    assert!(server.hits() >= 2);
}
