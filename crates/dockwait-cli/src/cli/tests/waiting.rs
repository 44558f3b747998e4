use super::parse;
use super::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_wait() {
    match parse(&[
        "dockwait",
        "wait",
        "--label",
        "com.docker.compose.project=s1",
        "--label",
        "maintainer",
        "--count",
        "3",
    ]) {
        CliCommand::Wait {
            labels,
            names,
            count,
            timing,
        } => {
            assert_eq!(labels, vec!["com.docker.compose.project=s1", "maintainer"]);
            assert!(names.is_empty());
            assert_eq!(count, 3);
            assert!(timing.timeout.is_none());
            assert!(timing.interval.is_none());
        }
        _ => panic!("expected Wait"),
    }
}

#[test]
fn cli_parse_wait_requires_count() {
    assert!(Cli::try_parse_from(["dockwait", "wait", "--name", "so1"]).is_err());
}

#[test]
fn cli_parse_wait_timing() {
    match parse(&[
        "dockwait", "wait", "--name", "so1", "--count", "1", "--timeout", "90", "--interval", "0.5",
    ]) {
        CliCommand::Wait { names, timing, .. } => {
            assert_eq!(names, vec!["so1"]);
            assert_eq!(timing.timeout, Some(90.0));
            assert_eq!(timing.interval, Some(0.5));
        }
        _ => panic!("expected Wait"),
    }
}

#[test]
fn cli_parse_probe() {
    match parse(&["dockwait", "probe", "/services/server/health", "--no-auth"]) {
        CliCommand::Probe { url, no_auth, .. } => {
            assert_eq!(url, "/services/server/health");
            assert!(no_auth);
        }
        _ => panic!("expected Probe"),
    }
}

#[test]
fn cli_parse_wait_exec() {
    match parse(&[
        "dockwait",
        "wait-exec",
        "so1",
        "--timeout",
        "30",
        "--",
        "/opt/splunk/bin/splunk",
        "status",
    ]) {
        CliCommand::WaitExec {
            container,
            timing,
            cmd,
        } => {
            assert_eq!(container, "so1");
            assert_eq!(timing.timeout, Some(30.0));
            assert_eq!(cmd, vec!["/opt/splunk/bin/splunk", "status"]);
        }
        _ => panic!("expected WaitExec"),
    }
}

#[test]
fn cli_parse_wait_exec_requires_command() {
    assert!(Cli::try_parse_from(["dockwait", "wait-exec", "so1"]).is_err());
}
