//! CLI for dockwait.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dockwait_core::config::{self, HarnessConfig};
use dockwait_core::poll::PollError;
use std::path::PathBuf;

use commands::{
    run_completions, run_exclusions, run_man, run_probe, run_request, run_wait, run_wait_exec,
    Timing,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dockwait")]
#[command(about = "Wait for containers and management endpoints to become ready", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/dockwait/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Wait until the matching containers are up and provisioned.
    Wait {
        /// Label filter, `key` or `key=value` (repeatable).
        #[arg(long = "label", value_name = "KEY[=VALUE]")]
        labels: Vec<String>,
        /// Container name filter (repeatable).
        #[arg(long = "name", value_name = "NAME")]
        names: Vec<String>,
        /// Number of containers expected to match.
        #[arg(long)]
        count: usize,
        #[command(flatten)]
        timing: Timing,
    },

    /// Wait until an HTTP endpoint answers 2xx.
    Probe {
        /// URL, or a path resolved against the configured API base URL.
        url: String,
        /// Do not send the configured API credentials.
        #[arg(long)]
        no_auth: bool,
        #[command(flatten)]
        timing: Timing,
    },

    /// Send one request to the management API, retrying failures.
    Request {
        /// HTTP method (GET, POST, PUT, PATCH, DELETE, HEAD).
        method: String,
        /// URL, or a path resolved against the configured API base URL.
        url: String,
        /// Request body.
        #[arg(long, short = 'd')]
        data: Option<String>,
        /// Extra header as `Name: value` (repeatable).
        #[arg(long = "header", short = 'H', value_name = "NAME: VALUE")]
        headers: Vec<String>,
        /// Do not send the configured API credentials.
        #[arg(long)]
        no_auth: bool,
        /// Override the configured number of attempts.
        #[arg(long, value_name = "N")]
        attempts: Option<u32>,
    },

    /// Wait until a command exits 0 inside a container.
    WaitExec {
        /// Container id or name.
        container: String,
        #[command(flatten)]
        timing: Timing,
        /// Command and arguments, after `--`.
        #[arg(last = true, required = true)]
        cmd: Vec<String>,
    },

    /// Print the exclusion list for a product version.
    Exclusions {
        /// Version (`8.1.2`) or package file name containing it.
        version: String,
        /// TOML file with `[[rule]]` entries.
        #[arg(long, value_name = "FILE")]
        rules: PathBuf,
    },

    /// Print shell completions.
    Completions {
        shell: clap_complete::Shell,
    },

    /// Print the man page.
    Man,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            CliCommand::Exclusions { version, rules } => return run_exclusions(&version, &rules),
            _ => {}
        }

        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Wait {
                labels,
                names,
                count,
                timing,
            } => run_wait(&cfg, labels, names, count, &timing)?,
            CliCommand::Probe {
                url,
                no_auth,
                timing,
            } => run_probe(&cfg, &url, no_auth, &timing)?,
            CliCommand::Request {
                method,
                url,
                data,
                headers,
                no_auth,
                attempts,
            } => run_request(&cfg, &method, &url, data, &headers, no_auth, attempts)?,
            CliCommand::WaitExec {
                container,
                timing,
                cmd,
            } => run_wait_exec(&cfg, &container, cmd, &timing)?,
            CliCommand::Exclusions { .. } | CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

/// Process exit status: 2 when a wait timed out, 3 when it failed fatally,
/// 1 for everything else.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<PollError>() {
        Some(PollError::TimedOut { .. }) => 2,
        Some(PollError::Fatal { .. }) => 3,
        _ => 1,
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<HarnessConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;
