use dockwait_core::logging;

mod cli;

use crate::cli::{exit_code, CliCommand};

fn main() {
    // Initialize logging as early as possible; fall back to stderr.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("dockwait error: {:#}", err);
        std::process::exit(exit_code(&err));
    }
}
