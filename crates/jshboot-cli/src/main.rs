use jshboot_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    match logging::init_logging() {
        Ok(path) => tracing::debug!("logging to {}", path.display()),
        Err(e) => {
            logging::init_logging_stderr();
            tracing::debug!("file logging unavailable: {:#}", e);
        }
    }

    // Parse CLI and dispatch.
    match CliCommand::run_from_args() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("jshboot error: {:#}", err);
            std::process::exit(1);
        }
    }
}
