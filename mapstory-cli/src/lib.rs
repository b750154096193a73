//! Command-line host for the map story's boundary resolution.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod resolve;

pub use error::CliError;

const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_USER_AGENT: &str = "user-agent";
const ARG_OUTPUT: &str = "output";
const ENV_TIMEOUT_SECS: &str = "MAPSTORY_CMDS_RESOLVE_TIMEOUT_SECS";

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

/// Install a stderr log subscriber honouring `RUST_LOG`.
///
/// Library crates log through the `log` facade; the subscriber's `log`
/// bridge forwards those records. Calling this twice is harmless.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        log::debug!("Log subscriber already installed");
    }
}

/// Run the map story CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// fetcher cannot be built, or the hand-off cannot be written. A resolution
/// that ends in the static fallback is not an error.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Resolve(args) => resolve::run_resolve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "mapstory",
    about = "Resolve the administrative boundaries drawn by the Nepal map story",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve country, province and municipality boundaries once.
    Resolve(resolve::ResolveArgs),
}

#[cfg(test)]
mod tests;
