//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use mapstory_cli::CliError;

fn main() {
    mapstory_cli::init_logging();
    match mapstory_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("mapstory: {err}");
            std::process::exit(1);
        }
    }
}
