//! Error types emitted by the map story CLI.
//!
//! Resolution itself never fails; these cover configuration, transport
//! setup and writing the hand-off.

use std::sync::Arc;

use camino::Utf8PathBuf;
use mapstory_data::FetcherBuildError;
use thiserror::Error;

/// Errors emitted by the map story CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A zero timeout would fail every source before it is contacted.
    #[error("{field} must be at least one second (set --{field} or {env})")]
    ZeroTimeout {
        /// Offending flag name.
        field: &'static str,
        /// Matching environment variable.
        env: &'static str,
    },
    /// Constructing the HTTP fetcher failed.
    #[error("failed to build boundary fetcher: {0}")]
    BuildFetcher(#[source] FetcherBuildError),
    /// Encoding the hand-off failed.
    #[error("failed to serialise boundary hand-off: {0}")]
    SerialiseHandoff(#[source] serde_json::Error),
    /// Writing the hand-off file failed.
    #[error("failed to write boundary hand-off to {path:?}: {source}")]
    WriteOutputFile {
        /// Requested output path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Writing the hand-off to standard output failed.
    #[error("failed to write boundary hand-off: {0}")]
    WriteStdout(#[source] std::io::Error),
}
