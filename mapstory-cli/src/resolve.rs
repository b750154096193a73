//! Resolve command implementation for the map story CLI.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use mapstory_core::{BoundaryFetcher, BoundaryResolver, Resolution};
use mapstory_data::{HttpBoundaryFetcher, HttpBoundaryFetcherConfig, to_feature_collection};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_OUTPUT, ARG_TIMEOUT_SECS, ARG_USER_AGENT, CliError, ENV_TIMEOUT_SECS};

/// CLI arguments for the `resolve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Fetch boundary data from the built-in source chains, fall \
                 back to static outlines when every country source fails, \
                 and emit a GeoJSON hand-off for the renderer. Transport \
                 settings can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Resolve boundaries and emit the renderer hand-off"
)]
#[ortho_config(prefix = "MAPSTORY")]
pub(crate) struct ResolveArgs {
    /// Seconds allowed for each source before it counts as failed.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// User agent sent with every boundary request.
    #[arg(long = ARG_USER_AGENT, value_name = "agent")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
    /// Write the hand-off here instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ResolveArgs {
    pub(crate) fn into_config(self) -> Result<ResolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ResolveConfig::try_from(merged)
    }
}

/// Resolved `resolve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolveConfig {
    /// Transport settings for the HTTP fetcher.
    pub(crate) fetcher: HttpBoundaryFetcherConfig,
    /// Hand-off destination; `None` means standard output.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<ResolveArgs> for ResolveConfig {
    type Error = CliError;

    fn try_from(args: ResolveArgs) -> Result<Self, Self::Error> {
        let mut fetcher = HttpBoundaryFetcherConfig::default();
        if let Some(secs) = args.timeout_secs {
            if secs == 0 {
                return Err(CliError::ZeroTimeout {
                    field: ARG_TIMEOUT_SECS,
                    env: ENV_TIMEOUT_SECS,
                });
            }
            fetcher = fetcher.with_timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = args.user_agent {
            fetcher = fetcher.with_user_agent(user_agent);
        }
        Ok(Self {
            fetcher,
            output: args.output,
        })
    }
}

/// Builds the boundary fetcher for the current resolve invocation.
pub(crate) trait ResolveFetcherBuilder {
    fn build(&self, config: &HttpBoundaryFetcherConfig)
    -> Result<Box<dyn BoundaryFetcher>, CliError>;
}

pub(crate) struct DefaultResolveFetcherBuilder;

impl ResolveFetcherBuilder for DefaultResolveFetcherBuilder {
    fn build(
        &self,
        config: &HttpBoundaryFetcherConfig,
    ) -> Result<Box<dyn BoundaryFetcher>, CliError> {
        let fetcher =
            HttpBoundaryFetcher::with_config(config.clone()).map_err(CliError::BuildFetcher)?;
        Ok(Box::new(fetcher))
    }
}

pub(crate) fn run_resolve(args: ResolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_resolve_with(args, &DefaultResolveFetcherBuilder, &mut stdout)
}

pub(crate) fn run_resolve_with(
    args: ResolveArgs,
    builder: &dyn ResolveFetcherBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let resolution = execute_resolve(&config, builder)?;
    write_handoff(&config, &resolution, writer)
}

fn execute_resolve(
    config: &ResolveConfig,
    builder: &dyn ResolveFetcherBuilder,
) -> Result<Resolution, CliError> {
    let fetcher = builder.build(&config.fetcher)?;
    let resolution = BoundaryResolver::new(fetcher).resolve();
    for boundary in resolution.boundaries() {
        info!(
            "{} boundary '{}' from {}{}",
            boundary.level(),
            boundary.label(),
            boundary.provenance(),
            if boundary.is_complete() { "" } else { " (incomplete)" }
        );
    }
    Ok(resolution)
}

fn write_handoff(
    config: &ResolveConfig,
    resolution: &Resolution,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let handoff = to_feature_collection(resolution).map_err(CliError::SerialiseHandoff)?;
    let mut payload =
        serde_json::to_string_pretty(&handoff).map_err(CliError::SerialiseHandoff)?;
    payload.push('\n');

    match &config.output {
        Some(path) => {
            mapstory_fs::write_file(path, payload.as_bytes()).map_err(|source| {
                CliError::WriteOutputFile {
                    path: path.clone(),
                    source,
                }
            })?;
            info!("Wrote boundary hand-off to {path}");
            Ok(())
        }
        None => writer
            .write_all(payload.as_bytes())
            .map_err(CliError::WriteStdout),
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ResolveConfig, CliError> {
    let merged = ResolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ResolveConfig::try_from(merged)
}
