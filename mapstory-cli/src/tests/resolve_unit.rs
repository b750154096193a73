//! Focused unit tests covering resolve CLI configuration and output.

use super::helpers::{StubFetcherBuilder, provenance_tags};
use super::*;
use crate::resolve::{ResolveArgs, ResolveConfig, config_from_layers_for_test, run_resolve_with};
use camino::Utf8PathBuf;
use mapstory_data::HttpBoundaryFetcherConfig;
use rstest::rstest;
use std::time::Duration;
use tempfile::TempDir;

#[rstest]
fn converting_empty_args_uses_fetcher_defaults() {
    let config = ResolveConfig::try_from(ResolveArgs::default()).expect("config should build");
    assert_eq!(config.fetcher, HttpBoundaryFetcherConfig::default());
    assert!(config.output.is_none());
}

#[rstest]
fn converting_args_applies_transport_overrides() {
    let args = ResolveArgs {
        timeout_secs: Some(5),
        user_agent: Some("mapstory-test/1.0".to_owned()),
        output: Some(Utf8PathBuf::from("out/boundaries.geojson")),
    };

    let config = ResolveConfig::try_from(args).expect("config should build");

    assert_eq!(config.fetcher.timeout, Duration::from_secs(5));
    assert_eq!(config.fetcher.user_agent, "mapstory-test/1.0");
    assert_eq!(
        config.output.as_deref(),
        Some(camino::Utf8Path::new("out/boundaries.geojson"))
    );
}

#[rstest]
fn converting_zero_timeout_errors() {
    let args = ResolveArgs {
        timeout_secs: Some(0),
        ..ResolveArgs::default()
    };

    let err = ResolveConfig::try_from(args).expect_err("zero timeout should error");
    match err {
        CliError::ZeroTimeout { field, env } => {
            assert_eq!(field, ARG_TIMEOUT_SECS);
            assert_eq!(env, ENV_TIMEOUT_SECS);
        }
        other => panic!("expected ZeroTimeout, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "timeout_secs": "soon" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "timeout_secs": 60,
            "user_agent": "from-file/1.0",
            "output": "from-file.geojson",
        }),
        None,
    );
    composer.push_environment(json!({
        "timeout_secs": 45,
        "user_agent": "from-env/1.0",
    }));
    composer.push_cli(json!({ "timeout_secs": 10 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.fetcher.timeout, Duration::from_secs(10));
    assert_eq!(config.fetcher.user_agent, "from-env/1.0");
    assert_eq!(config.output, Some(Utf8PathBuf::from("from-file.geojson")));
}

#[rstest]
fn run_resolve_writes_handoff_to_stdout() {
    let builder = StubFetcherBuilder::healthy();
    let mut stdout = Vec::new();

    run_resolve_with(
        ResolveArgs {
            timeout_secs: Some(7),
            ..ResolveArgs::default()
        },
        &builder,
        &mut stdout,
    )
    .expect("resolve should succeed");

    assert_eq!(
        provenance_tags(&stdout),
        ["source-1", "source-1", "municipality-1"]
    );
    let seen = builder.seen.borrow();
    assert_eq!(
        seen.as_ref().map(|config| config.timeout),
        Some(Duration::from_secs(7))
    );
}

#[rstest]
fn run_resolve_writes_handoff_file() {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    let output = root.join("nested/handoff.geojson");
    let mut stdout = Vec::new();

    run_resolve_with(
        ResolveArgs {
            output: Some(output.clone()),
            ..ResolveArgs::default()
        },
        &StubFetcherBuilder::unreachable(),
        &mut stdout,
    )
    .expect("fallback resolution is still a success");

    assert!(stdout.is_empty());
    let written = std::fs::read(&output).expect("hand-off file");
    assert_eq!(provenance_tags(&written), ["fallback", "fallback", "fallback"]);
}
