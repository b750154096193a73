//! Stub fetcher builders shared by unit and behaviour tests.

use crate::resolve::ResolveFetcherBuilder;
use super::*;
use mapstory_core::BoundaryFetcher;
use mapstory_data::HttpBoundaryFetcherConfig;
use mapstory_data::test_support::{StubBoundaryFetcher, polygon_collection};
use std::cell::RefCell;

/// Builder handing out a clone of a canned stub and recording the config.
#[derive(Debug, Default)]
pub(super) struct StubFetcherBuilder {
    pub(super) fetcher: StubBoundaryFetcher,
    pub(super) seen: RefCell<Option<HttpBoundaryFetcherConfig>>,
}

impl StubFetcherBuilder {
    pub(super) fn healthy() -> Self {
        let fetcher = StubBoundaryFetcher::new()
            .with_body(
                "source-1",
                polygon_collection(&[("ADM1_EN", "Koshi"), ("ADM1_EN", "Bagmati")]),
            )
            .with_body(
                "municipality-1",
                polygon_collection(&[("NAME", "Nagarjun")]),
            );
        Self {
            fetcher,
            seen: RefCell::new(None),
        }
    }

    pub(super) fn unreachable() -> Self {
        Self::default()
    }
}

impl ResolveFetcherBuilder for StubFetcherBuilder {
    fn build(
        &self,
        config: &HttpBoundaryFetcherConfig,
    ) -> Result<Box<dyn BoundaryFetcher>, CliError> {
        self.seen.replace(Some(config.clone()));
        Ok(Box::new(self.fetcher.clone()))
    }
}

pub(super) fn provenance_tags(stdout: &[u8]) -> Vec<String> {
    let handoff: serde_json::Value = serde_json::from_slice(stdout).expect("hand-off JSON");
    handoff["features"]
        .as_array()
        .expect("features array")
        .iter()
        .map(|feature| {
            feature["properties"]["provenance"]
                .as_str()
                .expect("provenance string")
                .to_owned()
        })
        .collect()
}
