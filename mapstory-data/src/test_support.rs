//! Test utilities for boundary fetchers.
//!
//! [`StubBoundaryFetcher`] answers sources with canned HTTP-like responses
//! and runs successful bodies through the real GeoJSON decoder, so tests
//! exercise payload handling without a network.

use std::collections::HashMap;

use mapstory_core::{BoundaryDataset, BoundaryFetcher, BoundarySource, FetchError};

use crate::geojson::decode_feature_collection;

#[derive(Debug, Clone)]
enum StubResponse {
    Body(String),
    Status(u16),
    Timeout,
}

/// Stub `BoundaryFetcher` keyed by source id.
///
/// Sources without a canned response fail with a network error.
///
/// # Example
///
/// ```
/// use mapstory_core::{AdminLevel, BoundaryFetcher, BoundarySource, TrustTier};
/// use mapstory_data::test_support::StubBoundaryFetcher;
///
/// let fetcher = StubBoundaryFetcher::new().with_body("source-1", "not json");
/// let source = BoundarySource::new(
///     "source-1",
///     "https://example.org/nepal.geojson",
///     AdminLevel::Country,
///     TrustTier::CommunityMaintained,
/// );
/// let err = fetcher.fetch(&source).expect_err("body is not GeoJSON");
/// assert!(err.is_parse());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StubBoundaryFetcher {
    responses: HashMap<String, StubResponse>,
}

impl StubBoundaryFetcher {
    /// Fetcher with no canned responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `id` with a 200 response carrying `body`.
    #[must_use]
    pub fn with_body(mut self, id: &str, body: impl Into<String>) -> Self {
        self.responses
            .insert(id.to_owned(), StubResponse::Body(body.into()));
        self
    }

    /// Answer `id` with a non-success status.
    #[must_use]
    pub fn with_status(mut self, id: &str, status: u16) -> Self {
        self.responses
            .insert(id.to_owned(), StubResponse::Status(status));
        self
    }

    /// Answer `id` with a timeout.
    #[must_use]
    pub fn with_timeout(mut self, id: &str) -> Self {
        self.responses.insert(id.to_owned(), StubResponse::Timeout);
        self
    }
}

impl BoundaryFetcher for StubBoundaryFetcher {
    fn fetch(&self, source: &BoundarySource) -> Result<BoundaryDataset, FetchError> {
        let url = source.url.clone();
        match self.responses.get(source.id.as_str()) {
            Some(StubResponse::Body(body)) => decode_feature_collection(body.as_bytes())
                .map_err(|err| FetchError::Parse {
                    url,
                    message: err.to_string(),
                }),
            Some(StubResponse::Status(status)) => Err(FetchError::Http {
                url,
                status: *status,
                message: "stubbed status".to_owned(),
            }),
            Some(StubResponse::Timeout) => Err(FetchError::Timeout {
                url,
                timeout_ms: crate::http::DEFAULT_TIMEOUT_SECS.saturating_mul(1_000),
            }),
            None => Err(FetchError::Network {
                url,
                message: "connection refused".to_owned(),
            }),
        }
    }
}

/// GeoJSON body with one unit-square polygon per `(key, value)` property.
#[must_use]
pub fn polygon_collection(properties: &[(&str, &str)]) -> String {
    let features: Vec<String> = properties
        .iter()
        .zip(0_u32..)
        .map(|((key, value), index)| {
            let west = index;
            let east = index.saturating_add(1);
            format!(
                r#"{{"type":"Feature","properties":{{"{key}":"{value}"}},"geometry":{{"type":"Polygon","coordinates":[[[{west},0],[{east},0],[{east},1],[{west},1],[{west},0]]]}}}}"#
            )
        })
        .collect();
    format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        features.join(",")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapstory_core::{AdminLevel, TrustTier};
    use rstest::rstest;

    fn source(id: &str) -> BoundarySource {
        BoundarySource::new(
            id,
            format!("https://example.org/{id}.geojson"),
            AdminLevel::Municipality,
            TrustTier::Official,
        )
    }

    #[rstest]
    fn canned_responses_map_to_fetch_errors() {
        let fetcher = StubBoundaryFetcher::new()
            .with_status("municipality-1", 502)
            .with_timeout("municipality-2");

        assert!(matches!(
            fetcher.fetch(&source("municipality-1")),
            Err(FetchError::Http { status: 502, .. })
        ));
        assert!(matches!(
            fetcher.fetch(&source("municipality-2")),
            Err(FetchError::Timeout { .. })
        ));
        assert!(matches!(
            fetcher.fetch(&source("district-1")),
            Err(FetchError::Network { .. })
        ));
    }

    #[rstest]
    fn polygon_collection_decodes() {
        let body = polygon_collection(&[("NAME", "Kirtipur"), ("NAME", "Nagarjun")]);
        let fetcher = StubBoundaryFetcher::new().with_body("municipality-1", body);

        let dataset = fetcher
            .fetch(&source("municipality-1"))
            .expect("stub body should decode");

        let names: Vec<_> = dataset.iter().filter_map(|r| r.property("NAME")).collect();
        assert_eq!(names, ["Kirtipur", "Nagarjun"]);
    }
}
