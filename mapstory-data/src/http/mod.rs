//! HTTP transport for remote boundary sources.
//!
//! [`HttpBoundaryFetcher`] implements [`mapstory_core::BoundaryFetcher`] by
//! issuing one GET per source and decoding the body with
//! [`crate::geojson::decode_feature_collection`].

mod fetcher;

pub use fetcher::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, FetcherBuildError, HttpBoundaryFetcher,
    HttpBoundaryFetcherConfig,
};
