//! Transport and wire formats for the map story's boundary data.
//!
//! Responsibilities:
//! - Fetch boundary payloads over HTTP ([`http`]).
//! - Decode GeoJSON payloads and encode the renderer hand-off ([`geojson`]).
//!
//! Boundaries:
//! - Resolution rules live in `mapstory-core`; this crate only moves and
//!   converts data.

pub mod geojson;
pub mod http;

#[doc(hidden)]
pub mod test_support;

pub use geojson::{DecodeError, decode_feature_collection, to_feature_collection};
pub use http::{FetcherBuildError, HttpBoundaryFetcher, HttpBoundaryFetcherConfig};
