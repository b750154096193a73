//! Boundary resolution for the Nepal map story.
//!
//! The crate decides which administrative boundaries the story draws and
//! where each one came from. Remote sources are reached through the
//! [`BoundaryFetcher`] trait; [`BoundaryResolver`] walks the configured
//! source chains, extracts the target regions and falls back to hardcoded
//! outlines when every country source fails.
//!
//! The resolver performs no I/O of its own, so it is fully testable with an
//! in-memory fetcher.
#![forbid(unsafe_code)]

mod boundary;
mod dataset;
mod extract;
pub mod fallback;
pub mod fetch;
mod level;
mod resolver;
mod source;
mod verify;

#[doc(hidden)]
pub mod test_support;

pub use boundary::{Provenance, ResolvedBoundary, StyleIntent};
pub use dataset::{BoundaryDataset, Region};
pub use extract::{
    DISTRICT_KEYS, MUNICIPALITY_KEYS, PROVINCE_KEYS, RegionQuery, RegionTargets, find_region,
};
pub use fallback::FallbackSet;
pub use fetch::{BoundaryFetcher, FetchError};
pub use level::{AdminLevel, ParseLevelError, TrustTier};
pub use resolver::{
    AttemptOutcome, AttemptRecord, BoundaryResolver, Resolution, ResolutionDiagnostics,
};
pub use source::{BoundarySource, SourceCatalog, SourceId};
pub use verify::{ContestedTerritory, LIMPIYADHURA};
