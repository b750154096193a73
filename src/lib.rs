//! Facade crate for the map story boundary engine.
//!
//! This crate re-exports the core resolution types so hosts can depend on a
//! single crate. Network fetching lives in `mapstory-data`.

#![forbid(unsafe_code)]

pub use mapstory_core::{
    AdminLevel, AttemptOutcome, AttemptRecord, BoundaryDataset, BoundaryFetcher,
    BoundaryResolver, BoundarySource, FetchError, Provenance, Region, RegionQuery,
    RegionTargets, Resolution, ResolutionDiagnostics, ResolvedBoundary, SourceCatalog,
    SourceId, StyleIntent, TrustTier,
};
