//! Turn boundary sources into parsed datasets.
//!
//! The [`BoundaryFetcher`] trait abstracts retrieval of a single
//! [`BoundarySource`](crate::BoundarySource). Callers hand over one source at
//! a time and receive a [`BoundaryDataset`](crate::BoundaryDataset) or a
//! [`FetchError`] describing why the source could not be used.
//!
//! Every error variant is recoverable from the resolver's point of view: the
//! next source in the chain is attempted.

mod error;
mod fetcher;

pub use error::FetchError;
pub use fetcher::BoundaryFetcher;
