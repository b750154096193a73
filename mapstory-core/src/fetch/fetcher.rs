//! Boundary fetcher trait.

use crate::{BoundaryDataset, BoundarySource};

use super::error::FetchError;

/// Retrieve and decode the payload behind a [`BoundarySource`].
///
/// Implementations attempt the source exactly once. Retrying is never the
/// fetcher's job; the resolver moves on to the next source instead.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use geo::polygon;
/// use mapstory_core::{
///     AdminLevel, BoundaryDataset, BoundaryFetcher, BoundarySource, FetchError, Region,
///     TrustTier,
/// };
///
/// struct SingleSquare;
///
/// impl BoundaryFetcher for SingleSquare {
///     fn fetch(&self, _source: &BoundarySource) -> Result<BoundaryDataset, FetchError> {
///         let region = Region::from_polygon(
///             HashMap::from([("NAME".to_owned(), "Square".to_owned())]),
///             polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)],
///         );
///         Ok(BoundaryDataset::new(vec![region]))
///     }
/// }
///
/// let source = BoundarySource::new(
///     "source-1",
///     "https://example.org/square.geojson",
///     AdminLevel::Country,
///     TrustTier::Official,
/// );
/// let dataset = SingleSquare.fetch(&source)?;
/// assert_eq!(dataset.len(), 1);
/// # Ok::<(), FetchError>(())
/// ```
pub trait BoundaryFetcher {
    /// Fetch and decode the dataset served by `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] when the request fails, times out, yields a
    /// non-success status, or the body is not a usable boundary payload.
    fn fetch(&self, source: &BoundarySource) -> Result<BoundaryDataset, FetchError>;
}

impl<F: BoundaryFetcher + ?Sized> BoundaryFetcher for &F {
    fn fetch(&self, source: &BoundarySource) -> Result<BoundaryDataset, FetchError> {
        (**self).fetch(source)
    }
}

impl<F: BoundaryFetcher + ?Sized> BoundaryFetcher for Box<F> {
    fn fetch(&self, source: &BoundarySource) -> Result<BoundaryDataset, FetchError> {
        (**self).fetch(source)
    }
}
