//! Test doubles shared by unit and behaviour tests.
//!
//! [`ScriptedFetcher`] answers each source id with a canned dataset or
//! failure and records the order in which sources were fetched.

use std::cell::RefCell;
use std::collections::HashMap;

use geo::{MultiPolygon, polygon};

use crate::{BoundaryDataset, BoundaryFetcher, BoundarySource, FetchError, Region};

#[derive(Debug, Clone)]
enum Scripted {
    Dataset(BoundaryDataset),
    Status(u16),
    Timeout,
    Malformed,
}

/// Deterministic [`BoundaryFetcher`] keyed by source id.
///
/// Sources without a script fail with a network error, so a test only needs
/// to script the sources it cares about.
///
/// # Example
///
/// ```
/// use mapstory_core::test_support::{ScriptedFetcher, named_dataset};
/// use mapstory_core::{AdminLevel, BoundaryFetcher, BoundarySource, TrustTier};
///
/// let fetcher = ScriptedFetcher::new()
///     .with_status("source-1", 500)
///     .with_dataset("source-2", named_dataset(&["Bagmati Province"]));
/// let source = BoundarySource::new(
///     "source-2",
///     "https://example.org/provinces.geojson",
///     AdminLevel::Country,
///     TrustTier::CommunityMaintained,
/// );
/// assert!(fetcher.fetch(&source).is_ok());
/// assert_eq!(fetcher.calls(), ["source-2"]);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    scripts: HashMap<String, Scripted>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedFetcher {
    /// Fetcher with no scripted sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `id` with `dataset`.
    #[must_use]
    pub fn with_dataset(self, id: &str, dataset: BoundaryDataset) -> Self {
        self.script(id, Scripted::Dataset(dataset))
    }

    /// Answer `id` with a non-success HTTP status.
    #[must_use]
    pub fn with_status(self, id: &str, status: u16) -> Self {
        self.script(id, Scripted::Status(status))
    }

    /// Answer `id` with a timeout.
    #[must_use]
    pub fn with_timeout(self, id: &str) -> Self {
        self.script(id, Scripted::Timeout)
    }

    /// Answer `id` with a payload that fails to decode.
    #[must_use]
    pub fn with_malformed(self, id: &str) -> Self {
        self.script(id, Scripted::Malformed)
    }

    /// Source ids fetched so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn script(mut self, id: &str, scripted: Scripted) -> Self {
        self.scripts.insert(id.to_owned(), scripted);
        self
    }
}

impl BoundaryFetcher for ScriptedFetcher {
    fn fetch(&self, source: &BoundarySource) -> Result<BoundaryDataset, FetchError> {
        self.calls.borrow_mut().push(source.id.as_str().to_owned());
        let url = source.url.clone();
        match self.scripts.get(source.id.as_str()) {
            Some(Scripted::Dataset(dataset)) => Ok(dataset.clone()),
            Some(Scripted::Status(status)) => Err(FetchError::Http {
                url,
                status: *status,
                message: "scripted status".to_owned(),
            }),
            Some(Scripted::Timeout) => Err(FetchError::Timeout {
                url,
                timeout_ms: 20_000,
            }),
            Some(Scripted::Malformed) => Err(FetchError::Parse {
                url,
                message: "expected a FeatureCollection".to_owned(),
            }),
            None => Err(FetchError::Network {
                url,
                message: "no scripted response".to_owned(),
            }),
        }
    }
}

/// Unit square whose south-west corner sits `index` degrees east of the
/// origin.
#[must_use]
pub fn square(index: u32) -> MultiPolygon<f64> {
    let west = f64::from(index);
    let east = f64::from(index.saturating_add(1));
    MultiPolygon::new(vec![polygon![
        (x: west, y: 0.0),
        (x: east, y: 0.0),
        (x: east, y: 1.0),
        (x: west, y: 1.0),
    ]])
}

/// Dataset with one square region per name, stored under `key`.
#[must_use]
pub fn keyed_dataset(key: &str, names: &[&str]) -> BoundaryDataset {
    names
        .iter()
        .zip(0_u32..)
        .map(|(name, index)| {
            Region::new(
                HashMap::from([(key.to_owned(), (*name).to_owned())]),
                square(index),
            )
        })
        .collect()
}

/// Dataset with one square region per name, stored under `NAME`.
#[must_use]
pub fn named_dataset(names: &[&str]) -> BoundaryDataset {
    keyed_dataset("NAME", names)
}
