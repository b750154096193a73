//! Generic try-in-order driver shared by every source chain.

use log::{info, warn};

use crate::{AdminLevel, BoundaryDataset, BoundaryFetcher, BoundarySource, FetchError, SourceId, TrustTier};

/// What happened when one source was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "outcome", rename_all = "kebab-case"))]
pub enum AttemptOutcome {
    /// The source satisfied its chain.
    Succeeded {
        /// Regions decoded from the payload.
        features: usize,
    },
    /// Transport or payload failure.
    Failed {
        /// Why the fetch failed.
        error: FetchError,
    },
    /// The payload was valid but lacked the wanted region.
    NotFound {
        /// Regions decoded from the payload.
        features: usize,
    },
}

/// Diagnostic record of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttemptRecord {
    /// Source that was attempted.
    pub source: SourceId,
    /// Level the source serves.
    pub level: AdminLevel,
    /// Trust tag of the source.
    pub tier: TrustTier,
    /// Result of the attempt.
    pub outcome: AttemptOutcome,
}

/// A chain's first successful source and what it yielded.
#[derive(Debug)]
pub(crate) struct Satisfied<'s, T> {
    pub(crate) source: &'s BoundarySource,
    pub(crate) value: T,
}

/// Attempt `sources` strictly in order until `extract` accepts a dataset.
///
/// Each source is fetched exactly once. A fetch failure and an `extract`
/// refusal both move on to the next source; they are recorded with different
/// outcomes. Returns `None` once the chain is exhausted.
pub(crate) fn try_in_order<'s, F, T, X>(
    fetcher: &F,
    sources: &'s [BoundarySource],
    attempts: &mut Vec<AttemptRecord>,
    mut extract: X,
) -> Option<Satisfied<'s, T>>
where
    F: BoundaryFetcher + ?Sized,
    X: FnMut(&BoundarySource, BoundaryDataset) -> Option<T>,
{
    for source in sources {
        info!(
            "Attempting {} source {} ({}): {}",
            source.level, source.id, source.tier, source.url
        );
        let outcome = match fetcher.fetch(source) {
            Err(error) => {
                warn!("Source {} failed: {error}", source.id);
                AttemptOutcome::Failed { error }
            }
            Ok(dataset) => {
                let features = dataset.len();
                match extract(source, dataset) {
                    Some(value) => {
                        info!(
                            "Source {} satisfied {} with {features} features",
                            source.id, source.level
                        );
                        attempts.push(record(source, AttemptOutcome::Succeeded { features }));
                        return Some(Satisfied { source, value });
                    }
                    None => {
                        warn!(
                            "Source {} returned {features} features but none matched",
                            source.id
                        );
                        AttemptOutcome::NotFound { features }
                    }
                }
            }
        };
        attempts.push(record(source, outcome));
    }
    None
}

fn record(source: &BoundarySource, outcome: AttemptOutcome) -> AttemptRecord {
    AttemptRecord {
        source: source.id.clone(),
        level: source.level,
        tier: source.tier,
        outcome,
    }
}
