//! Source-chain orchestration for one resolution pass.
//!
//! [`BoundaryResolver::resolve`] walks the country chain (primary tier, then
//! secondary tier), the municipality chain and, when the province is missing
//! from the country dataset, the district chain. Every chain goes through the
//! same try-in-order driver. When the whole country chain is exhausted the
//! static fallback replaces all three levels at once.
//!
//! Resolution never fails. Degradation shows up only in provenance, the
//! `complete` flag and [`ResolutionDiagnostics`].
//!
//! # Example
//!
//! ```
//! use mapstory_core::test_support::{ScriptedFetcher, named_dataset};
//! use mapstory_core::BoundaryResolver;
//!
//! let fetcher = ScriptedFetcher::new()
//!     .with_status("source-1", 500)
//!     .with_dataset("source-2", named_dataset(&["Koshi", "Bagmati Province"]));
//! let resolution = BoundaryResolver::new(fetcher).resolve();
//!
//! let province = resolution.province().expect("province from source-2");
//! assert_eq!(province.provenance().tag(), "source-2");
//! ```

mod chain;

use log::{info, warn};

use crate::fallback;
use crate::verify::ContestedTerritory;
use crate::{
    AdminLevel, BoundaryDataset, BoundaryFetcher, BoundarySource, Provenance, RegionQuery,
    RegionTargets, ResolvedBoundary, SourceCatalog, find_region,
};

pub use chain::{AttemptOutcome, AttemptRecord};
use chain::{Satisfied, try_in_order};

/// Diagnostic trail of a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResolutionDiagnostics {
    /// Every source attempted, in order.
    pub attempts: Vec<AttemptRecord>,
    /// Whether the static fallback replaced all three levels.
    pub fallback_used: bool,
    /// Content verifier signal for the accepted country dataset.
    ///
    /// `None` when no country dataset was accepted.
    pub contested_territory: Option<bool>,
}

/// Outcome of a resolution pass: at most one boundary per level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Resolution {
    country: Option<ResolvedBoundary>,
    province: Option<ResolvedBoundary>,
    municipality: Option<ResolvedBoundary>,
    diagnostics: ResolutionDiagnostics,
}

impl Resolution {
    /// Country boundary, if resolved.
    #[must_use]
    pub const fn country(&self) -> Option<&ResolvedBoundary> {
        self.country.as_ref()
    }

    /// Province boundary, if resolved directly or via a district proxy.
    #[must_use]
    pub const fn province(&self) -> Option<&ResolvedBoundary> {
        self.province.as_ref()
    }

    /// Municipality boundary, if resolved.
    #[must_use]
    pub const fn municipality(&self) -> Option<&ResolvedBoundary> {
        self.municipality.as_ref()
    }

    /// Boundary for `level`. Districts are never reported on their own.
    #[must_use]
    pub const fn get(&self, level: AdminLevel) -> Option<&ResolvedBoundary> {
        match level {
            AdminLevel::Country => self.country(),
            AdminLevel::Province => self.province(),
            AdminLevel::Municipality => self.municipality(),
            AdminLevel::District => None,
        }
    }

    /// Resolved boundaries from country down to municipality.
    pub fn boundaries(&self) -> impl Iterator<Item = &ResolvedBoundary> {
        [&self.country, &self.province, &self.municipality]
            .into_iter()
            .flatten()
    }

    /// Diagnostic trail.
    #[must_use]
    pub const fn diagnostics(&self) -> &ResolutionDiagnostics {
        &self.diagnostics
    }

    fn from_fallback(attempts: Vec<AttemptRecord>) -> Self {
        let set = fallback::provision();
        Self {
            country: Some(set.country),
            province: Some(set.province),
            municipality: Some(set.municipality),
            diagnostics: ResolutionDiagnostics {
                attempts,
                fallback_used: true,
                contested_territory: None,
            },
        }
    }
}

/// Country-chain result: the country outline and, if present, the province
/// extracted from the same dataset.
struct CountryData {
    country: ResolvedBoundary,
    province: Option<ResolvedBoundary>,
    contested_territory: bool,
}

/// Resolves country, province and municipality boundaries.
///
/// Construct it with a fetcher; the catalog, region targets and contested
/// territory probe default to the Nepal story and can be replaced.
#[derive(Debug)]
pub struct BoundaryResolver<F> {
    fetcher: F,
    catalog: SourceCatalog,
    targets: RegionTargets,
    territory: ContestedTerritory,
    country_label: String,
}

impl<F: BoundaryFetcher> BoundaryResolver<F> {
    /// Resolver over the default catalog and targets.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            catalog: SourceCatalog::default(),
            targets: RegionTargets::default(),
            territory: ContestedTerritory::default(),
            country_label: fallback::COUNTRY_LABEL.to_owned(),
        }
    }

    /// Replace the source catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: SourceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the region targets.
    #[must_use]
    pub fn with_targets(mut self, targets: RegionTargets) -> Self {
        self.targets = targets;
        self
    }

    /// Replace the contested territory probe.
    #[must_use]
    pub fn with_territory(mut self, territory: ContestedTerritory) -> Self {
        self.territory = territory;
        self
    }

    /// Catalog used for resolution.
    #[must_use]
    pub const fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    /// Fetcher used for resolution.
    #[must_use]
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Run one resolution pass.
    ///
    /// Sources are fetched sequentially, each at most once. The pass always
    /// reaches a terminal state.
    #[must_use]
    pub fn resolve(&self) -> Resolution {
        let mut attempts = Vec::new();
        info!(
            "Resolving boundaries: {} country, {} municipality and {} district sources",
            self.catalog.country_primary.len() + self.catalog.country_secondary.len(),
            self.catalog.municipality.len(),
            self.catalog.district.len()
        );

        let Some(country_data) = self.resolve_country(&mut attempts) else {
            warn!(
                "Every country source failed; using static fallback for country, province and municipality"
            );
            return Resolution::from_fallback(attempts);
        };

        let municipality = self.resolve_municipality(&mut attempts);
        let province = match country_data.province {
            Some(province) => Some(province),
            None => self.resolve_province_proxy(&mut attempts),
        };

        Resolution {
            country: Some(country_data.country),
            province,
            municipality,
            diagnostics: ResolutionDiagnostics {
                attempts,
                fallback_used: false,
                contested_territory: Some(country_data.contested_territory),
            },
        }
    }

    fn resolve_country(&self, attempts: &mut Vec<AttemptRecord>) -> Option<CountryData> {
        let tiers = [
            ("primary", &self.catalog.country_primary),
            ("secondary", &self.catalog.country_secondary),
        ];
        for (tier, sources) in tiers {
            let satisfied = try_in_order(&self.fetcher, sources, attempts, |source, dataset| {
                if dataset.is_empty() {
                    warn!("Country dataset from {} has no regions", source.id);
                    return None;
                }
                Some(dataset)
            });
            if let Some(Satisfied { source, value }) = satisfied {
                return Some(self.country_from(source, &value));
            }
            warn!("Country {tier} tier exhausted");
        }
        None
    }

    fn country_from(&self, source: &BoundarySource, dataset: &BoundaryDataset) -> CountryData {
        let contested_territory = self.territory.is_covered_by(dataset);
        if contested_territory {
            info!("Country dataset from {} includes {}", source.id, self.territory.name);
        } else {
            warn!(
                "Country dataset from {} lacks {}; using it anyway",
                source.id, self.territory.name
            );
        }

        let country = ResolvedBoundary::resolved(
            AdminLevel::Country,
            self.country_label.as_str(),
            dataset.merged_geometry(),
            Provenance::Source(source.id.clone()),
        );
        let province = extract(dataset, &self.targets.province).map(|(label, geometry)| {
            info!("Province {label} found in country dataset from {}", source.id);
            ResolvedBoundary::resolved(
                AdminLevel::Province,
                label,
                geometry,
                Provenance::Source(source.id.clone()),
            )
        });
        if province.is_none() {
            info!(
                "No province matching '{}' in dataset from {}; district proxy will be tried",
                self.targets.province.target(),
                source.id
            );
        }

        CountryData {
            country,
            province,
            contested_territory,
        }
    }

    fn resolve_municipality(&self, attempts: &mut Vec<AttemptRecord>) -> Option<ResolvedBoundary> {
        let satisfied = try_in_order(
            &self.fetcher,
            &self.catalog.municipality,
            attempts,
            |_, dataset| extract(&dataset, &self.targets.municipality),
        );
        let Some(Satisfied { source, value }) = satisfied else {
            warn!(
                "Municipality '{}' unresolved for this session",
                self.targets.municipality.target()
            );
            return None;
        };
        let (label, geometry) = value;
        Some(ResolvedBoundary::resolved(
            AdminLevel::Municipality,
            label,
            geometry,
            Provenance::Source(source.id.clone()),
        ))
    }

    fn resolve_province_proxy(&self, attempts: &mut Vec<AttemptRecord>) -> Option<ResolvedBoundary> {
        let satisfied = try_in_order(
            &self.fetcher,
            &self.catalog.district,
            attempts,
            |_, dataset| extract(&dataset, &self.targets.district),
        );
        let Some(Satisfied { source, value }) = satisfied else {
            warn!(
                "Province '{}' unresolved: no district proxy available",
                self.targets.province.target()
            );
            return None;
        };
        let (label, geometry) = value;
        info!("Using district {label} from {} as province proxy", source.id);
        Some(ResolvedBoundary::resolved(
            AdminLevel::Province,
            format!("{label} (district proxy)"),
            geometry,
            Provenance::DistrictProxy(source.id.clone()),
        ))
    }
}

/// Find `query` in `dataset` and copy out its label and geometry.
fn extract(
    dataset: &BoundaryDataset,
    query: &RegionQuery,
) -> Option<(String, geo::MultiPolygon<f64>)> {
    find_region(dataset, query).map(|region| {
        let label = query
            .resolved_name(region)
            .unwrap_or_else(|| query.target())
            .to_owned();
        (label, region.geometry.clone())
    })
}
