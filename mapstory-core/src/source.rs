//! Statically configured boundary endpoints.
//!
//! A [`SourceCatalog`] groups [`BoundarySource`] values into the ordered
//! chains the resolver walks. Order inside a chain is priority order; the
//! trust tier is carried along for diagnostics only.

use crate::{AdminLevel, TrustTier};

/// Stable identifier of a boundary source, e.g. `source-2`.
///
/// The identifier doubles as the provenance tag of boundaries the source
/// satisfies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SourceId(String);

impl SourceId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A remote endpoint serving polygons for one administrative level.
///
/// # Examples
/// ```
/// use mapstory_core::{AdminLevel, BoundarySource, TrustTier};
///
/// let source = BoundarySource::new(
///     "source-1",
///     "https://example.org/provinces.geojson",
///     AdminLevel::Country,
///     TrustTier::CommunityMaintained,
/// );
/// assert_eq!(source.id.as_str(), "source-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundarySource {
    /// Identifier used in logs and provenance tags.
    pub id: SourceId,
    /// Absolute URL of the GeoJSON payload.
    pub url: String,
    /// Administrative level the payload describes.
    pub level: AdminLevel,
    /// Trust tag, for diagnostics only.
    pub tier: TrustTier,
}

impl BoundarySource {
    /// Describe a boundary source.
    pub fn new(
        id: impl Into<SourceId>,
        url: impl Into<String>,
        level: AdminLevel,
        tier: TrustTier,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            level,
            tier,
        }
    }
}

impl From<String> for SourceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

const GEOJSON_NEPAL: &str = "https://raw.githubusercontent.com/mesaugat/geoJSON-Nepal/master";
const ACESMNDR_NEPAL: &str =
    "https://raw.githubusercontent.com/Acesmndr/nepal-geojson/master/generated-geojson";
const SURVEY_WFS: &str = "https://geoportal.dos.gov.np/geoserver/ows?service=WFS&version=1.0.0\
                          &request=GetFeature&outputFormat=application%2Fjson&typeName=";
const HDX_COD_AB: &str = "https://data.humdata.org/dataset/cod-ab-npl/resource/download";

/// Ordered source chains for one resolution pass.
///
/// The country chain has two tiers: the primary tier is tried first and the
/// secondary tier only once every primary source has failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCatalog {
    /// First country+province tier.
    pub country_primary: Vec<BoundarySource>,
    /// Escalation tier for country+province data.
    pub country_secondary: Vec<BoundarySource>,
    /// Municipality chain.
    pub municipality: Vec<BoundarySource>,
    /// District chain, used only to stand in for a missing province.
    pub district: Vec<BoundarySource>,
}

impl SourceCatalog {
    /// Catalog with every chain empty.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            country_primary: Vec::new(),
            country_secondary: Vec::new(),
            municipality: Vec::new(),
            district: Vec::new(),
        }
    }

    /// Replace the primary country tier.
    #[must_use]
    pub fn with_country_primary(mut self, sources: Vec<BoundarySource>) -> Self {
        self.country_primary = sources;
        self
    }

    /// Replace the secondary country tier.
    #[must_use]
    pub fn with_country_secondary(mut self, sources: Vec<BoundarySource>) -> Self {
        self.country_secondary = sources;
        self
    }

    /// Replace the municipality chain.
    #[must_use]
    pub fn with_municipality(mut self, sources: Vec<BoundarySource>) -> Self {
        self.municipality = sources;
        self
    }

    /// Replace the district chain.
    #[must_use]
    pub fn with_district(mut self, sources: Vec<BoundarySource>) -> Self {
        self.district = sources;
        self
    }

    /// Iterate over every source in the order a full pass could visit them.
    pub fn iter(&self) -> impl Iterator<Item = &BoundarySource> {
        self.country_primary
            .iter()
            .chain(&self.country_secondary)
            .chain(&self.municipality)
            .chain(&self.district)
    }
}

impl Default for SourceCatalog {
    /// The Nepal story's endpoints.
    fn default() -> Self {
        use AdminLevel::{Country, District, Municipality};
        use TrustTier::{CommunityMaintained, GovernmentVerified, Official};

        Self {
            country_primary: vec![
                BoundarySource::new(
                    "source-1",
                    format!("{GEOJSON_NEPAL}/nepal-states.geojson"),
                    Country,
                    CommunityMaintained,
                ),
                BoundarySource::new(
                    "source-2",
                    format!("{ACESMNDR_NEPAL}/nepal-with-provinces-acesmndr.geojson"),
                    Country,
                    CommunityMaintained,
                ),
            ],
            country_secondary: vec![
                BoundarySource::new(
                    "source-3",
                    format!("{SURVEY_WFS}nsdi:province"),
                    Country,
                    GovernmentVerified,
                ),
                BoundarySource::new(
                    "source-4",
                    format!("{HDX_COD_AB}/npl_admbnda_adm1_nd.geojson"),
                    Country,
                    GovernmentVerified,
                ),
            ],
            municipality: vec![
                BoundarySource::new(
                    "municipality-1",
                    format!("{SURVEY_WFS}nsdi:local_level"),
                    Municipality,
                    Official,
                ),
                BoundarySource::new(
                    "municipality-2",
                    format!("{GEOJSON_NEPAL}/nepal-municipalities.geojson"),
                    Municipality,
                    CommunityMaintained,
                ),
            ],
            district: vec![
                BoundarySource::new(
                    "district-1",
                    format!("{GEOJSON_NEPAL}/nepal-districts.geojson"),
                    District,
                    CommunityMaintained,
                ),
                BoundarySource::new(
                    "district-2",
                    format!("{ACESMNDR_NEPAL}/nepal-with-districts-acesmndr.geojson"),
                    District,
                    CommunityMaintained,
                ),
            ],
        }
    }
}
