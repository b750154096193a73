//! Parsed boundary payloads.
//!
//! A [`BoundaryDataset`] lives only as long as the extraction step that
//! consumes it. Region order is the payload's feature order and is
//! significant: extraction is first-match-wins.

use std::collections::HashMap;

use geo::{MultiPolygon, Polygon};

/// A named region inside a [`BoundaryDataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Attribute map with scalar values in textual form.
    pub properties: HashMap<String, String>,
    /// Region outline, normalised to a multi-polygon.
    pub geometry: MultiPolygon<f64>,
}

impl Region {
    /// Build a region from its attributes and geometry.
    #[must_use]
    pub const fn new(properties: HashMap<String, String>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            properties,
            geometry,
        }
    }

    /// Build a region from a single polygon.
    #[must_use]
    pub fn from_polygon(properties: HashMap<String, String>, polygon: Polygon<f64>) -> Self {
        Self::new(properties, MultiPolygon::new(vec![polygon]))
    }

    /// Look up an attribute, ignoring blank values.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }
}

/// An ordered collection of regions decoded from one source payload.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use geo::polygon;
/// use mapstory_core::{BoundaryDataset, Region};
///
/// let mut properties = HashMap::new();
/// properties.insert("NAME".to_owned(), "Bagmati".to_owned());
/// let region = Region::from_polygon(
///     properties,
///     polygon![(x: 85.0, y: 27.5), (x: 86.0, y: 27.5), (x: 86.0, y: 28.0)],
/// );
/// let dataset = BoundaryDataset::new(vec![region]);
/// assert_eq!(dataset.len(), 1);
/// assert_eq!(dataset.merged_geometry().0.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundaryDataset {
    regions: Vec<Region>,
}

impl BoundaryDataset {
    /// Wrap regions in payload order.
    #[must_use]
    pub const fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Regions in payload order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the dataset holds no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterate over regions in payload order.
    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    /// Every region's polygons gathered into one multi-polygon.
    ///
    /// Polygons keep dataset order. No dissolve is performed, so shared
    /// province edges stay in place.
    #[must_use]
    pub fn merged_geometry(&self) -> MultiPolygon<f64> {
        MultiPolygon::new(
            self.regions
                .iter()
                .flat_map(|region| region.geometry.0.iter().cloned())
                .collect(),
        )
    }
}

impl FromIterator<Region> for BoundaryDataset {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BoundaryDataset {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
