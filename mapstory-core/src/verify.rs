//! Heuristic content check for the contested north-western territory.
//!
//! The signal feeds diagnostics and logs only. A dataset without the
//! territory is still accepted and rendered.

use geo::{Coord, Intersects, Rect};

use crate::BoundaryDataset;

/// A named probe area whose presence is checked in country datasets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContestedTerritory {
    /// Display name for log lines.
    pub name: &'static str,
    /// South-west corner of the probe area.
    pub min: Coord<f64>,
    /// North-east corner of the probe area.
    pub max: Coord<f64>,
}

/// Kalapani–Lipulekh–Limpiyadhura, probed at the Limpiyadhura salient.
///
/// Maps drawn before 2020 stop east of this rectangle, so any polygon that
/// reaches into it carries the updated outline.
pub const LIMPIYADHURA: ContestedTerritory = ContestedTerritory {
    name: "Kalapani-Lipulekh-Limpiyadhura",
    min: Coord { x: 80.20, y: 30.25 },
    max: Coord { x: 80.50, y: 30.45 },
};

impl ContestedTerritory {
    /// Area that only outlines including the territory reach into.
    #[must_use]
    pub fn probe(&self) -> Rect<f64> {
        Rect::new(self.min, self.max)
    }

    /// Whether any region of `dataset` reaches into the probe area.
    #[must_use]
    pub fn is_covered_by(&self, dataset: &BoundaryDataset) -> bool {
        let probe = self.probe();
        dataset.iter().any(|region| {
            region
                .geometry
                .iter()
                .any(|polygon| polygon.intersects(&probe))
        })
    }
}

impl Default for ContestedTerritory {
    fn default() -> Self {
        LIMPIYADHURA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Region;
    use crate::fallback::{COUNTRY_RING, polygon_from_ring};
    use geo::polygon;
    use rstest::rstest;
    use std::collections::HashMap;

    fn dataset_of(polygon: geo::Polygon<f64>) -> BoundaryDataset {
        BoundaryDataset::new(vec![Region::from_polygon(HashMap::new(), polygon)])
    }

    #[rstest]
    fn detects_outline_reaching_limpiyadhura() {
        let sudurpashchim = polygon![
            (x: 80.06, y: 28.90),
            (x: 80.30, y: 30.40),
            (x: 81.10, y: 30.20),
            (x: 81.20, y: 28.80),
        ];
        assert!(LIMPIYADHURA.is_covered_by(&dataset_of(sudurpashchim)));
    }

    #[rstest]
    fn older_outline_is_not_covered() {
        let sudurpashchim = polygon![
            (x: 80.06, y: 28.90),
            (x: 80.60, y: 29.90),
            (x: 81.10, y: 30.20),
            (x: 81.20, y: 28.80),
        ];
        assert!(!LIMPIYADHURA.is_covered_by(&dataset_of(sudurpashchim)));
    }

    #[rstest]
    fn fallback_outline_lacks_the_territory() {
        let country = polygon_from_ring(COUNTRY_RING);
        assert!(!LIMPIYADHURA.is_covered_by(&dataset_of(country)));
    }

    #[rstest]
    fn empty_dataset_is_not_covered() {
        assert!(!LIMPIYADHURA.is_covered_by(&BoundaryDataset::default()));
    }
}
