//! Hardcoded, low-fidelity outlines used when every country source fails.
//!
//! The outlines are rough traces good enough to frame the story. They predate
//! the 2020 map update and therefore lack the Kalapani–Lipulekh–Limpiyadhura
//! territory, which is why every boundary built here is marked incomplete.

use geo::{LineString, MultiPolygon, Polygon};

use crate::{AdminLevel, ResolvedBoundary};

/// Approximate outline of Nepal as `(longitude, latitude)` pairs.
pub const COUNTRY_RING: &[(f64, f64)] = &[
    (80.06, 28.84),
    (80.55, 29.95),
    (81.02, 30.22),
    (81.53, 30.42),
    (82.18, 30.07),
    (83.34, 29.46),
    (84.11, 29.29),
    (84.23, 28.89),
    (85.19, 28.64),
    (85.95, 27.99),
    (86.75, 28.11),
    (87.19, 27.82),
    (88.17, 27.87),
    (88.04, 27.44),
    (88.20, 26.73),
    (87.23, 26.40),
    (86.02, 26.63),
    (84.68, 27.23),
    (83.30, 27.34),
    (81.90, 27.86),
    (80.95, 28.64),
    (80.06, 28.84),
];

/// Approximate outline of Bagmati Province.
pub const PROVINCE_RING: &[(f64, f64)] = &[
    (84.41, 27.53),
    (84.65, 27.85),
    (84.85, 28.05),
    (85.12, 28.32),
    (85.39, 28.27),
    (85.71, 28.37),
    (85.95, 27.99),
    (86.15, 28.08),
    (86.32, 27.72),
    (86.04, 27.38),
    (85.75, 27.21),
    (85.38, 27.15),
    (85.02, 27.35),
    (84.64, 27.40),
    (84.41, 27.53),
];

/// Approximate outline of Nagarjun Municipality.
pub const MUNICIPALITY_RING: &[(f64, f64)] = &[
    (85.228, 27.735),
    (85.236, 27.760),
    (85.258, 27.771),
    (85.282, 27.765),
    (85.296, 27.748),
    (85.287, 27.728),
    (85.262, 27.719),
    (85.240, 27.722),
    (85.228, 27.735),
];

/// Label used for the fallback country boundary.
pub const COUNTRY_LABEL: &str = "Nepal";
/// Label used for the fallback province boundary.
pub const PROVINCE_LABEL: &str = "Bagmati Province";
/// Label used for the fallback municipality boundary.
pub const MUNICIPALITY_LABEL: &str = "Nagarjun Municipality";

/// Build a hole-free polygon from a `(longitude, latitude)` ring.
#[must_use]
pub fn polygon_from_ring(ring: &[(f64, f64)]) -> Polygon<f64> {
    Polygon::new(LineString::from(ring.to_vec()), Vec::new())
}

/// Fallback geometry for one level, or `None` for levels without one.
///
/// # Examples
/// ```
/// use mapstory_core::AdminLevel;
/// use mapstory_core::fallback::{MUNICIPALITY_RING, fallback_geometry, polygon_from_ring};
///
/// let geometry = fallback_geometry(AdminLevel::Municipality).expect("municipality fallback");
/// assert_eq!(geometry.0, vec![polygon_from_ring(MUNICIPALITY_RING)]);
/// ```
#[must_use]
pub fn fallback_geometry(level: AdminLevel) -> Option<MultiPolygon<f64>> {
    let ring = match level {
        AdminLevel::Country => COUNTRY_RING,
        AdminLevel::Province => PROVINCE_RING,
        AdminLevel::Municipality => MUNICIPALITY_RING,
        AdminLevel::District => return None,
    };
    Some(MultiPolygon::new(vec![polygon_from_ring(ring)]))
}

/// The three fallback boundaries, produced together.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackSet {
    /// Country outline.
    pub country: ResolvedBoundary,
    /// Province outline.
    pub province: ResolvedBoundary,
    /// Municipality outline.
    pub municipality: ResolvedBoundary,
}

/// Supply fallback boundaries for country, province and municipality.
///
/// Deterministic and infallible; performs no I/O.
#[must_use]
pub fn provision() -> FallbackSet {
    let boundary = |level: AdminLevel, label: &str, ring: &[(f64, f64)]| {
        ResolvedBoundary::fallback(
            level,
            label,
            MultiPolygon::new(vec![polygon_from_ring(ring)]),
        )
    };
    FallbackSet {
        country: boundary(AdminLevel::Country, COUNTRY_LABEL, COUNTRY_RING),
        province: boundary(AdminLevel::Province, PROVINCE_LABEL, PROVINCE_RING),
        municipality: boundary(
            AdminLevel::Municipality,
            MUNICIPALITY_LABEL,
            MUNICIPALITY_RING,
        ),
    }
}
