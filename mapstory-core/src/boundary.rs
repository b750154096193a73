//! Finished boundaries handed to the rendering layer.

use geo::{LineString, MultiPolygon};

use crate::{AdminLevel, SourceId};

/// Colour and default fill opacity the renderer should use for a level.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StyleIntent {
    /// CSS colour.
    pub color: &'static str,
    /// Default fill opacity in `[0, 1]`.
    pub opacity: f64,
}

impl StyleIntent {
    /// Fixed style intent for `level`.
    ///
    /// # Examples
    /// ```
    /// use mapstory_core::{AdminLevel, StyleIntent};
    ///
    /// assert_eq!(StyleIntent::for_level(AdminLevel::Province).color, "#e07a1f");
    /// ```
    #[must_use]
    pub const fn for_level(level: AdminLevel) -> Self {
        match level {
            AdminLevel::Country => Self {
                color: "#1d4e89",
                opacity: 0.08,
            },
            AdminLevel::Province | AdminLevel::District => Self {
                color: "#e07a1f",
                opacity: 0.2,
            },
            AdminLevel::Municipality => Self {
                color: "#c0392b",
                opacity: 0.35,
            },
        }
    }
}

/// Which path produced a boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "source", rename_all = "kebab-case"))]
pub enum Provenance {
    /// Satisfied directly by the named source.
    Source(SourceId),
    /// A district polygon from the named source standing in for a province.
    DistrictProxy(SourceId),
    /// Hardcoded approximation.
    Fallback,
}

impl Provenance {
    /// Short tag for logs and the hand-off file.
    ///
    /// # Examples
    /// ```
    /// use mapstory_core::{Provenance, SourceId};
    ///
    /// assert_eq!(Provenance::Source(SourceId::new("source-2")).tag(), "source-2");
    /// assert_eq!(Provenance::DistrictProxy(SourceId::new("district-1")).tag(), "district-proxy");
    /// assert_eq!(Provenance::Fallback.tag(), "fallback");
    /// ```
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Source(id) => id.as_str(),
            Self::DistrictProxy(_) => "district-proxy",
            Self::Fallback => "fallback",
        }
    }

    /// The remote source involved, if any.
    #[must_use]
    pub const fn source(&self) -> Option<&SourceId> {
        match self {
            Self::Source(id) | Self::DistrictProxy(id) => Some(id),
            Self::Fallback => None,
        }
    }

    /// Whether this is the static fallback.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// The final boundary for one administrative level.
///
/// Values are built in one step by the resolver or the fallback provisioner
/// and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResolvedBoundary {
    level: AdminLevel,
    label: String,
    geometry: MultiPolygon<f64>,
    style: StyleIntent,
    provenance: Provenance,
    complete: bool,
}

impl ResolvedBoundary {
    /// Boundary taken from a remote dataset.
    #[must_use]
    pub fn resolved(
        level: AdminLevel,
        label: impl Into<String>,
        geometry: MultiPolygon<f64>,
        provenance: Provenance,
    ) -> Self {
        Self {
            level,
            label: label.into(),
            geometry,
            style: StyleIntent::for_level(level),
            provenance,
            complete: true,
        }
    }

    /// Boundary supplied by the static fallback.
    #[must_use]
    pub fn fallback(level: AdminLevel, label: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            level,
            label: label.into(),
            geometry,
            style: StyleIntent::for_level(level),
            provenance: Provenance::Fallback,
            complete: false,
        }
    }

    /// Level this boundary belongs to.
    #[must_use]
    pub const fn level(&self) -> AdminLevel {
        self.level
    }

    /// Human-readable name, taken from the matched region where possible.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Outline geometry.
    #[must_use]
    pub const fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// Every coordinate ring, exteriors before holes within each polygon.
    pub fn rings(&self) -> impl Iterator<Item = &LineString<f64>> {
        self.geometry
            .iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
    }

    /// Style intent for the renderer.
    #[must_use]
    pub const fn style(&self) -> StyleIntent {
        self.style
    }

    /// Path that produced this boundary.
    #[must_use]
    pub const fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// False for approximations that lack contested-territory detail.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }
}
