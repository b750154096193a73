//! Administrative tiers and the trust tags attached to boundary sources.
//!
//! # Examples
//! ```
//! use mapstory_core::{AdminLevel, TrustTier};
//!
//! assert_eq!(AdminLevel::Municipality.as_str(), "municipality");
//! assert_eq!(TrustTier::GovernmentVerified.to_string(), "government-verified");
//! ```

use thiserror::Error;

/// A tier in the geographic hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AdminLevel {
    /// National boundary.
    Country,
    /// First-level subdivision.
    Province,
    /// Local government unit.
    Municipality,
    /// Administrative district, only used as a province stand-in.
    District,
}

impl AdminLevel {
    /// Return the level as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Province => "province",
            Self::Municipality => "municipality",
            Self::District => "district",
        }
    }
}

impl std::fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`AdminLevel`] or [`TrustTier`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseLevelError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl std::str::FromStr for AdminLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "country" => Ok(Self::Country),
            "province" => Ok(Self::Province),
            "municipality" => Ok(Self::Municipality),
            "district" => Ok(Self::District),
            _ => Err(ParseLevelError {
                kind: "administrative level",
                value: s.to_owned(),
            }),
        }
    }
}

/// How far a source's data can be trusted.
///
/// Only used for logging and diagnostics; selection order is fixed by the
/// catalog, never by tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TrustTier {
    /// Published by the national mapping authority.
    Official,
    /// Republished by a government or UN body after review.
    GovernmentVerified,
    /// Maintained by volunteers.
    CommunityMaintained,
}

impl TrustTier {
    /// Return the tier as a kebab-case `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::GovernmentVerified => "government-verified",
            Self::CommunityMaintained => "community-maintained",
        }
    }
}

impl std::fmt::Display for TrustTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TrustTier {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "official" => Ok(Self::Official),
            "government-verified" => Ok(Self::GovernmentVerified),
            "community-maintained" => Ok(Self::CommunityMaintained),
            _ => Err(ParseLevelError {
                kind: "trust tier",
                value: s.to_owned(),
            }),
        }
    }
}
