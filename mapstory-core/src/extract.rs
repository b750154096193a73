//! Find one named region inside a combined dataset.
//!
//! Matching is a case-folded substring test against a region's resolved name,
//! plus exact aliases for legacy codes such as province `3`. The first region
//! in dataset order that matches wins; there is no fuzzy matching and no
//! tie-breaking.

use crate::{BoundaryDataset, Region};

/// Attribute keys tried, in order, when resolving a province name.
pub const PROVINCE_KEYS: &[&str] = &["ADM1_EN", "PROVINCE", "NAME"];
/// Attribute keys tried when resolving a municipality name.
pub const MUNICIPALITY_KEYS: &[&str] = &["NAME"];
/// Attribute keys tried, in order, when resolving a district name.
pub const DISTRICT_KEYS: &[&str] = &["NAME", "DISTRICT"];

/// What to look for in a dataset.
///
/// # Examples
/// ```
/// use mapstory_core::RegionQuery;
///
/// let query = RegionQuery::province("Bagmati").with_aliases(["3", "Province 3"]);
/// assert!(query.matches_name("BAGMATI PROVINCE"));
/// assert!(query.matches_name("province 3"));
/// assert!(!query.matches_name("Bagmat"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionQuery {
    target: String,
    keys: Vec<String>,
    aliases: Vec<String>,
}

impl RegionQuery {
    /// Query `target` against an explicit list of attribute keys.
    ///
    /// The target is stored case-folded and trimmed.
    pub fn new<I, K>(target: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            target: fold(target),
            keys: keys.into_iter().map(Into::into).collect(),
            aliases: Vec::new(),
        }
    }

    /// Query a province using [`PROVINCE_KEYS`].
    #[must_use]
    pub fn province(target: &str) -> Self {
        Self::new(target, PROVINCE_KEYS.iter().copied())
    }

    /// Query a municipality using [`MUNICIPALITY_KEYS`].
    #[must_use]
    pub fn municipality(target: &str) -> Self {
        Self::new(target, MUNICIPALITY_KEYS.iter().copied())
    }

    /// Query a district using [`DISTRICT_KEYS`].
    #[must_use]
    pub fn district(target: &str) -> Self {
        Self::new(target, DISTRICT_KEYS.iter().copied())
    }

    /// Accept exact synonyms, compared trimmed and case-insensitively.
    #[must_use]
    pub fn with_aliases<I, A>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: AsRef<str>,
    {
        self.aliases
            .extend(aliases.into_iter().map(|alias| fold(alias.as_ref())));
        self
    }

    /// Case-folded target substring.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Attribute keys in priority order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Value of the first candidate key present on `region`.
    #[must_use]
    pub fn resolved_name<'r>(&self, region: &'r Region) -> Option<&'r str> {
        self.keys.iter().find_map(|key| region.property(key))
    }

    /// Whether a resolved name satisfies this query.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        let folded = fold(name);
        if !self.target.is_empty() && folded.contains(self.target.as_str()) {
            return true;
        }
        self.aliases.iter().any(|alias| *alias == folded)
    }

    /// Whether `region` satisfies this query.
    #[must_use]
    pub fn matches(&self, region: &Region) -> bool {
        self.resolved_name(region)
            .is_some_and(|name| self.matches_name(name))
    }
}

/// The regions the story needs from each chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTargets {
    /// Province looked up inside the country dataset.
    pub province: RegionQuery,
    /// Municipality looked up in the municipality chain.
    pub municipality: RegionQuery,
    /// District standing in for the province.
    pub district: RegionQuery,
}

impl Default for RegionTargets {
    /// Bagmati Province, Nagarjun Municipality and Kathmandu District.
    fn default() -> Self {
        Self {
            province: RegionQuery::province("bagmati").with_aliases(["3", "Province 3"]),
            municipality: RegionQuery::municipality("nagarjun"),
            district: RegionQuery::district("kathmandu"),
        }
    }
}

/// Return the first region in `dataset` that satisfies `query`.
///
/// `None` means the dataset was valid but did not contain the target. Callers
/// must treat that as data absence, not as a transport failure.
#[must_use]
pub fn find_region<'d>(dataset: &'d BoundaryDataset, query: &RegionQuery) -> Option<&'d Region> {
    dataset.iter().find(|region| query.matches(region))
}

fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}
