// crates/citydb-core/src/model.rs

//! # Domain Model
//!
//! Catalog rows as they come out of a store ([`CatalogRow`]), the classified
//! form the resolvers work on ([`Location`]) and the query-scoped result
//! ([`Match`]).

use crate::error::{CityDbError, Result};
use crate::text::normalize_name;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

// -----------------------------------------------------------------------------
// TIER CLASSIFIER
// -----------------------------------------------------------------------------

/// Administrative classification of a settlement.
///
/// The serialized form is the catalog's native (Latvian) label, carried
/// through unchanged. Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AdminType {
    /// Republic city (national-level settlement, incl. the capital).
    #[serde(rename = "republikas pilseta")]
    RepublicCity,
    #[serde(rename = "citas pilsētas")]
    OtherCity,
    #[serde(rename = "rajona centrs")]
    DistrictCenter,
    #[serde(rename = "pagasta centrs")]
    ParishCenter,
    #[serde(rename = "ciems")]
    Village,
}

impl AdminType {
    /// Every type, highest priority first.
    pub const ALL: [AdminType; 5] = [
        AdminType::RepublicCity,
        AdminType::OtherCity,
        AdminType::DistrictCenter,
        AdminType::ParishCenter,
        AdminType::Village,
    ];

    /// The types kept while the emergency mode is active (tiers 1-3).
    pub const PRIORITY: [AdminType; 3] = [
        AdminType::RepublicCity,
        AdminType::OtherCity,
        AdminType::DistrictCenter,
    ];

    /// Catalog label, exactly as stored in the `type` column.
    pub const fn label(self) -> &'static str {
        match self {
            AdminType::RepublicCity => "republikas pilseta",
            AdminType::OtherCity => "citas pilsētas",
            AdminType::DistrictCenter => "rajona centrs",
            AdminType::ParishCenter => "pagasta centrs",
            AdminType::Village => "ciems",
        }
    }

    /// Rank in `1..=5`; lower is more important.
    pub const fn tier(self) -> u8 {
        match self {
            AdminType::RepublicCity => 1,
            AdminType::OtherCity => 2,
            AdminType::DistrictCenter => 3,
            AdminType::ParishCenter => 4,
            AdminType::Village => 5,
        }
    }

    /// Classifies a catalog label. Unknown labels are an error, never a default.
    pub fn from_label(label: &str) -> Result<Self> {
        AdminType::ALL
            .into_iter()
            .find(|t| t.label() == label)
            .ok_or_else(|| CityDbError::classification(None, label))
    }
}

/// `tierOf`: label → rank, failing on anything outside the closed set.
pub fn tier_of(label: &str) -> Result<u8> {
    AdminType::from_label(label).map(AdminType::tier)
}

impl FromStr for AdminType {
    type Err = CityDbError;

    fn from_str(s: &str) -> Result<Self> {
        AdminType::from_label(s)
    }
}

impl fmt::Display for AdminType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// -----------------------------------------------------------------------------
// ROWS & LOCATIONS
// -----------------------------------------------------------------------------

/// An unclassified row, as returned by a [`crate::catalog::CatalogStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub id: String,
    pub name: String,
    /// Pre-folded ASCII name maintained by the catalog, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A classified catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub admin_type: AdminType,
}

impl Location {
    pub fn tier(&self) -> u8 {
        self.admin_type.tier()
    }

    /// Key used by the name resolver: the stored search name, or the folded
    /// normalized display name when the catalog has none.
    pub fn search_key(&self) -> Cow<'_, str> {
        match self.search_name.as_deref() {
            Some(s) if !s.is_empty() => Cow::Borrowed(s),
            _ => Cow::Owned(normalize_name(&self.name)),
        }
    }
}

impl TryFrom<CatalogRow> for Location {
    type Error = CityDbError;

    fn try_from(row: CatalogRow) -> Result<Self> {
        let admin_type = AdminType::from_label(&row.kind)
            .map_err(|_| CityDbError::classification(Some(row.id.as_str()), &row.kind))?;
        Ok(Location {
            id: row.id,
            name: row.name,
            search_name: row.search_name,
            lat: row.lat,
            lon: row.lon,
            admin_type,
        })
    }
}

// -----------------------------------------------------------------------------
// RESULTS
// -----------------------------------------------------------------------------

/// Query-scoped distance attached to a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    /// Great-circle distance (coordinate search).
    Kilometers(f64),
    /// Levenshtein distance between search keys (name search).
    Edits(usize),
}

impl Distance {
    pub fn as_f64(self) -> f64 {
        match self {
            Distance::Kilometers(km) => km,
            Distance::Edits(n) => n as f64,
        }
    }
}

/// Which phase of the coordinate search produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPass {
    /// The per-tier radius was enforced.
    Bounded,
    /// No radius: outside the home region, after the fallback, or a name search.
    Unbounded,
}

/// The single best entry for a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(flatten)]
    pub location: Location,
    pub tier: u8,
    pub distance: Distance,
    pub pass: SearchPass,
}

impl Match {
    pub fn new(location: Location, distance: Distance, pass: SearchPass) -> Self {
        let tier = location.tier();
        Match {
            location,
            tier,
            distance,
            pass,
        }
    }

    pub fn name(&self) -> &str {
        &self.location.name
    }

    pub fn id(&self) -> &str {
        &self.location.id
    }
}

/// Row counts per tier, plus rows whose label does not classify.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Index 0 holds tier 1.
    pub per_tier: [usize; 5],
    pub unknown: usize,
}

impl CatalogStats {
    pub fn record(&mut self, label: &str) {
        self.record_many(label, 1);
    }

    pub fn record_many(&mut self, label: &str, n: usize) {
        match AdminType::from_label(label) {
            Ok(t) => self.per_tier[usize::from(t.tier() - 1)] += n,
            Err(_) => self.unknown += n,
        }
    }

    pub fn count(&self, admin_type: AdminType) -> usize {
        self.per_tier[usize::from(admin_type.tier() - 1)]
    }

    pub fn total(&self) -> usize {
        self.per_tier.iter().sum::<usize>() + self.unknown
    }
}
