// crates/citydb-core/src/resolver.rs

//! # Location Resolver
//!
//! Two lookups over the same catalog:
//!
//! - [`Resolver::resolve_by_coordinate`]: the most important settlement near
//!   a point. Inside the home region a candidate only qualifies when it lies
//!   within `distance_scale_km / tier` kilometers, so a village has to be
//!   much closer than a city to win. If nothing qualifies the search is run
//!   once more without the radius.
//! - [`Resolver::resolve_by_name`]: the entry whose folded name is the
//!   fewest edits away from the query.
//!
//! Both return `Ok(None)` when the catalog has nothing to offer.

use crate::catalog::CatalogStore;
use crate::error::{CityDbError, Result};
use crate::geo::{distance_km, BoundingBox};
use crate::mode::ModeGate;
use crate::model::{CatalogRow, Distance, Location, Match, SearchPass};
use crate::text::{edit_distance_within, normalize_name};
use std::cmp::Ordering;

/// Scale used by the public "nearest city" endpoint.
pub const DEFAULT_DISTANCE_SCALE_KM: f64 = 10.0;

/// A coordinate lookup.
///
/// Validating `lat`/`lon` is the caller's job; non-finite coordinates simply
/// match nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateQuery {
    pub lat: f64,
    pub lon: f64,
    /// Per-tier radius numerator: tier `t` qualifies within `scale / t` km.
    pub distance_scale_km: f64,
    /// Ignore the emergency mode for this call.
    pub force_all_tiers: bool,
}

impl CoordinateQuery {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            distance_scale_km: DEFAULT_DISTANCE_SCALE_KM,
            force_all_tiers: true,
        }
    }

    pub fn distance_scale_km(mut self, km: f64) -> Self {
        self.distance_scale_km = km;
        self
    }

    pub fn force_all_tiers(mut self, force: bool) -> Self {
        self.force_all_tiers = force;
        self
    }
}

/// Resolves coordinates and names against a [`CatalogStore`].
#[derive(Debug)]
pub struct Resolver<S> {
    store: S,
    gate: ModeGate,
    home: BoundingBox,
}

impl<S: CatalogStore> Resolver<S> {
    pub fn new(store: S, gate: ModeGate) -> Self {
        Self {
            store,
            gate,
            home: BoundingBox::HOME,
        }
    }

    /// Replaces the region inside which the per-tier radius applies.
    pub fn with_home_region(mut self, home: BoundingBox) -> Self {
        self.home = home;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn gate(&self) -> &ModeGate {
        &self.gate
    }

    pub fn home_region(&self) -> BoundingBox {
        self.home
    }

    /// `resolveByCoordinate`: best `(tier, distance)` entry near a point.
    pub fn resolve_by_coordinate(&self, query: CoordinateQuery) -> Result<Option<Match>> {
        let types = self.gate.active_types(query.force_all_tiers);
        let candidates = classify(self.store.candidates(types)?)?;
        let search = nearest(&candidates, &query, &self.home);

        match &search.hit {
            Some(hit) => tracing::debug!(
                lat = query.lat,
                lon = query.lon,
                id = %hit.id(),
                tier = hit.tier,
                km = hit.distance.as_f64(),
                pass = ?hit.pass,
                passes = search.passes,
                "resolved coordinate"
            ),
            None => tracing::debug!(
                lat = query.lat,
                lon = query.lon,
                candidates = candidates.len(),
                passes = search.passes,
                "no location for coordinate"
            ),
        }
        Ok(search.hit)
    }

    /// `resolveByName`: closest name by edit distance, tier as tie-break.
    ///
    /// Always searches every administrative type, whatever the operating
    /// mode; only the coordinate lookup honours the emergency restriction.
    pub fn resolve_by_name(&self, name: &str) -> Result<Option<Match>> {
        let query = normalize_name(name);
        if query.is_empty() {
            tracing::debug!(raw = name, "name query is empty after normalization");
            return Ok(None);
        }

        let candidates = classify(self.store.candidates(self.gate.active_types(true))?)?;
        let hit = best_by_name(&candidates, &query);

        tracing::debug!(
            query = %query,
            id = hit.as_ref().map(|h| h.id()),
            edits = hit.as_ref().map(|h| h.distance.as_f64()),
            "resolved name"
        );
        Ok(hit)
    }

    /// While emergency mode is on, the priority settlement (tiers 1-3)
    /// nearest to `hit` stands in for it. `None` in normal mode.
    ///
    /// The lookup uses the default distance scale, whatever scale produced
    /// `hit`. A `hit` that is itself tier 1-3 is normally its own override.
    pub fn emergency_override(&self, hit: &Match) -> Result<Option<Match>> {
        if !self.gate.is_emergency() {
            return Ok(None);
        }
        let query = CoordinateQuery::new(hit.location.lat, hit.location.lon).force_all_tiers(false);
        let replacement = self.resolve_by_coordinate(query)?;
        tracing::info!(
            id = %hit.id(),
            replacement = replacement.as_ref().map(|m| m.id()),
            "emergency override"
        );
        Ok(replacement)
    }
}

// -----------------------------------------------------------------------------
// CLASSIFICATION
// -----------------------------------------------------------------------------

fn classify(rows: Vec<CatalogRow>) -> Result<Vec<Location>> {
    rows.into_iter()
        .map(Location::try_from)
        .collect::<Result<Vec<_>>>()
        .inspect_err(|e| {
            if let CityDbError::Classification { id, label } = e {
                tracing::warn!(?id, %label, "catalog row has an unknown administrative type");
            }
        })
}

// -----------------------------------------------------------------------------
// NEAREST COORDINATE
// -----------------------------------------------------------------------------

#[derive(Debug)]
pub(crate) struct Search {
    pub(crate) hit: Option<Match>,
    /// Phases actually run: 1 or 2.
    pub(crate) passes: u8,
}

/// Two-phase search. Inside the home region the bounded phase runs first and
/// the unbounded phase at most once after it; outside it only the unbounded
/// phase runs.
pub(crate) fn nearest(candidates: &[Location], query: &CoordinateQuery, home: &BoundingBox) -> Search {
    let scored: Vec<(&Location, f64)> = candidates
        .iter()
        .filter_map(|loc| {
            let km = distance_km(query.lat, query.lon, loc.lat, loc.lon);
            if km.is_finite() {
                Some((loc, km))
            } else {
                tracing::debug!(id = %loc.id, "skipping row with unreadable coordinates");
                None
            }
        })
        .collect();

    let phases: &[SearchPass] = if home.contains(query.lat, query.lon) {
        &[SearchPass::Bounded, SearchPass::Unbounded]
    } else {
        &[SearchPass::Unbounded]
    };

    let mut passes = 0;
    for &pass in phases {
        passes += 1;
        let best = scored
            .iter()
            .filter(|(loc, km)| match pass {
                SearchPass::Bounded => *km <= query.distance_scale_km / f64::from(loc.tier()),
                SearchPass::Unbounded => true,
            })
            .min_by(|a, b| rank_by_tier_then_km(*a, *b));

        if let Some(&(loc, km)) = best {
            return Search {
                hit: Some(Match::new(loc.clone(), Distance::Kilometers(km), pass)),
                passes,
            };
        }
    }
    Search { hit: None, passes }
}

/// Tier first, then distance. Equal keys compare equal so `min_by` keeps the
/// earliest row in catalog order.
fn rank_by_tier_then_km(a: &(&Location, f64), b: &(&Location, f64)) -> Ordering {
    a.0.tier()
        .cmp(&b.0.tier())
        .then_with(|| a.1.total_cmp(&b.1))
}

// -----------------------------------------------------------------------------
// APPROXIMATE NAME
// -----------------------------------------------------------------------------

/// Lowest `(edits, tier)`, first in catalog order on ties. Candidates already
/// worse than the current best are cut off early by the bounded distance.
pub(crate) fn best_by_name(candidates: &[Location], query: &str) -> Option<Match> {
    let mut best: Option<(usize, u8, &Location)> = None;

    for loc in candidates {
        let limit = best.map_or(usize::MAX, |(edits, ..)| edits);
        let Some(edits) = edit_distance_within(&loc.search_key(), query, limit) else {
            continue;
        };
        let improves = match best {
            None => true,
            Some((best_edits, best_tier, _)) => (edits, loc.tier()) < (best_edits, best_tier),
        };
        if improves {
            best = Some((edits, loc.tier(), loc));
        }
    }

    best.map(|(edits, _, loc)| Match::new(loc.clone(), Distance::Edits(edits), SearchPass::Unbounded))
}
