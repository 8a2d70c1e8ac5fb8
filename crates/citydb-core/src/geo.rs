// crates/citydb-core/src/geo.rs

//! Spherical distance and the home-region bounding box.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the catalog's distance figures.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers (spherical law of cosines).
///
/// The `acos` argument is clamped to `[-1, 1]`: identical or antipodal points
/// can push it a hair outside the domain, which would otherwise yield NaN.
///
/// ```rust
/// use citydb_core::geo::distance_km;
///
/// assert!(distance_km(56.95, 24.1, 56.95, 24.1) < 1e-3);
/// let riga_jelgava = distance_km(56.9496, 24.1052, 56.6511, 23.7214);
/// assert!((riga_jelgava - 41.0).abs() < 1.5);
/// ```
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let dlambda = lon2.to_radians() - lon1.to_radians();
    let cos_angle = phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * dlambda.cos();
    cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_KM
}

/// Open latitude/longitude box; points on the edge are outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Approximation of Latvia, the region the distance threshold is tuned for.
    pub const HOME: BoundingBox = BoundingBox {
        min_lat: 55.7,
        max_lat: 58.05,
        min_lon: 20.95,
        max_lon: 28.25,
    };

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat > self.min_lat && lat < self.max_lat && lon > self.min_lon && lon < self.max_lon
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox::HOME
    }
}
