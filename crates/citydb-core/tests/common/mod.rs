//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use citydb_core::{AdminType, Location};

pub const RIGA: (f64, f64) = (56.9496, 24.1052);
pub const TALLINN: (f64, f64) = (59.4370, 24.7536);

/// Roughly one kilometer of latitude.
pub const KM_LAT: f64 = 1.0 / 111.19;

pub fn loc(id: &str, name: &str, admin_type: AdminType, lat: f64, lon: f64) -> Location {
    Location {
        id: id.into(),
        name: name.into(),
        search_name: None,
        lat,
        lon,
        admin_type,
    }
}

/// A small slice of the Latvian catalog.
pub fn latvia() -> Vec<Location> {
    vec![
        loc("P1", "Rīga", AdminType::RepublicCity, 56.9496, 24.1052),
        loc("P2", "Daugavpils", AdminType::RepublicCity, 55.8747, 26.5362),
        loc("P3", "Jēkabpils", AdminType::RepublicCity, 56.4990, 25.8574),
        loc("P4", "Ogre", AdminType::OtherCity, 56.8162, 24.6140),
        loc("P5", "Madona", AdminType::DistrictCenter, 56.8538, 26.2170),
        loc("P6", "Ērgļi", AdminType::ParishCenter, 56.9006, 25.6393),
        loc("P7", "Ikšķile", AdminType::OtherCity, 56.8350, 24.4970),
        loc("P8", "Lubāna", AdminType::OtherCity, 56.9030, 26.7180),
        loc("P9", "Mārupe", AdminType::Village, 56.9070, 24.0500),
    ]
}

#[cfg(feature = "sqlite")]
pub mod sqlite {
    use super::*;
    use rusqlite::{params, Connection};
    use std::path::{Path, PathBuf};

    /// Writes a `cities` table to `dir/name` and returns its path.
    pub fn write_catalog(dir: &Path, name: &str, rows: &[Location], with_search_name: bool) -> PathBuf {
        let path = dir.join(name);
        let conn = Connection::open(&path).unwrap();
        if with_search_name {
            conn.execute_batch(
                "CREATE TABLE cities (id TEXT, name TEXT, lat REAL, lon REAL, type TEXT, search_name TEXT);",
            )
            .unwrap();
        } else {
            conn.execute_batch("CREATE TABLE cities (id TEXT, name TEXT, lat REAL, lon REAL, type TEXT);")
                .unwrap();
        }
        for row in rows {
            if with_search_name {
                conn.execute(
                    "INSERT INTO cities (id, name, lat, lon, type, search_name) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![row.id, row.name, row.lat, row.lon, row.admin_type.label(), row.search_key().as_ref()],
                )
                .unwrap();
            } else {
                conn.execute(
                    "INSERT INTO cities (id, name, lat, lon, type) VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![row.id, row.name, row.lat, row.lon, row.admin_type.label()],
                )
                .unwrap();
            }
        }
        path
    }
}
