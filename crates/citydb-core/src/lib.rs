// crates/citydb-core/src/lib.rs

//! # citydb-core
//!
//! Resolves a coordinate or a free-text name to a settlement from a read-only
//! catalog, ranking candidates by administrative importance.
//!
//! ```
//! use citydb_core::prelude::*;
//!
//! let catalog = MemoryCatalog::from_locations([Location {
//!     id: "P1".into(),
//!     name: "Rīga".into(),
//!     search_name: Some("riga".into()),
//!     lat: 56.9496,
//!     lon: 24.1052,
//!     admin_type: AdminType::RepublicCity,
//! }]);
//! let resolver = Resolver::new(catalog, ModeGate::normal());
//!
//! let hit = resolver.resolve_by_coordinate(CoordinateQuery::new(56.95, 24.11))?.unwrap();
//! assert_eq!(hit.name(), "Rīga");
//!
//! let hit = resolver.resolve_by_name("Riga")?.unwrap();
//! assert_eq!(hit.distance, Distance::Edits(0));
//! # Ok::<(), citydb_core::CityDbError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod geo;
pub mod mode;
pub mod model;
#[cfg(feature = "sqlite")]
pub mod pool;
pub mod prelude;
pub mod resolver;
pub mod text;

// Re-exports
pub use crate::catalog::{CatalogStore, MemoryCatalog};
#[cfg(feature = "sqlite")]
pub use crate::catalog::SqliteCatalog;
pub use crate::config::Settings;
pub use crate::error::{CityDbError, FailureKind, Result};
pub use crate::geo::{distance_km, BoundingBox};
pub use crate::mode::{EmergencySignal, MarkerFile, ModeGate, Switch};
pub use crate::model::{
    AdminType, CatalogRow, CatalogStats, Distance, Location, Match, SearchPass,
};
#[cfg(feature = "sqlite")]
pub use crate::pool::{ConnectionPool, PoolOptions};
pub use crate::resolver::{CoordinateQuery, Resolver};
