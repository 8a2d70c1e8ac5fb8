//! citydb prelude: the types most callers need in one import.

pub use crate::catalog::{CatalogStore, MemoryCatalog};
#[cfg(feature = "sqlite")]
pub use crate::catalog::SqliteCatalog;
pub use crate::error::{CityDbError, Result};
pub use crate::mode::ModeGate;
pub use crate::model::{AdminType, Distance, Location, Match, SearchPass};
#[cfg(feature = "sqlite")]
pub use crate::pool::PoolOptions;
pub use crate::resolver::{CoordinateQuery, Resolver};
