// crates/citydb-core/src/catalog/mod.rs

//! # Catalog Stores
//!
//! The resolvers never talk to storage directly; they ask a [`CatalogStore`]
//! for the rows of the active administrative types and do the ranking
//! themselves. Two stores ship with the crate:
//!
//! - [`SqliteCatalog`]: the production `cities` table behind a fixed-size
//!   pool of read-only connections (feature `sqlite`).
//! - [`MemoryCatalog`]: rows held in memory, loadable from a JSON or
//!   gzipped JSON snapshot (feature `json` / `compact`).

use crate::error::{CityDbError, Result};
use crate::model::{AdminType, CatalogRow, CatalogStats};

mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryCatalog;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteCatalog;

/// Read-only access to the location catalog.
pub trait CatalogStore: Send + Sync {
    /// Rows whose `type` label is one of `types`, in catalog order.
    ///
    /// The order must be the same on every call against an unchanged
    /// catalog; the resolvers use it as their last tie-break.
    fn candidates(&self, types: &[AdminType]) -> Result<Vec<CatalogRow>>;

    /// Every row, including rows with labels outside the closed set.
    fn all_rows(&self) -> Result<Vec<CatalogRow>>;

    /// Row counts per tier.
    fn stats(&self) -> Result<CatalogStats> {
        let mut stats = CatalogStats::default();
        for row in self.all_rows()? {
            stats.record(&row.kind);
        }
        Ok(stats)
    }

    /// Fails with [`CityDbError::Classification`] on the first row whose
    /// label does not classify.
    fn check(&self) -> Result<CatalogStats> {
        let mut stats = CatalogStats::default();
        for row in self.all_rows()? {
            if AdminType::from_label(&row.kind).is_err() {
                return Err(CityDbError::classification(Some(row.id.as_str()), &row.kind));
            }
            stats.record(&row.kind);
        }
        Ok(stats)
    }
}

impl<S: CatalogStore + ?Sized> CatalogStore for std::sync::Arc<S> {
    fn candidates(&self, types: &[AdminType]) -> Result<Vec<CatalogRow>> {
        (**self).candidates(types)
    }

    fn all_rows(&self) -> Result<Vec<CatalogRow>> {
        (**self).all_rows()
    }

    fn stats(&self) -> Result<CatalogStats> {
        (**self).stats()
    }

    fn check(&self) -> Result<CatalogStats> {
        (**self).check()
    }
}

impl<S: CatalogStore + ?Sized> CatalogStore for Box<S> {
    fn candidates(&self, types: &[AdminType]) -> Result<Vec<CatalogRow>> {
        (**self).candidates(types)
    }

    fn all_rows(&self) -> Result<Vec<CatalogRow>> {
        (**self).all_rows()
    }

    fn stats(&self) -> Result<CatalogStats> {
        (**self).stats()
    }

    fn check(&self) -> Result<CatalogStats> {
        (**self).check()
    }
}
