// crates/citydb-core/src/catalog/memory.rs

use super::CatalogStore;
use crate::error::Result;
use crate::model::{AdminType, CatalogRow, Location};

/// Catalog rows held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    rows: Vec<CatalogRow>,
}

impl MemoryCatalog {
    /// Wraps `rows` as-is. Labels are **not** validated here; use
    /// [`CatalogStore::check`] or one of the loaders for that.
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        Self { rows }
    }

    pub fn from_locations(locations: impl IntoIterator<Item = Location>) -> Self {
        let rows = locations
            .into_iter()
            .map(|l| CatalogRow {
                id: l.id,
                name: l.name,
                search_name: l.search_name,
                lat: l.lat,
                lon: l.lon,
                kind: l.admin_type.label().to_owned(),
            })
            .collect();
        Self { rows }
    }

    pub fn push(&mut self, row: CatalogRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl CatalogStore for MemoryCatalog {
    fn candidates(&self, types: &[AdminType]) -> Result<Vec<CatalogRow>> {
        Ok(self
            .rows
            .iter()
            .filter(|r| types.iter().any(|t| t.label() == r.kind))
            .cloned()
            .collect())
    }

    fn all_rows(&self) -> Result<Vec<CatalogRow>> {
        Ok(self.rows.clone())
    }
}

// -----------------------------------------------------------------------------
// SNAPSHOT LOADER
// -----------------------------------------------------------------------------

#[cfg(feature = "json")]
mod snapshot {
    use super::MemoryCatalog;
    use crate::catalog::CatalogStore;
    use crate::error::{CityDbError, Result};
    use crate::model::CatalogRow;
    use std::fs::File;
    use std::io::{BufReader, Read};
    use std::path::Path;

    impl MemoryCatalog {
        /// **Snapshot Loader:** reads a JSON array of rows (`.json`), or a
        /// gzipped one (`.json.gz`, feature `compact`).
        ///
        /// Every label is validated; an unknown one fails the load with
        /// [`CityDbError::Classification`].
        pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
            let path = path.as_ref();
            let reader = open_stream(path)?;
            let catalog = Self::from_reader(reader)?;
            tracing::info!(
                snapshot = %path.display(),
                rows = catalog.len(),
                "loaded catalog snapshot"
            );
            Ok(catalog)
        }

        /// Parses and validates a JSON array of rows.
        pub fn from_reader(reader: impl Read) -> Result<Self> {
            let rows: Vec<CatalogRow> = serde_json::from_reader(reader)?;
            let catalog = Self::new(rows);
            catalog.check()?;
            Ok(catalog)
        }
    }

    /// Opens a file, buffers it, and wraps it in a Gzip decoder when the
    /// name ends in `.gz`.
    fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
        let file = File::open(path).map_err(|e| {
            CityDbError::store(std::io::Error::new(
                e.kind(),
                format!("snapshot not found at {}: {e}", path.display()),
            ))
        })?;
        let reader = BufReader::new(file);
        let gzipped = path.extension().is_some_and(|ext| ext == "gz");

        if gzipped {
            #[cfg(feature = "compact")]
            {
                use flate2::read::GzDecoder;
                return Ok(Box::new(GzDecoder::new(reader)));
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(CityDbError::config(
                    "catalog",
                    "gzipped snapshots need the `compact` feature",
                ));
            }
        }
        Ok(Box::new(reader))
    }
}
