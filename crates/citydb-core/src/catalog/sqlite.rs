// crates/citydb-core/src/catalog/sqlite.rs

use super::CatalogStore;
use crate::error::Result;
use crate::model::{AdminType, CatalogRow, CatalogStats};
use crate::pool::{ConnectionPool, PoolOptions};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Row};
use std::path::Path;

/// The production catalog: the `cities` table of a SQLite database.
///
/// Expected columns: `id`, `name`, `lat`, `lon`, `type` and, optionally,
/// `search_name` (pre-folded ASCII name). Catalog order is `rowid` order.
#[derive(Debug)]
pub struct SqliteCatalog {
    pool: ConnectionPool,
    has_search_name: bool,
}

impl SqliteCatalog {
    /// Opens the pool and inspects the table layout once.
    pub fn open(path: impl AsRef<Path>, options: PoolOptions) -> Result<Self> {
        Self::from_pool(ConnectionPool::open(path, options)?)
    }

    pub fn from_pool(pool: ConnectionPool) -> Result<Self> {
        let has_search_name = {
            let conn = pool.checkout()?;
            has_column(&conn, "cities", "search_name")?
        };
        if !has_search_name {
            tracing::debug!("catalog has no search_name column; folding display names instead");
        }
        Ok(Self {
            pool,
            has_search_name,
        })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn select_list(&self) -> &'static str {
        if self.has_search_name {
            "id, name, lat, lon, type, search_name"
        } else {
            "id, name, lat, lon, type, NULL"
        }
    }

    fn query_rows(&self, sql: &str, labels: &[&str]) -> Result<Vec<CatalogRow>> {
        // Held until the end of this function, whatever the outcome.
        let conn = self.pool.checkout()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(labels.iter()), read_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

impl CatalogStore for SqliteCatalog {
    fn candidates(&self, types: &[AdminType]) -> Result<Vec<CatalogRow>> {
        if types.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; types.len()].join(", ");
        let sql = format!(
            "SELECT {} FROM cities WHERE type IN ({placeholders}) ORDER BY rowid",
            self.select_list()
        );
        let labels: Vec<&str> = types.iter().map(|t| t.label()).collect();
        self.query_rows(&sql, &labels)
    }

    fn all_rows(&self) -> Result<Vec<CatalogRow>> {
        let sql = format!("SELECT {} FROM cities ORDER BY rowid", self.select_list());
        self.query_rows(&sql, &[])
    }

    fn stats(&self) -> Result<CatalogStats> {
        let conn = self.pool.checkout()?;
        let mut stmt = conn.prepare("SELECT type, COUNT(*) FROM cities GROUP BY type")?;
        let mut stats = CatalogStats::default();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let label: Option<String> = row.get(0)?;
            let count: i64 = row.get(1)?;
            stats.record_many(&label.unwrap_or_default(), usize::try_from(count).unwrap_or(0));
        }
        Ok(stats)
    }
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(names.iter().any(|n| n == column))
}

/// Ids are text in the published dataset but integers in some exports.
fn text_or_number(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Null | ValueRef::Blob(_) => String::new(),
    })
}

/// Coordinates that are NULL or not numeric come back as NaN; the resolver
/// treats such rows as unreadable and never returns them.
fn coordinate(row: &Row<'_>, idx: usize) -> rusqlite::Result<f64> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Real(f) => f,
        ValueRef::Integer(i) => i as f64,
        ValueRef::Text(t) => std::str::from_utf8(t)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(f64::NAN),
        ValueRef::Null | ValueRef::Blob(_) => f64::NAN,
    })
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<CatalogRow> {
    Ok(CatalogRow {
        id: text_or_number(row, 0)?,
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        lat: coordinate(row, 2)?,
        lon: coordinate(row, 3)?,
        kind: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        search_name: row.get(5)?,
    })
}

