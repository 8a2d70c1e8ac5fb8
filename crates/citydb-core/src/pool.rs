// crates/citydb-core/src/pool.rs

//! # Connection Pool
//!
//! A fixed number of read-only SQLite handles, all opened when the pool is
//! built and kept open until it is dropped. A resolution checks one out and
//! gets it back through the guard's `Drop`, so early returns and `?` paths
//! cannot leak a handle.
//!
//! Built on `r2d2` with recycling switched off: no idle timeout, no maximum
//! lifetime, no health check on checkout. The pool never grows beyond
//! `size` and never replaces a handle.

use crate::error::{CityDbError, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Number of handles in the reference deployment.
pub const DEFAULT_POOL_SIZE: u32 = 5;
/// Longest a resolution waits for a free handle.
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);
/// Upper bound for both timeouts; the pool adds them to `Instant::now()`.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(3600);
/// SQLite busy timeout applied to every handle.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Scoped handle; returned to the pool when dropped.
pub type PooledConnection = r2d2::PooledConnection<ReadOnlyManager>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    pub size: u32,
    pub checkout_timeout: Duration,
    pub busy_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_POOL_SIZE,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

impl PoolOptions {
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(CityDbError::config("pool size", "must be at least 1"));
        }
        if self.checkout_timeout.is_zero() {
            return Err(CityDbError::config("checkout timeout", "must be non-zero"));
        }
        if self.checkout_timeout > MAX_TIMEOUT {
            return Err(CityDbError::config(
                "checkout timeout",
                format!("must not exceed {} s", MAX_TIMEOUT.as_secs()),
            ));
        }
        if self.busy_timeout > MAX_TIMEOUT {
            return Err(CityDbError::config(
                "busy timeout",
                format!("must not exceed {} s", MAX_TIMEOUT.as_secs()),
            ));
        }
        Ok(())
    }
}

/// Opens read-only handles to one catalog file.
#[derive(Debug, Clone)]
pub struct ReadOnlyManager {
    path: PathBuf,
    busy_timeout: Duration,
}

impl ReadOnlyManager {
    pub fn new(path: impl Into<PathBuf>, busy_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            busy_timeout,
        }
    }
}

impl r2d2::ManageConnection for ReadOnlyManager {
    type Connection = Connection;
    type Error = rusqlite::Error;

    fn connect(&self) -> std::result::Result<Connection, rusqlite::Error> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }

    fn is_valid(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.query_row("SELECT 1", [], |_| Ok(()))
    }

    fn has_broken(&self, _conn: &mut Connection) -> bool {
        false
    }
}

/// Fixed-size pool of read-only catalog handles.
pub struct ConnectionPool {
    inner: r2d2::Pool<ReadOnlyManager>,
    path: PathBuf,
    options: PoolOptions,
}

impl ConnectionPool {
    /// Opens all `options.size` handles up front. Fails if any of them
    /// cannot be opened (missing file, permissions) within the checkout timeout.
    pub fn open(path: impl AsRef<Path>, options: PoolOptions) -> Result<Self> {
        options.validate()?;
        let path = path.as_ref().to_path_buf();
        // Read-only opens of a missing file would only fail after the full
        // checkout timeout inside r2d2's retry loop.
        if !path.is_file() {
            return Err(CityDbError::store(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("catalog not found at {}", path.display()),
            )));
        }
        let manager = ReadOnlyManager::new(&path, options.busy_timeout);

        let inner = r2d2::Pool::builder()
            .max_size(options.size)
            .min_idle(Some(options.size))
            .idle_timeout(None)
            .max_lifetime(None)
            .test_on_check_out(false)
            .connection_timeout(options.checkout_timeout)
            .build(manager)
            .map_err(CityDbError::store)?;

        tracing::info!(
            catalog = %path.display(),
            size = options.size,
            "catalog connection pool ready"
        );
        Ok(Self {
            inner,
            path,
            options,
        })
    }

    /// `checkout`: waits up to the checkout timeout for a free handle.
    pub fn checkout(&self) -> Result<PooledConnection> {
        let started = Instant::now();
        self.inner.get().map_err(|e| {
            let waited_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            tracing::warn!(waited_ms, error = %e, "catalog pool exhausted");
            CityDbError::PoolExhaustedTimeout {
                waited_ms,
                reason: e.to_string(),
            }
        })
    }

    pub fn size(&self) -> u32 {
        self.options.size
    }

    /// Handles currently sitting in the pool.
    pub fn idle(&self) -> u32 {
        self.inner.state().idle_connections
    }

    /// Handles ever opened and still alive (checked out or idle).
    pub fn open_handles(&self) -> u32 {
        self.inner.state().connections
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for ConnectionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionPool")
            .field("path", &self.path)
            .field("size", &self.options.size)
            .field("idle", &self.idle())
            .finish()
    }
}
