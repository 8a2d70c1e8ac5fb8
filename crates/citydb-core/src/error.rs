// crates/citydb-core/src/error.rs

//! # Errors
//!
//! A single error enum for the whole crate. "No such place" is **not** an
//! error: resolvers return `Ok(None)` for it, so callers can tell an empty
//! answer apart from a broken lookup.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification of a failure, for presentation code that only needs
/// to choose between "bad data" and "service problem" messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The catalog contains something the resolver cannot interpret.
    Data,
    /// The catalog could not be reached or read.
    Store,
    /// The process was started with unusable settings.
    Config,
}

#[derive(Debug, Error)]
pub enum CityDbError {
    /// A catalog row carries an administrative-type label outside the closed set.
    #[error("unknown administrative type {label:?} (row {id:?})")]
    Classification { id: Option<String>, label: String },

    /// The catalog could not be opened, queried or decoded. Not retried.
    #[error("catalog unavailable: {0}")]
    StoreUnavailable(#[source] BoxError),

    /// No pooled connection became free within the configured wait.
    #[error("no catalog connection available after {waited_ms} ms: {reason}")]
    PoolExhaustedTimeout { waited_ms: u64, reason: String },

    #[error("invalid setting {var}: {reason}")]
    Config { var: String, reason: String },
}

impl CityDbError {
    pub fn classification(id: Option<&str>, label: &str) -> Self {
        CityDbError::Classification {
            id: id.map(str::to_owned),
            label: label.to_owned(),
        }
    }

    pub fn store(err: impl Into<BoxError>) -> Self {
        CityDbError::StoreUnavailable(err.into())
    }

    pub fn config(var: &str, reason: impl Into<String>) -> Self {
        CityDbError::Config {
            var: var.to_owned(),
            reason: reason.into(),
        }
    }

    /// Which side is at fault: the data, the store, or the settings.
    pub fn kind(&self) -> FailureKind {
        match self {
            CityDbError::Classification { .. } => FailureKind::Data,
            CityDbError::Config { .. } => FailureKind::Config,
            CityDbError::StoreUnavailable(_) | CityDbError::PoolExhaustedTimeout { .. } => {
                FailureKind::Store
            }
        }
    }

    pub fn is_data_error(&self) -> bool {
        self.kind() == FailureKind::Data
    }
}

impl From<std::io::Error> for CityDbError {
    fn from(e: std::io::Error) -> Self {
        CityDbError::store(e)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for CityDbError {
    fn from(e: serde_json::Error) -> Self {
        CityDbError::store(e)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for CityDbError {
    fn from(e: rusqlite::Error) -> Self {
        CityDbError::store(e)
    }
}

pub type Result<T> = std::result::Result<T, CityDbError>;
