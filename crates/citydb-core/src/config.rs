// crates/citydb-core/src/config.rs

//! # Settings
//!
//! Process-level knobs, read from `CITYDB_*` environment variables. Parsing
//! goes through an injectable lookup function so it can be tested with a
//! plain map instead of the real environment.
//!
//! | variable                        | default                |
//! |---------------------------------|------------------------|
//! | `CITYDB_CATALOG`                | `meteo.db`             |
//! | `CITYDB_POOL_SIZE`              | `5`                    |
//! | `CITYDB_CHECKOUT_TIMEOUT_SECS`  | `30`                   |
//! | `CITYDB_EMERGENCY_MARKER`       | `run_emergency`        |
//! | `CITYDB_EMERGENCY_FAILED_MARKER`| `run_emergency_failed` |
//! | `CITYDB_DISTANCE_SCALE_KM`      | `10`                   |
//! | `CITYDB_LOG`                    | `info`                 |

use crate::error::{CityDbError, Result};
use crate::mode::{ModeGate, DEFAULT_EMERGENCY_FAILED_MARKER, DEFAULT_EMERGENCY_MARKER};
use crate::resolver::DEFAULT_DISTANCE_SCALE_KM;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CATALOG: &str = "meteo.db";
/// Longest accepted `CITYDB_CHECKOUT_TIMEOUT_SECS`.
pub const MAX_CHECKOUT_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// SQLite database, or a `.json` / `.json.gz` snapshot.
    pub catalog: PathBuf,
    pub pool_size: u32,
    pub checkout_timeout_secs: u64,
    pub emergency_marker: PathBuf,
    pub emergency_failed_marker: PathBuf,
    pub distance_scale_km: f64,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from(DEFAULT_CATALOG),
            pool_size: 5,
            checkout_timeout_secs: 30,
            emergency_marker: PathBuf::from(DEFAULT_EMERGENCY_MARKER),
            emergency_failed_marker: PathBuf::from(DEFAULT_EMERGENCY_FAILED_MARKER),
            distance_scale_km: DEFAULT_DISTANCE_SCALE_KM,
            log: "info".to_owned(),
        }
    }
}

impl Settings {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key → value lookup; missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let path = |var: &str, default: PathBuf| lookup(var).map(PathBuf::from).unwrap_or(default);

        let parse_u32 = |var: &str, default: u32| -> Result<u32> {
            match lookup(var) {
                Some(raw) => raw.trim().parse().map_err(|e| CityDbError::config(var, format!("{e}"))),
                None => Ok(default),
            }
        };
        let parse_u64 = |var: &str, default: u64| -> Result<u64> {
            match lookup(var) {
                Some(raw) => raw.trim().parse().map_err(|e| CityDbError::config(var, format!("{e}"))),
                None => Ok(default),
            }
        };
        let parse_f64 = |var: &str, default: f64| -> Result<f64> {
            match lookup(var) {
                Some(raw) => raw.trim().parse().map_err(|e| CityDbError::config(var, format!("{e}"))),
                None => Ok(default),
            }
        };

        let settings = Settings {
            catalog: path("CITYDB_CATALOG", defaults.catalog),
            pool_size: parse_u32("CITYDB_POOL_SIZE", defaults.pool_size)?,
            checkout_timeout_secs: parse_u64(
                "CITYDB_CHECKOUT_TIMEOUT_SECS",
                defaults.checkout_timeout_secs,
            )?,
            emergency_marker: path("CITYDB_EMERGENCY_MARKER", defaults.emergency_marker),
            emergency_failed_marker: path(
                "CITYDB_EMERGENCY_FAILED_MARKER",
                defaults.emergency_failed_marker,
            ),
            distance_scale_km: parse_f64("CITYDB_DISTANCE_SCALE_KM", defaults.distance_scale_km)?,
            log: lookup("CITYDB_LOG").unwrap_or(defaults.log),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(CityDbError::config("CITYDB_POOL_SIZE", "must be at least 1"));
        }
        if !(1..=MAX_CHECKOUT_TIMEOUT_SECS).contains(&self.checkout_timeout_secs) {
            return Err(CityDbError::config(
                "CITYDB_CHECKOUT_TIMEOUT_SECS",
                format!("must be between 1 and {MAX_CHECKOUT_TIMEOUT_SECS}"),
            ));
        }
        if !(self.distance_scale_km.is_finite() && self.distance_scale_km > 0.0) {
            return Err(CityDbError::config(
                "CITYDB_DISTANCE_SCALE_KM",
                "must be a positive number",
            ));
        }
        Ok(())
    }

    pub fn checkout_timeout(&self) -> Duration {
        Duration::from_secs(self.checkout_timeout_secs)
    }

    /// Gate probing the configured marker files.
    pub fn mode_gate(&self) -> ModeGate {
        ModeGate::with_markers(
            &self.emergency_marker,
            Some(self.emergency_failed_marker.clone()),
        )
    }

    #[cfg(feature = "sqlite")]
    pub fn pool_options(&self) -> crate::pool::PoolOptions {
        crate::pool::PoolOptions {
            size: self.pool_size,
            checkout_timeout: self.checkout_timeout(),
            ..Default::default()
        }
    }
}
