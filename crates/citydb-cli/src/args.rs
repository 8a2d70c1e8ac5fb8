use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for citydb
#[derive(Debug, Parser)]
#[command(
    name = "citydb",
    version,
    about = "Resolve coordinates and place names against a settlement catalog"
)]
pub struct CliArgs {
    /// SQLite catalog (.db/.sqlite) or JSON snapshot (.json, .json.gz)
    #[arg(short = 'c', long = "catalog", env = "CITYDB_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Number of read-only catalog handles kept open
    #[arg(long = "pool-size", env = "CITYDB_POOL_SIZE", global = true)]
    pub pool_size: Option<u32>,

    /// Marker file whose presence switches on emergency mode
    #[arg(long = "emergency-marker", env = "CITYDB_EMERGENCY_MARKER", global = true)]
    pub emergency_marker: Option<PathBuf>,

    /// Log filter, e.g. `citydb_core=debug`
    #[arg(long = "log", env = "CITYDB_LOG", global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Most important settlement near a coordinate
    Nearest {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Per-tier radius numerator in km (tier t qualifies within scale / t)
        #[arg(long)]
        scale: Option<f64>,

        /// Restrict to priority tiers while the emergency marker is present
        #[arg(long = "respect-mode")]
        respect_mode: bool,
    },

    /// Closest settlement name by edit distance
    Name {
        /// Free-text name (diacritics and punctuation are ignored)
        query: String,
    },

    /// Row counts per tier
    Stats,

    /// Fail on the first row with an unknown administrative type
    Check,

    /// Show the operating mode reported by the marker files
    Mode,
}
