//! citydb: command-line front end for citydb-core
//!
//! Loads the catalog named by `--catalog` (or `CITYDB_CATALOG`), answers a
//! single query, and prints the result as JSON.
//!
//! Usage examples
//! --------------
//!
//! - Nearest settlement, all tiers
//!   $ citydb nearest --lat 56.95 --lon 24.11
//!
//! - Nearest settlement, honouring the emergency marker
//!   $ citydb nearest --lat 56.95 --lon 24.11 --respect-mode
//!
//! - Fuzzy name lookup
//!   $ citydb name "jekabpils"
//!
//! - Catalog summary and integrity check
//!   $ citydb stats
//!   $ citydb check
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use citydb_core::{CatalogStore, CoordinateQuery, Match, MemoryCatalog, Resolver, Settings};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXIT_OK: u8 = 0;
const EXIT_NOT_FOUND: u8 = 1;
const EXIT_ERROR: u8 = 2;

type Env<'a> = &'a dyn Fn(&str) -> Option<String>;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let env = |key: &str| std::env::var(key).ok();
    let result = merge_settings(&args, &env).and_then(|settings| {
        init_tracing(&settings.log)?;
        run(args, &settings)
    });
    ExitCode::from(exit_status(result))
}

fn exit_status(result: anyhow::Result<u8>) -> u8 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    }
}

fn run(args: CliArgs, settings: &Settings) -> anyhow::Result<u8> {
    let store = open_catalog(settings)?;
    tracing::debug!(catalog = %settings.catalog.display(), "catalog opened");
    let resolver = Resolver::new(store, settings.mode_gate());

    match args.command {
        Commands::Nearest {
            lat,
            lon,
            scale,
            respect_mode,
        } => {
            let query = CoordinateQuery::new(lat, lon)
                .distance_scale_km(scale.unwrap_or(settings.distance_scale_km))
                .force_all_tiers(!respect_mode);
            let hit = resolver.resolve_by_coordinate(query)?;
            report_match(&resolver, hit)
        }
        Commands::Name { query } => {
            let hit = resolver.resolve_by_name(&query)?;
            report_match(&resolver, hit)
        }
        Commands::Stats => {
            let stats = resolver.store().stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(EXIT_OK)
        }
        Commands::Check => {
            let stats = resolver.store().check()?;
            println!("ok: {} rows classified", stats.total());
            Ok(EXIT_OK)
        }
        Commands::Mode => {
            let gate = resolver.gate();
            let report = serde_json::json!({
                "emergency": gate.is_emergency(),
                "emergency_failed": gate.emergency_failed(),
            });
            println!("{report}");
            Ok(EXIT_OK)
        }
    }
}

/// Defaults, then `CITYDB_*` (or `RUST_LOG` for the log filter), then flags.
fn merge_settings(args: &CliArgs, env: Env<'_>) -> anyhow::Result<Settings> {
    let mut settings = Settings::from_lookup(env).context("reading CITYDB_* environment")?;
    if env("CITYDB_LOG").is_none() {
        if let Some(filter) = env("RUST_LOG") {
            settings.log = filter;
        }
    }
    if let Some(catalog) = &args.catalog {
        settings.catalog = catalog.clone();
    }
    if let Some(size) = args.pool_size {
        settings.pool_size = size;
    }
    if let Some(marker) = &args.emergency_marker {
        settings.emergency_marker = marker.clone();
    }
    if let Some(log) = &args.log {
        settings.log = log.clone();
    }
    settings.validate()?;
    Ok(settings)
}

fn log_filter(directives: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(directives).with_context(|| format!("invalid log filter {directives:?}"))
}

fn init_tracing(directives: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives)?)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn is_sqlite(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "db" | "sqlite" | "sqlite3"))
}

fn open_catalog(settings: &Settings) -> anyhow::Result<Box<dyn CatalogStore>> {
    let path = settings.catalog.as_path();
    if is_sqlite(path) {
        #[cfg(feature = "sqlite")]
        {
            let catalog = citydb_core::SqliteCatalog::open(path, settings.pool_options())
                .with_context(|| format!("opening catalog {}", path.display()))?;
            return Ok(Box::new(catalog));
        }
        #[cfg(not(feature = "sqlite"))]
        anyhow::bail!("{} is a SQLite catalog; rebuild with the `sqlite` feature", path.display());
    }
    let catalog = MemoryCatalog::load_from_path(path)
        .with_context(|| format!("loading snapshot {}", path.display()))?;
    Ok(Box::new(catalog))
}

/// Resolved match plus, in emergency mode, the settlement standing in for it.
fn report_match<S: CatalogStore>(resolver: &Resolver<S>, hit: Option<Match>) -> anyhow::Result<u8> {
    let replacement = match &hit {
        Some(hit) => resolver.emergency_override(hit)?,
        None => None,
    };
    let (json, code) = render_match(hit.as_ref(), replacement.as_ref())?;
    println!("{json}");
    Ok(code)
}

/// JSON for stdout and the exit status: the match (with `emergency_override`
/// when there is one), or `null` and [`EXIT_NOT_FOUND`].
fn render_match(hit: Option<&Match>, replacement: Option<&Match>) -> anyhow::Result<(String, u8)> {
    let Some(hit) = hit else {
        return Ok(("null".to_owned(), EXIT_NOT_FOUND));
    };
    let mut value = serde_json::to_value(hit)?;
    if let (Some(replacement), Some(object)) = (replacement, value.as_object_mut()) {
        object.insert("emergency_override".to_owned(), serde_json::to_value(replacement)?);
    }
    Ok((serde_json::to_string_pretty(&value)?, EXIT_OK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use citydb_core::{AdminType, Distance, Location, SearchPass};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(argv).unwrap()
    }

    fn env_from(map: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |key| map.get(key).map(|v| (*v).to_string())
    }

    fn sample_match(id: &str, admin_type: AdminType) -> Match {
        Match::new(
            Location {
                id: id.into(),
                name: id.into(),
                search_name: None,
                lat: 57.0,
                lon: 25.0,
                admin_type,
            },
            Distance::Kilometers(1.5),
            SearchPass::Bounded,
        )
    }

    /// Two-row snapshot: a village and the district center 30 km north.
    fn write_snapshot(dir: &Path) -> PathBuf {
        let path = dir.join("cities.json");
        let rows = serde_json::json!([
            {"id": "V", "name": "Vecpiebalga", "lat": 57.2, "lon": 25.0, "type": "ciems"},
            {"id": "D", "name": "Cēsis", "lat": 57.47, "lon": 25.0, "type": "rajona centrs"},
        ]);
        std::fs::write(&path, rows.to_string()).unwrap();
        path
    }

    fn settings_for(catalog: PathBuf, marker: PathBuf) -> Settings {
        Settings {
            catalog,
            emergency_marker: marker,
            ..Settings::default()
        }
    }

    #[test]
    fn flags_override_environment() {
        let env = env_from(HashMap::from([
            ("CITYDB_CATALOG", "/env/meteo.db"),
            ("CITYDB_POOL_SIZE", "3"),
            ("CITYDB_LOG", "warn"),
        ]));
        let args = parse(&["citydb", "--catalog", "/flag/meteo.db", "--log", "debug", "stats"]);
        let settings = merge_settings(&args, &env).unwrap();
        assert_eq!(settings.catalog, PathBuf::from("/flag/meteo.db"));
        assert_eq!(settings.pool_size, 3);
        assert_eq!(settings.log, "debug");
    }

    #[test]
    fn environment_fills_in_missing_flags() {
        let env = env_from(HashMap::from([("CITYDB_CATALOG", "/env/cities.json"), ("RUST_LOG", "trace")]));
        let args = parse(&["citydb", "stats"]);
        let settings = merge_settings(&args, &env).unwrap();
        assert_eq!(settings.catalog, PathBuf::from("/env/cities.json"));
        assert_eq!(settings.log, "trace");
        assert_eq!(settings.pool_size, 5);
    }

    #[test]
    fn zero_pool_flag_is_rejected() {
        let env = env_from(HashMap::new());
        let args = parse(&["citydb", "--pool-size", "0", "stats"]);
        assert!(merge_settings(&args, &env).is_err());
    }

    #[test]
    fn bad_log_filter_is_an_error() {
        assert!(log_filter("citydb_core=debug,info").is_ok());
        assert!(log_filter("citydb_core=loudest").is_err());
    }

    #[test]
    fn found_prints_json_and_exits_zero() {
        let hit = sample_match("P1", AdminType::RepublicCity);
        let (json, code) = render_match(Some(&hit), None).unwrap();
        assert_eq!(code, EXIT_OK);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "P1");
        assert_eq!(value["type"], "republikas pilseta");
        assert_eq!(value["tier"], 1);
        assert!(value.get("emergency_override").is_none());
    }

    #[test]
    fn not_found_prints_null_and_exits_one() {
        let (json, code) = render_match(None, None).unwrap();
        assert_eq!(json, "null");
        assert_eq!(code, EXIT_NOT_FOUND);
    }

    #[test]
    fn override_is_embedded_in_the_output() {
        let hit = sample_match("V", AdminType::Village);
        let replacement = sample_match("D", AdminType::DistrictCenter);
        let (json, _) = render_match(Some(&hit), Some(&replacement)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "V");
        assert_eq!(value["emergency_override"]["id"], "D");
    }

    #[test]
    fn commands_map_to_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = write_snapshot(dir.path());
        let marker = dir.path().join("run_emergency");
        let settings = settings_for(snapshot, marker.clone());

        let nearest = parse(&["citydb", "nearest", "--lat", "57.2", "--lon", "25.0"]);
        assert_eq!(exit_status(run(nearest, &settings)), EXIT_OK);

        let name = parse(&["citydb", "name", "123"]);
        assert_eq!(exit_status(run(name, &settings)), EXIT_NOT_FOUND);

        std::fs::write(&marker, "").unwrap();
        let nearest = parse(&["citydb", "nearest", "--lat", "57.2", "--lon", "25.0", "--respect-mode"]);
        assert_eq!(exit_status(run(nearest, &settings)), EXIT_OK);
        assert_eq!(exit_status(run(parse(&["citydb", "check"]), &settings)), EXIT_OK);
    }

    #[test]
    fn missing_catalog_exits_two() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_for(dir.path().join("missing.json"), dir.path().join("run_emergency"));
        assert_eq!(exit_status(run(parse(&["citydb", "stats"]), &settings)), EXIT_ERROR);

        let settings = settings_for(dir.path().join("missing.db"), dir.path().join("run_emergency"));
        assert_eq!(exit_status(run(parse(&["citydb", "stats"]), &settings)), EXIT_ERROR);
    }
}
