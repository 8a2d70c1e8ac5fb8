//! Error handling example for citydb-rs
//!
//! "Not found" is `Ok(None)`; everything else is a [`CityDbError`] with a
//! coarse [`FailureKind`].

use citydb_rs::prelude::*;
use citydb_rs::{CatalogRow, FailureKind, Settings};

fn describe(err: &CityDbError) -> &'static str {
    match err.kind() {
        FailureKind::Data => "bad catalog data",
        FailureKind::Store => "catalog unavailable",
        FailureKind::Config => "bad configuration",
    }
}

fn main() {
    println!("=== citydb-rs Error Handling Example ===\n");

    // Example 1: Missing catalog file
    println!("--- Example 1: Opening a missing catalog ---");
    match SqliteCatalog::open("/nonexistent/meteo.db", PoolOptions::default()) {
        Ok(_) => println!("unexpectedly opened"),
        Err(e) => println!("✗ {} ({e})", describe(&e)),
    }
    println!();

    // Example 2: Unknown administrative type
    println!("--- Example 2: Row with an unknown type label ---");
    let catalog = MemoryCatalog::new(vec![CatalogRow {
        id: "X1".into(),
        name: "Ādažu novads".into(),
        search_name: None,
        lat: 57.07,
        lon: 24.32,
        kind: "novads".into(),
    }]);
    match catalog.check() {
        Ok(stats) => println!("✓ {} rows", stats.total()),
        Err(e) => println!("✗ {} ({e})", describe(&e)),
    }
    println!();

    // Example 3: Invalid settings
    println!("--- Example 3: Invalid pool size ---");
    let bad = Settings::from_lookup(|key| (key == "CITYDB_POOL_SIZE").then(|| "lots".to_string()));
    if let Err(e) = bad {
        println!("✗ {} ({e})", describe(&e));
    }
    println!();

    // Example 4: Nothing to find
    println!("--- Example 4: Empty results are not errors ---");
    let resolver = Resolver::new(MemoryCatalog::default(), ModeGate::normal());
    match resolver.resolve_by_name("Rīga") {
        Ok(None) => println!("✓ no match (Ok(None))"),
        Ok(Some(hit)) => println!("found {}", hit.name()),
        Err(e) => println!("✗ {e}"),
    }
    match resolver.resolve_by_name("!!!") {
        Ok(None) => println!("✓ query without letters: no match"),
        other => println!("{other:?}"),
    }

    println!("\n=== Example completed successfully ===");
}
