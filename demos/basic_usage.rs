//! Basic usage example for citydb-rs
//!
//! This example demonstrates how to:
//! - Build a catalog (in memory, or from `CITYDB_CATALOG` if set)
//! - Resolve a coordinate to the most important nearby settlement
//! - Resolve a misspelled name

use citydb_rs::prelude::*;
use citydb_rs::Settings;

fn sample_catalog() -> MemoryCatalog {
    let row = |id: &str, name: &str, admin_type, lat, lon| Location {
        id: id.into(),
        name: name.into(),
        search_name: None,
        lat,
        lon,
        admin_type,
    };
    MemoryCatalog::from_locations([
        row("P1", "Rīga", AdminType::RepublicCity, 56.9496, 24.1052),
        row("P2", "Jūrmala", AdminType::RepublicCity, 56.9680, 23.7704),
        row("P3", "Ogre", AdminType::OtherCity, 56.8162, 24.6140),
        row("P4", "Sigulda", AdminType::OtherCity, 57.1537, 24.8533),
        row("P5", "Madona", AdminType::DistrictCenter, 56.8538, 26.2170),
        row("P6", "Ērgļi", AdminType::ParishCenter, 56.9006, 25.6393),
        row("P7", "Mārupe", AdminType::Village, 56.9070, 24.0500),
    ])
}

fn open_store(settings: &Settings) -> Result<Box<dyn CatalogStore>> {
    if std::env::var_os("CITYDB_CATALOG").is_none() {
        return Ok(Box::new(sample_catalog()));
    }
    let path = settings.catalog.as_path();
    if path.extension().is_some_and(|ext| ext == "db") {
        Ok(Box::new(SqliteCatalog::open(path, settings.pool_options())?))
    } else {
        Ok(Box::new(MemoryCatalog::load_from_path(path)?))
    }
}

fn main() -> Result<()> {
    println!("=== citydb-rs Basic Usage Example ===\n");

    let settings = Settings::from_env()?;
    let resolver = Resolver::new(open_store(&settings)?, ModeGate::normal());
    let stats = resolver.store().stats()?;
    println!("✓ Catalog ready: {} rows\n", stats.total());

    // Example 1: Coordinates
    println!("--- Example 1: Nearest settlement ---");
    for (lat, lon) in [(56.95, 24.11), (56.86, 25.90), (57.40, 27.10)] {
        match resolver.resolve_by_coordinate(CoordinateQuery::new(lat, lon))? {
            Some(hit) => println!(
                "({lat:.2}, {lon:.2}) -> {} [tier {}, {:.1} km, {:?}]",
                hit.name(),
                hit.tier,
                hit.distance.as_f64(),
                hit.pass
            ),
            None => println!("({lat:.2}, {lon:.2}) -> nothing"),
        }
    }
    println!();

    // Example 2: Names
    println!("--- Example 2: Fuzzy name lookup ---");
    for query in ["Riga", "sigulda", "Ergli", "Madonna"] {
        match resolver.resolve_by_name(query)? {
            Some(hit) => println!("{query:>8} -> {} ({} edits)", hit.name(), hit.distance.as_f64()),
            None => println!("{query:>8} -> nothing"),
        }
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
