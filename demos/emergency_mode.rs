//! Emergency mode example for citydb-rs
//!
//! While the `run_emergency` marker file exists, callers that opt in
//! (`force_all_tiers(false)`) only see district centers and above.

use citydb_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== citydb-rs Emergency Mode Example ===\n");

    let marker = std::env::temp_dir().join(format!("run_emergency_demo_{}", std::process::id()));
    let catalog = MemoryCatalog::from_locations([
        Location {
            id: "V1".into(),
            name: "Vecpiebalga".into(),
            search_name: None,
            lat: 57.0600,
            lon: 25.8100,
            admin_type: AdminType::Village,
        },
        Location {
            id: "D1".into(),
            name: "Cēsis".into(),
            search_name: None,
            lat: 57.3119,
            lon: 25.2706,
            admin_type: AdminType::DistrictCenter,
        },
    ]);
    let resolver = Resolver::new(catalog, ModeGate::with_markers(&marker, None));
    let query = CoordinateQuery::new(57.06, 25.81).force_all_tiers(false);

    let show = |label: &str| -> Result<()> {
        let hit = resolver.resolve_by_coordinate(query)?;
        println!(
            "{label:<10} emergency={:<5} -> {}",
            resolver.gate().is_emergency(),
            hit.as_ref().map_or("nothing", |h| h.name())
        );
        Ok(())
    };

    show("normal")?;
    std::fs::write(&marker, "")?;
    show("emergency")?;
    std::fs::remove_file(&marker)?;
    show("restored")?;

    println!("\n=== Example completed successfully ===");
    Ok(())
}
