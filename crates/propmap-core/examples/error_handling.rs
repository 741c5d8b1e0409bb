//! Error handling example for propmap-rs
//!
//! This example demonstrates how each failure surfaces.

use propmap_core::prelude::*;

fn main() -> Result<()> {
    println!("=== propmap-rs Error Handling Example ===\n");

    // Example 1: Malformed payloads
    println!("--- Example 1: Malformed payloads ---");
    let bad = ["{ not json", "42", r#"[{"latitude": 1.0}, "oops"]"#];
    for text in bad {
        match normalize_str(text) {
            Ok(records) => println!("  ✓ {} records", records.len()),
            Err(e) => println!("  ✗ {text:<30} → {e}"),
        }
    }
    println!();

    // Example 2: Token validation
    println!("--- Example 2: Access token ---");
    for raw in [None, Some("YOUR_MAPBOX_ACCESS_TOKEN_HERE"), Some("pk.example")] {
        match AccessToken::from_config(raw) {
            Ok(token) => println!("  ✓ {raw:?} → {token:?}"),
            Err(e) => println!("  ✗ {raw:?} → {e}"),
        }
    }
    println!();

    // Example 3: Records without coordinates still project
    println!("--- Example 3: Unplaceable records ---");
    let records = normalize_str(r#"[{"address": "Somewhere"}, {"latitude": 38.9, "longitude": -77.0}]"#)?;
    let stats = project(&records).stats();
    println!(
        "  {} features, {} placeable, {} without usable coordinates",
        stats.features, stats.placeable, stats.unplaceable
    );

    Ok(())
}
