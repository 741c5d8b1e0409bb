//! Basic usage example for propmap-rs
//!
//! Normalizes a row-oriented payload, projects it to GeoJSON features and
//! prints the popup each property would show.

use propmap_core::display::popup_html;
use propmap_core::prelude::*;

fn main() -> Result<()> {
    println!("=== propmap-rs Basic Usage Example ===\n");

    let payload = r#"[
        {"id": "a1", "address": "1600 Pennsylvania Ave NW", "latitude": 38.8977, "longitude": -77.0365, "price": 0, "bedrooms": 16, "bathrooms": 35},
        {"id": "b2", "address": "3101 Wisconsin Ave NW", "latitude": 38.9296, "longitude": -77.0723, "price": 875000, "bedrooms": 3},
        {"id": "c3", "latitude": 38.8893, "longitude": -77.0502}
    ]"#;

    // 1. Normalize
    let records = normalize_str(payload)?;
    println!("Properties loaded: {}", records.len());

    // 2. Project
    let features = project(&records);
    let stats = features.stats();
    println!("  Placeable: {}", stats.placeable);
    if let Some(bounds) = stats.bounds {
        println!("  Center: {:?}", bounds.center());
    }
    println!();

    // 3. What a click would show
    for feature in &features.features {
        println!("{}", popup_html(&feature.properties));
    }
    println!();

    println!("GeoJSON:");
    println!(
        "{}",
        serde_json::to_string_pretty(&features).map_err(PropMapError::from)?
    );

    Ok(())
}
