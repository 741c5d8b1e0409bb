//! Columnar payload example for propmap-rs
//!
//! Dataframe writers often emit one array per column. The normalizer turns
//! that back into rows; ragged columns are cut to the shortest one.

use propmap_core::prelude::*;

fn main() -> Result<()> {
    println!("=== propmap-rs Columnar Payload Example ===\n");

    let payload = r#"{
        "columns": {
            "latitude":  [38.9072, 38.8462, 38.8816],
            "longitude": [-77.0369, -77.3064, -77.0910],
            "price":     [650000, 0, null],
            "zip_code":  ["20001", "22030", "22201"]
        }
    }"#;

    let shape = PayloadShape::parse(payload)?;
    println!("Layout: {}", shape.kind());

    let records = propmap_core::normalize::normalize_shape(shape);
    for (i, record) in records.iter().enumerate() {
        println!("  #{i}: {:?}", record.to_object());
    }
    println!();

    println!("--- Default policy (0 shows as N/A) ---");
    for f in project(&records).features {
        println!("  price = {}", f.properties.price);
    }
    println!("--- Present-only policy ---");
    for f in project_with(&records, DefaultPolicy::PresentOnly).features {
        println!("  price = {}", f.properties.price);
    }
    println!();

    println!("--- Ragged columns ---");
    let ragged = r#"{"columns": {"latitude": [1, 2, 3], "longitude": [4, 5]}}"#;
    println!("  {} records", normalize_str(ragged)?.len());

    Ok(())
}
