// crates/propmap-core/src/normalize.rs

//! # Shape Normalizer
//!
//! Turns any accepted payload layout into an ordered `Vec<PropertyRecord>`.

use crate::error::Result;
use crate::payload::{Columns, PayloadShape};
use crate::record::PropertyRecord;
use log::{debug, warn};
use serde_json::{Map, Value};

/// Normalizes UTF-8 JSON text.
pub fn normalize_str(text: &str) -> Result<Vec<PropertyRecord>> {
    let shape = PayloadShape::parse(text)?;
    Ok(normalize_shape(shape))
}

/// Normalizes an already parsed JSON value.
pub fn normalize(raw: Value) -> Result<Vec<PropertyRecord>> {
    let shape = PayloadShape::classify(raw)?;
    Ok(normalize_shape(shape))
}

/// Infallible once the shape is known.
pub fn normalize_shape(shape: PayloadShape) -> Vec<PropertyRecord> {
    debug!("normalizing {} payload", shape.kind());
    match shape {
        PayloadShape::Rows(rows) => rows.into_iter().map(PropertyRecord::from_object).collect(),
        PayloadShape::Columnar(columns) => columns_to_rows(columns)
            .into_iter()
            .map(PropertyRecord::from_object)
            .collect(),
        PayloadShape::Single(obj) => vec![PropertyRecord::from_object(obj)],
    }
}

/// Row count of a columnar payload: the shortest column.
///
/// Taking the minimum over every column keeps the result independent of key
/// order. Returns the length together with a flag telling whether the
/// columns disagreed.
pub fn column_length(columns: &Columns) -> (usize, bool) {
    let mut lengths = columns
        .values()
        .map(|v| v.as_array().map_or(0, Vec::len));
    let Some(first) = lengths.next() else {
        return (0, false);
    };
    lengths.fold((first, false), |(min, ragged), len| {
        (min.min(len), ragged || len != first)
    })
}

fn columns_to_rows(columns: Columns) -> Vec<Map<String, Value>> {
    let (len, ragged) = column_length(&columns);
    if ragged {
        let detail: Vec<String> = columns
            .iter()
            .map(|(k, v)| format!("{k}={}", v.as_array().map_or(0, Vec::len)))
            .collect();
        warn!(
            "columnar payload has mismatched column lengths ({}); truncating to {len} records",
            detail.join(", ")
        );
    }

    let mut rows: Vec<Map<String, Value>> = (0..len).map(|_| Map::new()).collect();
    for (name, values) in columns {
        let Value::Array(values) = values else {
            continue;
        };
        for (row, value) in rows.iter_mut().zip(values) {
            row.insert(name.clone(), value);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;
    use serde_json::json;

    #[test]
    fn rows_keep_order_and_values() {
        let records = normalize(json!([
            { "latitude": 1.0, "longitude": 2.0, "address": "A" },
            { "latitude": 3.0, "longitude": 4.0, "address": "B" },
            { "latitude": 5.0, "longitude": 6.0 }
        ]))
        .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].address, FieldValue::Present(json!("A")));
        assert_eq!(records[1].latitude, FieldValue::Present(json!(3.0)));
        assert!(records[2].address.is_missing());
    }

    #[test]
    fn columns_are_transposed() {
        let records = normalize(json!({
            "columns": {
                "latitude": [38.9, 38.8],
                "longitude": [-77.0, -77.1],
                "price": [500000, null]
            }
        }))
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].longitude, FieldValue::Present(json!(-77.1)));
        assert_eq!(records[1].price, FieldValue::Present(Value::Null));
        assert!(records[0].bedrooms.is_missing());
    }

    #[test]
    fn ragged_columns_truncate_to_shortest() {
        let records = normalize(json!({
            "columns": {
                "a": [1, 2, 3, 4],
                "latitude": [1.0, 2.0],
                "z": [1, 2, 3]
            }
        }))
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("a"), FieldValue::Present(json!(2)));
        assert_eq!(records[1].get("z"), FieldValue::Present(json!(2)));
    }

    #[test]
    fn column_length_ignores_key_order() {
        let mut first = Columns::new();
        first.insert("a".into(), json!([1, 2, 3]));
        first.insert("b".into(), json!([1]));
        let mut second = Columns::new();
        second.insert("b".into(), json!([1]));
        second.insert("a".into(), json!([1, 2, 3]));
        assert_eq!(column_length(&first), (1, true));
        assert_eq!(column_length(&second), (1, true));
    }

    #[test]
    fn empty_columns_yield_no_records() {
        assert!(normalize(json!({ "columns": {} })).unwrap().is_empty());
        assert_eq!(column_length(&Columns::new()), (0, false));
    }

    #[test]
    fn bare_object_is_one_record() {
        let records = normalize_str(r#"{"latitude": 38.9, "longitude": -77.0, "status": "Active"}"#)
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("status"), FieldValue::Present(json!("Active")));
        assert_eq!(records[0].to_object().len(), 3);
    }
}
