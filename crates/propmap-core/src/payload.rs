// crates/propmap-core/src/payload.rs

//! # Payload Shapes
//!
//! The upstream analytics job writes its output in whichever layout its
//! dataframe writer chose. We classify the parsed JSON once into a
//! [`PayloadShape`] and let the normalizer match on that.
//!
//! Classification order:
//! 1. `{"columns": {field: [..], ..}}` → [`PayloadShape::Columnar`]
//! 2. `[{..}, {..}]` → [`PayloadShape::Rows`]
//! 3. any other object → [`PayloadShape::Single`]

use crate::error::{PropMapError, Result};
use serde_json::{Map, Value};

/// Name of the wrapping field that marks a column-oriented payload.
pub const COLUMNS_KEY: &str = "columns";

/// Column name → column values.
pub type Columns = Map<String, Value>;

/// The discriminated form of a raw payload.
#[derive(Clone, Debug, PartialEq)]
pub enum PayloadShape {
    /// One sequence per field. Every value is guaranteed to be an array.
    Columnar(Columns),
    /// One object per record.
    Rows(Vec<Map<String, Value>>),
    /// A bare record object.
    Single(Map<String, Value>),
}

impl PayloadShape {
    /// Parses UTF-8 JSON text and classifies it.
    pub fn parse(text: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(text)?;
        Self::classify(raw)
    }

    /// Classifies an already parsed value.
    pub fn classify(raw: Value) -> Result<Self> {
        match raw {
            Value::Array(items) => {
                let rows = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| match item {
                        Value::Object(obj) => Ok(obj),
                        other => Err(PropMapError::MalformedPayload(format!(
                            "element {i} is {}, expected an object",
                            type_name(&other)
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(PayloadShape::Rows(rows))
            }
            Value::Object(mut obj) => {
                if is_columnar(&obj) {
                    if let Some(Value::Object(columns)) = obj.remove(COLUMNS_KEY) {
                        return Ok(PayloadShape::Columnar(columns));
                    }
                }
                Ok(PayloadShape::Single(obj))
            }
            other => Err(PropMapError::MalformedPayload(format!(
                "top-level value is {}, expected an array or an object",
                type_name(&other)
            ))),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PayloadShape::Columnar(_) => "columnar",
            PayloadShape::Rows(_) => "rows",
            PayloadShape::Single(_) => "single",
        }
    }
}

/// `columns` must hold an object whose every value is an array. Anything else
/// (e.g. a property literally named `columns`) leaves the object a record.
fn is_columnar(obj: &Map<String, Value>) -> bool {
    match obj.get(COLUMNS_KEY) {
        Some(Value::Object(cols)) => cols.values().all(Value::is_array),
        _ => false,
    }
}

/// JSON type name used in diagnostics.
pub fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
