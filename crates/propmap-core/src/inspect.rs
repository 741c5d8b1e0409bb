// crates/propmap-core/src/inspect.rs

//! # Payload Inspection
//!
//! A quick look at what the analytics job actually wrote: size, a text
//! preview, the JSON type, and the first record. Used by `propmap inspect`.

use crate::payload::type_name;
use serde_json::Value;
use std::fmt;

/// Characters shown in the text preview.
pub const PREVIEW_CHARS: usize = 500;

/// Name of the nested record array some writers wrap rows in.
pub const DATA_KEY: &str = "data";

#[derive(Clone, Debug, PartialEq)]
pub enum JsonOutline {
    Array {
        len: usize,
        first: Option<Value>,
    },
    Object {
        keys: Vec<String>,
        /// Length and first element of a nested `data` array, if any.
        data: Option<(usize, Option<Value>)>,
    },
    Scalar(&'static str),
}

/// Result of inspecting one payload.
#[derive(Clone, Debug, PartialEq)]
pub struct PayloadReport {
    pub byte_len: usize,
    pub preview: String,
    /// `Err` holds the parser message when the text is not JSON.
    pub outline: Result<JsonOutline, String>,
}

impl PayloadReport {
    pub fn from_text(text: &str) -> Self {
        let preview: String = text.chars().take(PREVIEW_CHARS).collect();
        let outline = serde_json::from_str::<Value>(text)
            .map(outline_of)
            .map_err(|e| e.to_string());
        Self {
            byte_len: text.len(),
            preview,
            outline,
        }
    }
}

fn outline_of(v: Value) -> JsonOutline {
    match v {
        Value::Array(items) => JsonOutline::Array {
            len: items.len(),
            first: items.into_iter().next(),
        },
        Value::Object(mut obj) => {
            let keys = obj.keys().cloned().collect();
            let data = match obj.remove(DATA_KEY) {
                Some(Value::Array(items)) => Some((items.len(), items.into_iter().next())),
                _ => None,
            };
            JsonOutline::Object { keys, data }
        }
        other => JsonOutline::Scalar(type_name(&other)),
    }
}

fn pretty(v: &Value) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

impl fmt::Display for PayloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File size: {}", self.byte_len)?;
        writeln!(f)?;
        writeln!(f, "First {PREVIEW_CHARS} characters:")?;
        writeln!(f, "{}", self.preview)?;
        writeln!(f)?;

        match &self.outline {
            Err(e) => writeln!(f, "Error: {e}"),
            Ok(JsonOutline::Scalar(kind)) => writeln!(f, "Parsed JSON - type: {kind}"),
            Ok(JsonOutline::Array { len, first }) => {
                writeln!(f, "Parsed JSON - type: array")?;
                writeln!(f, "It's an array with {len} items")?;
                if let Some(first) = first {
                    writeln!(f)?;
                    writeln!(f, "First item: {}", pretty(first))?;
                }
                Ok(())
            }
            Ok(JsonOutline::Object { keys, data }) => {
                writeln!(f, "Parsed JSON - type: object")?;
                writeln!(f, "Keys: {keys:?}")?;
                if let Some((len, first)) = data {
                    writeln!(f, "It has a data array with {len} items")?;
                    if let Some(first) = first {
                        writeln!(f)?;
                        writeln!(f, "First data item: {}", pretty(first))?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reports_object_keys_and_nested_data() {
        let report = PayloadReport::from_text(r#"{"data": [{"id": 1}, {"id": 2}], "meta": {}}"#);
        match &report.outline {
            Ok(JsonOutline::Object { keys, data }) => {
                assert_eq!(keys, &vec!["data".to_string(), "meta".to_string()]);
                assert_eq!(data, &Some((2, Some(json!({ "id": 1 })))));
            }
            other => panic!("unexpected outline {other:?}"),
        }
        let text = report.to_string();
        assert!(text.contains("It has a data array with 2 items"));
        assert!(text.contains("First data item"));
    }

    #[test]
    fn reports_arrays() {
        let report = PayloadReport::from_text("[1, 2, 3]");
        assert_eq!(
            report.outline,
            Ok(JsonOutline::Array {
                len: 3,
                first: Some(json!(1))
            })
        );
    }

    #[test]
    fn preview_is_truncated_by_chars() {
        let text = format!("\"{}\"", "é".repeat(600));
        let report = PayloadReport::from_text(&text);
        assert_eq!(report.preview.chars().count(), PREVIEW_CHARS);
        assert_eq!(report.byte_len, text.len());
    }

    #[test]
    fn invalid_json_is_reported_not_raised() {
        let report = PayloadReport::from_text("{oops");
        assert!(report.outline.is_err());
        assert!(report.to_string().contains("Error:"));
    }
}
