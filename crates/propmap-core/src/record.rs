// crates/propmap-core/src/record.rs

//! # Property Records
//!
//! The uniform row type produced by the normalizer. Every record carries the
//! same six known fields; a field that was not in the source object is kept
//! as [`FieldValue::Missing`] instead of being dropped.

use serde_json::{Map, Value};

pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const ADDRESS: &str = "address";
pub const PRICE: &str = "price";
pub const BEDROOMS: &str = "bedrooms";
pub const BATHROOMS: &str = "bathrooms";


/// A single field slot of a record.
///
/// `Missing` means the key did not exist in the source object. A JSON `null`
/// is a present value (`Present(Value::Null)`).
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FieldValue {
    #[default]
    Missing,
    Present(Value),
}

impl FieldValue {
    pub fn from_option(v: Option<Value>) -> Self {
        v.map_or(FieldValue::Missing, FieldValue::Present)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            FieldValue::Missing => None,
            FieldValue::Present(v) => Some(v),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Missing or an explicit JSON `null`.
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Missing | FieldValue::Present(Value::Null))
    }

    /// Truthiness as the browser viewer evaluates it: missing, `null`,
    /// `false`, `0`, `NaN` and `""` are falsy. Arrays and objects are truthy.
    pub fn is_falsy(&self) -> bool {
        match self {
            FieldValue::Missing => true,
            FieldValue::Present(v) => match v {
                Value::Null => true,
                Value::Bool(b) => !b,
                Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0 || f.is_nan()),
                Value::String(s) => s.is_empty(),
                Value::Array(_) | Value::Object(_) => false,
            },
        }
    }

    /// Numeric view of the field. Numeric strings (`"38.9"`) are accepted.
    pub fn as_f64(&self) -> Option<f64> {
        match self.as_value()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

/// A normalized property row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyRecord {
    pub latitude: FieldValue,
    pub longitude: FieldValue,
    pub address: FieldValue,
    pub price: FieldValue,
    pub bedrooms: FieldValue,
    pub bathrooms: FieldValue,
    /// Source keys outside the known field set, copied through unchanged.
    pub extra: Map<String, Value>,
}

impl PropertyRecord {
    /// Splits a source object into the known field slots and the remainder.
    pub fn from_object(mut obj: Map<String, Value>) -> Self {
        let mut take = |key: &str| FieldValue::from_option(obj.remove(key));
        let latitude = take(LATITUDE);
        let longitude = take(LONGITUDE);
        let address = take(ADDRESS);
        let price = take(PRICE);
        let bedrooms = take(BEDROOMS);
        let bathrooms = take(BATHROOMS);

        Self {
            latitude,
            longitude,
            address,
            price,
            bedrooms,
            bathrooms,
            extra: obj,
        }
    }

    /// Looks a field up by its source name, known or extra.
    pub fn get(&self, name: &str) -> FieldValue {
        match name {
            LATITUDE => self.latitude.clone(),
            LONGITUDE => self.longitude.clone(),
            ADDRESS => self.address.clone(),
            PRICE => self.price.clone(),
            BEDROOMS => self.bedrooms.clone(),
            BATHROOMS => self.bathrooms.clone(),
            other => FieldValue::from_option(self.extra.get(other).cloned()),
        }
    }

    /// Rebuilds the source object. Missing known fields are left out.
    pub fn to_object(&self) -> Map<String, Value> {
        let mut obj = self.extra.clone();
        let known = [
            (LATITUDE, &self.latitude),
            (LONGITUDE, &self.longitude),
            (ADDRESS, &self.address),
            (PRICE, &self.price),
            (BEDROOMS, &self.bedrooms),
            (BATHROOMS, &self.bathrooms),
        ];
        for (key, field) in known {
            if let Some(v) = field.as_value() {
                obj.insert(key.to_string(), v.clone());
            }
        }
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!("test helper expects an object"),
        }
    }

    #[test]
    fn absent_fields_become_missing_markers() {
        let rec = PropertyRecord::from_object(obj(json!({ "latitude": 38.9 })));
        assert_eq!(rec.latitude, FieldValue::Present(json!(38.9)));
        assert!(rec.longitude.is_missing());
        assert!(rec.price.is_missing());
        assert!(rec.extra.is_empty());
    }

    #[test]
    fn null_is_present_but_absent() {
        let rec = PropertyRecord::from_object(obj(json!({ "price": null })));
        assert!(!rec.price.is_missing());
        assert!(rec.price.is_absent());
        assert!(rec.price.is_falsy());
    }

    #[test]
    fn unknown_keys_survive_round_trip() {
        let source = obj(json!({
            "id": "abc",
            "zip_code": "20001",
            "latitude": 38.9,
            "price": null
        }));
        let rec = PropertyRecord::from_object(source.clone());
        assert_eq!(rec.get("zip_code"), FieldValue::Present(json!("20001")));
        assert_eq!(rec.to_object(), source);
    }

    #[test]
    fn falsy_matches_browser_truthiness() {
        let falsy = [json!(0), json!(0.0), json!(""), json!(false), Value::Null];
        for v in falsy {
            assert!(FieldValue::Present(v.clone()).is_falsy(), "{v} should be falsy");
        }
        let truthy = [json!(1), json!("0"), json!(true), json!([]), json!({})];
        for v in truthy {
            assert!(!FieldValue::Present(v.clone()).is_falsy(), "{v} should be truthy");
        }
    }

    #[test]
    fn numeric_strings_parse_as_coordinates() {
        assert_eq!(FieldValue::Present(json!(" -77.1 ")).as_f64(), Some(-77.1));
        assert_eq!(FieldValue::Present(json!("north")).as_f64(), None);
        assert_eq!(FieldValue::Missing.as_f64(), None);
    }
}
