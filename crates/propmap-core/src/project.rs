// crates/propmap-core/src/project.rs

//! # Feature Projector
//!
//! Maps normalized records onto GeoJSON point features carrying the flat
//! attribute map the map popup reads (`title`, `price`, `bedrooms`,
//! `bathrooms`).

use crate::common::{BoundingBox, CollectionStats};
use crate::record::{FieldValue, PropertyRecord};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title used when a record has no usable address.
pub const DEFAULT_TITLE: &str = "Property";
/// Placeholder for missing price / bedrooms / bathrooms.
pub const NOT_AVAILABLE: &str = "N/A";

/// When a display field falls back to its default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DefaultPolicy {
    /// Browser truthiness: missing, `null`, `0`, `""` and `false` all fall
    /// back. A real price of `0` therefore shows as `"N/A"`.
    #[default]
    Falsy,
    /// Only missing keys and `null` fall back; `0` is shown as `0`.
    PresentOnly,
}

impl DefaultPolicy {
    fn uses_default(self, field: &FieldValue) -> bool {
        match self {
            DefaultPolicy::Falsy => field.is_falsy(),
            DefaultPolicy::PresentOnly => field.is_absent(),
        }
    }

    fn resolve(self, field: &FieldValue, default: &str) -> Value {
        match field.as_value() {
            Some(v) if !self.uses_default(field) => v.clone(),
            _ => Value::String(default.to_string()),
        }
    }
}

/// Flat attribute map attached to every feature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayAttributes {
    pub title: Value,
    pub price: Value,
    pub bedrooms: Value,
    pub bathrooms: Value,
}

impl DisplayAttributes {
    pub fn from_record(record: &PropertyRecord, policy: DefaultPolicy) -> Self {
        Self {
            title: policy.resolve(&record.address, DEFAULT_TITLE),
            price: policy.resolve(&record.price, NOT_AVAILABLE),
            bedrooms: policy.resolve(&record.bedrooms, NOT_AVAILABLE),
            bathrooms: policy.resolve(&record.bathrooms, NOT_AVAILABLE),
        }
    }
}

/// GeoJSON point. An axis that could not be read as a number is `None`
/// and serializes as `null`.
///
/// `[Option<f64>; 2]` rather than `geojson::Position` (`Vec<f64>`): a record
/// with an unreadable coordinate still yields a feature, and `None` keeps
/// collections comparable where `NaN` would not.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Point")]
pub struct Point {
    pub coordinates: [Option<f64>; 2],
}

impl Point {
    pub fn lon(&self) -> Option<f64> {
        self.coordinates[0]
    }

    pub fn lat(&self) -> Option<f64> {
        self.coordinates[1]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Point,
    pub properties: DisplayAttributes,
}

impl Feature {
    /// Both axes finite and within WGS84 bounds.
    pub fn is_placeable(&self) -> bool {
        match (self.geometry.lon(), self.geometry.lat()) {
            (Some(lon), Some(lat)) => {
                lon.is_finite()
                    && lat.is_finite()
                    && (-180.0..=180.0).contains(&lon)
                    && (-90.0..=90.0).contains(&lat)
            }
            _ => false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn placeable(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|f| f.is_placeable())
    }

    pub fn stats(&self) -> CollectionStats {
        let mut bounds: Option<BoundingBox> = None;
        let mut placeable = 0;
        for f in self.placeable() {
            placeable += 1;
            if let (Some(lon), Some(lat)) = (f.geometry.lon(), f.geometry.lat()) {
                bounds = Some(match bounds {
                    Some(b) => b.extend(lon, lat),
                    None => BoundingBox::point(lon, lat),
                });
            }
        }
        CollectionStats {
            features: self.len(),
            placeable,
            unplaceable: self.len() - placeable,
            bounds,
        }
    }
}

/// Projects records with the default (falsy) policy.
pub fn project(records: &[PropertyRecord]) -> FeatureCollection {
    project_with(records, DefaultPolicy::default())
}

pub fn project_with(records: &[PropertyRecord], policy: DefaultPolicy) -> FeatureCollection {
    let features: Vec<Feature> = records
        .iter()
        .map(|record| Feature {
            geometry: Point {
                coordinates: [record.longitude.as_f64(), record.latitude.as_f64()],
            },
            properties: DisplayAttributes::from_record(record, policy),
        })
        .collect();

    let collection = FeatureCollection { features };
    let unplaceable = collection.len() - collection.placeable().count();
    if unplaceable > 0 {
        warn!(
            "{unplaceable} of {} features have missing or out-of-range coordinates",
            collection.len()
        );
    }
    collection
}
