// crates/propmap-core/src/lib.rs

//! # propmap-core
//!
//! Turns the property payload written by the analytics job into GeoJSON
//! point features for the map viewer.
//!
//! ```text
//! JSON text ─► PayloadShape ─► Vec<PropertyRecord> ─► FeatureCollection ─► MapSurface
//!              (payload)       (normalize)            (project)            (session)
//! ```
//!
//! ```
//! use propmap_core::prelude::*;
//!
//! let text = r#"{"columns": {"latitude": [38.9], "longitude": [-77.0], "price": [0]}}"#;
//! let records = normalize_str(text)?;
//! let features = project(&records);
//! assert_eq!(features.features[0].properties.price, "N/A");
//! # Ok::<(), propmap_core::PropMapError>(())
//! ```

pub mod common;
pub mod config;
pub mod display;
pub mod error;
pub mod inspect;
#[cfg(feature = "json")]
pub mod loader;
pub mod normalize;
pub mod payload;
pub mod prelude;
pub mod project;
pub mod record;
pub mod session;
pub mod traits;

// Re-exports
pub use crate::common::{BoundingBox, CollectionStats};
pub use crate::config::{AccessToken, MapView, ViewerConfig};
pub use crate::error::{PropMapError, Result};
pub use crate::normalize::{normalize, normalize_str};
pub use crate::payload::PayloadShape;
pub use crate::project::{
    project, project_with, DefaultPolicy, DisplayAttributes, Feature, FeatureCollection, Point,
};
pub use crate::record::{FieldValue, PropertyRecord};
