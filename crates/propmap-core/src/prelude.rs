// crates/propmap-core/src/prelude.rs
pub use crate::common::{BoundingBox, CollectionStats};
pub use crate::config::{AccessToken, MapView, ViewerConfig};
pub use crate::error::{PropMapError, Result};
pub use crate::normalize::{normalize, normalize_str};
pub use crate::payload::PayloadShape;
pub use crate::project::{project, project_with, DefaultPolicy, Feature, FeatureCollection};
pub use crate::record::{FieldValue, PropertyRecord};
pub use crate::traits::{MapSurface, Message, Scene};
