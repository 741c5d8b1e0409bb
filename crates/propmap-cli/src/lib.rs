//! propmap-cli
//! ===========
//!
//! Command-line companion to the `propmap` map viewer.
//!
//! This crate primarily provides a binary (`propmap`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! propmap inspect
//! propmap inspect www/output/aggregated_data.json
//! propmap features -i output/aggregated_data.json --pretty > properties.geojson
//! propmap stats
//! MAPBOX_ACCESS_TOKEN=pk.... propmap check-config
//! ```
//!
//! For programmatic access, use the [`propmap-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.
