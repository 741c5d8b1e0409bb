// crates/propmap-core/src/config.rs

//! Viewer configuration: the map access token and the initial camera.

use crate::error::{PropMapError, Result};
use maud::html;
use serde::{Deserialize, Serialize};

/// Environment variable the token is read from.
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Value shipped in `.env.example`; treated the same as no token at all.
pub const ACCESS_TOKEN_PLACEHOLDER: &str = "YOUR_MAPBOX_ACCESS_TOKEN_HERE";

/// Default payload location, relative to the served directory.
pub const DEFAULT_DATA_PATH: &str = "output/aggregated_data.json";

/// Setup steps shown when the token is not configured.
pub const SETUP_STEPS: [&str; 3] = [
    "Copy wasm_viewer/.env.example to wasm_viewer/.env",
    "Add your Mapbox token to .env file",
    "Run ./setup-env.sh or setup-env.bat to generate config.js",
];

pub const SETUP_HEADLINE: &str = "Error: Please set your Mapbox token in .env file";

/// Markup shown in place of the map when the token is not configured.
pub fn setup_instructions_html() -> String {
    html! {
        h2 { (SETUP_HEADLINE) }
        @for (i, step) in SETUP_STEPS.iter().enumerate() {
            p { (i + 1) ". " (step) }
        }
    }
    .into_string()
}

/// A token that passed validation. Can only be built through
/// [`AccessToken::from_config`].
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Validates a raw configuration value.
    ///
    /// Absent, blank and placeholder values yield
    /// [`PropMapError::MissingConfiguration`].
    pub fn from_config(raw: Option<&str>) -> Result<Self> {
        match raw.map(str::trim) {
            None | Some("") | Some(ACCESS_TOKEN_PLACEHOLDER) => {
                Err(PropMapError::MissingConfiguration)
            }
            Some(token) => Ok(Self(token.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First few characters, for logs.
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(6).collect();
        format!("{prefix}…")
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AccessToken").field(&self.redacted()).finish()
    }
}

/// Initial camera and base style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub style: String,
    /// `[lon, lat]`
    pub center: [f64; 2],
    pub zoom: f64,
}

impl Default for MapView {
    fn default() -> Self {
        // Washington, DC
        Self {
            style: "mapbox://styles/mapbox/dark-v11".to_string(),
            center: [-77.0369, 38.9072],
            zoom: 11.0,
        }
    }
}

/// Everything the load cycle needs besides the payload itself.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub token: AccessToken,
    pub view: MapView,
    pub policy: crate::project::DefaultPolicy,
}

impl ViewerConfig {
    pub fn new(token: AccessToken) -> Self {
        Self {
            token,
            view: MapView::default(),
            policy: Default::default(),
        }
    }
}
