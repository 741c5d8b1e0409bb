// crates/propmap-core/src/traits.rs
use crate::config::{AccessToken, MapView};
use crate::display::CircleLayer;
use crate::error::Result;
use crate::project::FeatureCollection;
use maud::html;

/// Everything a surface needs to put the properties on screen in one go.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub features: FeatureCollection,
    pub layer: CircleLayer,
}

/// Text shown in place of the map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// Fixed setup instructions for an unconfigured token (HTML).
    SetupInstructions,
    /// A plain-text error.
    Error(String),
}

impl Message {
    /// Markup to place into the map container.
    pub fn to_html(&self) -> String {
        match self {
            Message::SetupInstructions => crate::config::setup_instructions_html(),
            Message::Error(text) => html! { pre { "Error: " (text) } }.into_string(),
        }
    }
}

/// The rendering side of the viewer.
///
/// The browser implementation drives Mapbox GL JS; tests use a recorder.
/// A surface is only ever asked to do one of the two things per load cycle:
/// show a message, or mount a scene.
pub trait MapSurface {
    /// Replaces the map container's contents with `message`.
    fn show_message(&mut self, message: &Message);

    /// Creates the map and, once it is ready, adds the source, the circle
    /// layer, and the click/hover handlers.
    fn mount(&mut self, token: &AccessToken, view: &MapView, scene: Scene) -> Result<()>;
}
