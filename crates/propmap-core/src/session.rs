// crates/propmap-core/src/session.rs

//! # Load Cycle
//!
//! One pass of the viewer: config check → fetch → normalize → project →
//! render. The fetch itself is the caller's (it is async in the browser);
//! this module owns the ordering and the all-or-nothing error display.
//!
//! ```
//! use propmap_core::session::{begin, finish};
//! use propmap_core::traits::{MapSurface, Message, Scene};
//! use propmap_core::{AccessToken, MapView, Result};
//!
//! #[derive(Default)]
//! struct Log(Vec<String>);
//!
//! impl MapSurface for Log {
//!     fn show_message(&mut self, m: &Message) { self.0.push(m.to_html()); }
//!     fn mount(&mut self, _: &AccessToken, _: &MapView, s: Scene) -> Result<()> {
//!         self.0.push(format!("{} features", s.features.len()));
//!         Ok(())
//!     }
//! }
//!
//! let mut surface = Log::default();
//! let config = begin(&mut surface, Some("pk.test")).unwrap();
//! let payload = r#"[{"latitude": 38.9, "longitude": -77.0}]"#.to_string();
//! finish(&mut surface, &config, Ok(payload)).unwrap();
//! assert_eq!(surface.0, vec!["1 features"]);
//! ```

use crate::common::CollectionStats;
use crate::config::{AccessToken, ViewerConfig};
use crate::display::CircleLayer;
use crate::error::{PropMapError, Result};
use crate::normalize::normalize_str;
use crate::project::{project_with, DefaultPolicy};
use crate::traits::{MapSurface, Message, Scene};
use log::{error, info, warn};

/// Validates the token before any fetch or rendering work.
///
/// On failure the surface shows the setup instructions and the cycle must
/// stop.
pub fn begin<S: MapSurface>(surface: &mut S, raw_token: Option<&str>) -> Result<ViewerConfig> {
    match AccessToken::from_config(raw_token) {
        Ok(token) => {
            info!("map token configured ({})", token.redacted());
            Ok(ViewerConfig::new(token))
        }
        Err(e) => {
            warn!("map token missing or placeholder; not initializing the map");
            surface.show_message(&Message::SetupInstructions);
            Err(e)
        }
    }
}

/// Normalizes and projects a payload without touching any surface.
pub fn build_scene(text: &str, policy: DefaultPolicy) -> Result<Scene> {
    let records = normalize_str(text)?;
    info!("properties loaded: {}", records.len());
    Ok(Scene {
        features: project_with(&records, policy),
        layer: CircleLayer::default(),
    })
}

/// Completes a cycle with the fetched payload (or the fetch error).
///
/// Either the whole scene is mounted or a single error message is shown;
/// the surface is never asked to mount after a pipeline failure.
pub fn finish<S: MapSurface>(
    surface: &mut S,
    config: &ViewerConfig,
    payload: Result<String>,
) -> Result<CollectionStats> {
    let outcome = payload
        .and_then(|text| build_scene(&text, config.policy))
        .and_then(|scene| {
            let stats = scene.features.stats();
            surface
                .mount(&config.token, &config.view, scene)
                .map(|()| stats)
        });

    match outcome {
        Ok(stats) => {
            info!(
                "map setup complete: {} features, {} placeable",
                stats.features, stats.placeable
            );
            Ok(stats)
        }
        Err(e) => {
            report_failure(surface, &e);
            Err(e)
        }
    }
}

/// Shows `err` in place of the map and logs it.
pub fn report_failure<S: MapSurface>(surface: &mut S, err: &PropMapError) {
    error!("error loading or rendering map: {err}");
    let message = match err {
        PropMapError::MissingConfiguration => Message::SetupInstructions,
        other => Message::Error(other.to_string()),
    };
    surface.show_message(&message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapView;

    #[derive(Default)]
    struct Recorder {
        messages: Vec<Message>,
        mounted: Vec<Scene>,
        fail_mount: bool,
    }

    impl MapSurface for Recorder {
        fn show_message(&mut self, message: &Message) {
            self.messages.push(message.clone());
        }

        fn mount(&mut self, _token: &AccessToken, _view: &MapView, scene: Scene) -> Result<()> {
            if self.fail_mount {
                return Err(PropMapError::RenderingFault("style failed to load".into()));
            }
            self.mounted.push(scene);
            Ok(())
        }
    }

    #[test]
    fn placeholder_token_halts_before_render() {
        let mut surface = Recorder::default();
        let err = begin(&mut surface, Some("YOUR_MAPBOX_ACCESS_TOKEN_HERE")).unwrap_err();
        assert!(matches!(err, PropMapError::MissingConfiguration));
        assert_eq!(surface.messages, vec![Message::SetupInstructions]);
        assert!(surface.mounted.is_empty());
    }

    #[test]
    fn mount_failure_is_shown() {
        let mut surface = Recorder {
            fail_mount: true,
            ..Default::default()
        };
        let config = begin(&mut surface, Some("pk.abc")).unwrap();
        let err = finish(&mut surface, &config, Ok("[]".into())).unwrap_err();
        assert!(matches!(err, PropMapError::RenderingFault(_)));
        assert_eq!(
            surface.messages,
            vec![Message::Error("Rendering fault: style failed to load".into())]
        );
    }

    #[test]
    fn fetch_error_is_shown() {
        let mut surface = Recorder::default();
        let config = begin(&mut surface, Some("pk.abc")).unwrap();
        let fetched = Err(PropMapError::NotFound("output/aggregated_data.json (404)".into()));
        assert!(finish(&mut surface, &config, fetched).is_err());
        assert_eq!(surface.messages.len(), 1);
        assert!(surface.mounted.is_empty());
    }
}
