// crates/propmap-core/src/display.rs

//! Layer paint, popup markup and cursor rules shared by every map surface.

use crate::project::DisplayAttributes;
use maud::html;
use serde::Serialize;
use serde_json::{json, Value};

pub const SOURCE_ID: &str = "properties";
pub const LAYER_ID: &str = "property-points";

/// Paint settings for the property circle layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CircleLayer {
    pub id: &'static str,
    pub source: &'static str,
    pub radius: f64,
    pub color: &'static str,
    pub opacity: f64,
    pub stroke_width: f64,
    pub stroke_color: &'static str,
}

impl Default for CircleLayer {
    fn default() -> Self {
        Self {
            id: LAYER_ID,
            source: SOURCE_ID,
            radius: 6.0,
            color: "#ff6b6b",
            opacity: 0.6,
            stroke_width: 2.0,
            stroke_color: "#fff",
        }
    }
}

impl CircleLayer {
    /// Layer object as passed to `map.addLayer`.
    pub fn to_style_json(&self) -> Value {
        json!({
            "id": self.id,
            "type": "circle",
            "source": self.source,
            "paint": {
                "circle-radius": self.radius,
                "circle-color": self.color,
                "circle-opacity": self.opacity,
                "circle-stroke-width": self.stroke_width,
                "circle-stroke-color": self.stroke_color,
            }
        })
    }
}

/// Cursor affordance over the layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Pointer,
    Default,
}

impl Cursor {
    pub fn on_enter() -> Self {
        Cursor::Pointer
    }

    pub fn on_leave() -> Self {
        Cursor::Default
    }

    /// CSS `cursor` value.
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Pointer => "pointer",
            Cursor::Default => "",
        }
    }
}

/// Picks the item a click refers to: the first one under the pointer.
///
/// Generic so the browser can apply it to the raw feature objects Mapbox
/// hands to the click handler.
pub fn clicked<T>(under_pointer: &[T]) -> Option<&T> {
    under_pointer.first()
}

/// Popup body for one feature.
pub fn popup_html(attrs: &DisplayAttributes) -> String {
    html! {
        h3 { (display_text(&attrs.title)) }
        p { strong { "Price:" } " $" (display_text(&attrs.price)) }
        p { strong { "Bedrooms:" } " " (display_text(&attrs.bedrooms)) }
        p { strong { "Bathrooms:" } " " (display_text(&attrs.bathrooms)) }
    }
    .into_string()
}

/// Renders an attribute the way a template literal would: strings as-is,
/// everything else in its JSON form. Escaping is left to the markup.
pub fn display_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(title: Value, price: Value) -> DisplayAttributes {
        DisplayAttributes {
            title,
            price,
            bedrooms: json!(3),
            bathrooms: json!(2.5),
        }
    }

    #[test]
    fn popup_shows_attributes_verbatim() {
        let html = popup_html(&attrs(json!("1 Main St"), json!(450000)));
        assert_eq!(
            html,
            "<h3>1 Main St</h3>\
             <p><strong>Price:</strong> $450000</p>\
             <p><strong>Bedrooms:</strong> 3</p>\
             <p><strong>Bathrooms:</strong> 2.5</p>"
        );
    }

    #[test]
    fn popup_keeps_defaults() {
        let html = popup_html(&attrs(json!("Property"), json!("N/A")));
        assert!(html.contains("<h3>Property</h3>"));
        assert!(html.contains("$N/A"));
    }

    #[test]
    fn popup_escapes_markup() {
        let html = popup_html(&attrs(json!("<b>A&B</b>"), json!("N/A")));
        assert!(html.contains("&lt;b&gt;A&amp;B&lt;/b&gt;"));
    }

    #[test]
    fn layer_paint_matches_viewer() {
        let style = CircleLayer::default().to_style_json();
        assert_eq!(style["id"], "property-points");
        assert_eq!(style["source"], "properties");
        assert_eq!(style["paint"]["circle-radius"], 6.0);
        assert_eq!(style["paint"]["circle-opacity"], 0.6);
        assert_eq!(style["paint"]["circle-stroke-color"], "#fff");
    }

    #[test]
    fn cursor_toggles() {
        assert_eq!(Cursor::on_enter().css(), "pointer");
        assert_eq!(Cursor::on_leave().css(), "");
    }

    #[test]
    fn click_picks_first_feature() {
        use crate::project::{Feature, Point};
        let feature = |title: &str| Feature {
            geometry: Point {
                coordinates: [Some(-77.0), Some(38.9)],
            },
            properties: attrs(json!(title), json!("N/A")),
        };
        let stacked = [feature("top"), feature("below")];
        assert_eq!(clicked(&stacked).unwrap().properties.title, json!("top"));
        assert!(clicked::<Feature>(&[]).is_none());
    }
}
