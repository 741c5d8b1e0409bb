use propmap_core::PropMapError;
use serde_json::json;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use propmap_wasm::{
    clicked_attributes, count_records, is_token_configured, payload_to_features, popup_html,
    MapboxSurface,
};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn counts_columnar_records() {
    let n = count_records(r#"{"columns": {"latitude": [1, 2, 3], "longitude": [4, 5]}}"#).unwrap();
    assert_eq!(n, 2);
}

#[wasm_bindgen_test]
fn rejects_malformed_payload() {
    assert!(count_records("[1, 2").is_err());
    assert!(payload_to_features("\"just a string\"").is_err());
}

#[wasm_bindgen_test]
fn features_are_plain_objects() {
    let fc = payload_to_features(r#"[{"latitude": 38.9, "longitude": -77.0}]"#).unwrap();
    let kind = js_sys::Reflect::get(&fc, &JsValue::from_str("type")).unwrap();
    assert_eq!(kind.as_string().as_deref(), Some("FeatureCollection"));
}

#[wasm_bindgen_test]
fn popup_from_properties() {
    let props = js_sys::JSON::parse(
        r#"{"title": "Property", "price": "N/A", "bedrooms": 2, "bathrooms": 1}"#,
    )
    .unwrap();
    let html = popup_html(props).unwrap();
    assert!(html.contains("<h3>Property</h3>"));
    assert!(html.contains("$N/A"));
}

#[wasm_bindgen_test]
fn placeholder_token_is_unconfigured() {
    assert!(!is_token_configured(Some("YOUR_MAPBOX_ACCESS_TOKEN_HERE".into())));
    assert!(!is_token_configured(None));
    assert!(is_token_configured(Some("pk.abc".into())));
}

#[wasm_bindgen_test]
fn click_uses_top_feature_only() {
    let event = js_sys::JSON::parse(
        r#"{"features": [
            {"properties": {"title": "1 Main St", "price": 450000, "bedrooms": 3, "bathrooms": 2}},
            {"properties": {"title": "2 Main St", "price": 1, "bedrooms": 1, "bathrooms": 1}}
        ]}"#,
    )
    .unwrap();
    let attrs = clicked_attributes(&event).unwrap();
    assert_eq!(attrs.title, json!("1 Main St"));
    assert_eq!(attrs.price, json!(450000));

    let empty = js_sys::JSON::parse(r#"{"features": []}"#).unwrap();
    assert!(clicked_attributes(&empty).is_none());
}

#[wasm_bindgen_test]
fn setup_fault_replaces_container() {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document.create_element("div").unwrap();
    el.set_id("map-fault");
    el.set_inner_html("<canvas></canvas>");
    document.body().unwrap().append_child(&el).unwrap();

    let mut surface = MapboxSurface::new("map-fault");
    surface.show_fault(&PropMapError::RenderingFault("adding layer: boom".into()));

    assert_eq!(
        el.inner_html(),
        "<pre>Error: Rendering fault: adding layer: boom</pre>"
    );

    surface.show_fault(&PropMapError::MissingConfiguration);
    assert!(el.inner_html().starts_with("<h2>"));
}
