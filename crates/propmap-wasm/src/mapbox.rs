// crates/propmap-wasm/src/mapbox.rs

//! Mapbox GL JS bindings and the browser [`MapSurface`].

use std::cell::Cell;
use std::rc::Rc;

use js_sys::{Array, Object, Reflect};
use propmap_core::display::{self, Cursor};
use propmap_core::session;
use propmap_core::traits::{MapSurface, Message, Scene};
use propmap_core::{AccessToken, DisplayAttributes, FeatureCollection, MapView, PropMapError};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Map)]
    pub type MapboxMap;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Map", catch)]
    fn new(options: &JsValue) -> Result<MapboxMap, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addSource)]
    fn add_source(this: &MapboxMap, id: &str, source: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addLayer)]
    fn add_layer(this: &MapboxMap, layer: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = on)]
    fn on(this: &MapboxMap, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = on)]
    fn on_layer(this: &MapboxMap, event: &str, layer_id: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = getCanvas)]
    fn get_canvas(this: &MapboxMap) -> web_sys::HtmlElement;

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Popup)]
    type Popup;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Popup")]
    fn new_popup() -> Popup;

    #[wasm_bindgen(method, js_name = setLngLat)]
    fn set_lng_lat(this: &Popup, lng_lat: &JsValue) -> Popup;

    #[wasm_bindgen(method, js_name = setHTML)]
    fn set_html(this: &Popup, html: &str) -> Popup;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Popup, map: &MapboxMap) -> Popup;
}

/// Serializes with plain JS objects (not `Map`s) and `null` for `None`.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn fault(context: &str, err: JsValue) -> PropMapError {
    let detail = err
        .as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"));
    PropMapError::RenderingFault(format!("{context}: {detail}"))
}

#[derive(Serialize)]
struct GeoJsonSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    data: &'a FeatureCollection,
}

/// Renders into the element with id `container`.
#[derive(Clone, Debug)]
pub struct MapboxSurface {
    container: String,
}

impl MapboxSurface {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
        }
    }

    /// Replaces the container content with the message for `err`.
    pub fn show_fault(&mut self, err: &PropMapError) {
        session::report_failure(self, err);
    }

    fn element(&self) -> Option<web_sys::Element> {
        web_sys::window()?
            .document()?
            .get_element_by_id(&self.container)
    }
}

impl MapSurface for MapboxSurface {
    fn show_message(&mut self, message: &Message) {
        match self.element() {
            Some(el) => el.set_inner_html(&message.to_html()),
            None => web_sys::console::error_1(&message.to_html().into()),
        }
    }

    fn mount(
        &mut self,
        token: &AccessToken,
        view: &MapView,
        scene: Scene,
    ) -> propmap_core::Result<()> {
        let options = serde_json::json!({
            "accessToken": token.as_str(),
            "container": self.container,
            "style": view.style,
            "center": view.center,
            "zoom": view.zoom,
        });
        let options = to_js(&options).map_err(|e| fault("map options", e))?;
        let map = MapboxMap::new(&options).map_err(|e| fault("creating map", e))?;

        let source = GeoJsonSource {
            kind: "geojson",
            data: &scene.features,
        };
        let source = to_js(&source).map_err(|e| fault("feature source", e))?;
        let layer = to_js(&scene.layer.to_style_json()).map_err(|e| fault("circle layer", e))?;

        // The map and its handlers live for the rest of the page.
        let map = Rc::new(map);
        // Set once the layer is installed; later map errors (tiles etc.) only log.
        let ready = Rc::new(Cell::new(false));

        let on_load = {
            let map = map.clone();
            let ready = ready.clone();
            let mut surface = self.clone();
            Closure::<dyn FnMut()>::new(move || {
                log::info!("map loaded");
                match install_layer(&map, &source, &layer) {
                    Ok(()) => ready.set(true),
                    Err(e) => surface.show_fault(&e),
                }
            })
        };
        map.on("load", on_load.as_ref().unchecked_ref());
        on_load.forget();

        let on_error = {
            let mut surface = self.clone();
            Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
                let cause = Reflect::get(&event, &"error".into())
                    .ok()
                    .filter(|e| !e.is_undefined())
                    .unwrap_or(event);
                let err = fault("map error", cause);
                if ready.get() {
                    log::error!("{err}");
                } else {
                    surface.show_fault(&err);
                }
            })
        };
        map.on("error", on_error.as_ref().unchecked_ref());
        on_error.forget();
        Ok(())
    }
}

fn install_layer(
    map: &Rc<MapboxMap>,
    source: &JsValue,
    layer: &JsValue,
) -> propmap_core::Result<()> {
    map.add_source(display::SOURCE_ID, source)
        .map_err(|e| fault("adding source", e))?;
    map.add_layer(layer).map_err(|e| fault("adding layer", e))?;

    let on_click = {
        let map = map.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| show_popup(&map, &event))
    };
    map.on_layer("click", display::LAYER_ID, on_click.as_ref().unchecked_ref());
    on_click.forget();

    for (event, cursor) in [
        ("mouseenter", Cursor::on_enter()),
        ("mouseleave", Cursor::on_leave()),
    ] {
        let map_for_cursor = map.clone();
        let handler = Closure::<dyn FnMut()>::new(move || {
            let canvas = map_for_cursor.get_canvas();
            if let Err(e) = canvas.style().set_property("cursor", cursor.css()) {
                web_sys::console::error_1(&e);
            }
        });
        map.on_layer(event, display::LAYER_ID, handler.as_ref().unchecked_ref());
        handler.forget();
    }

    log::info!("map setup complete");
    Ok(())
}

/// Click handler: popup for the first feature under the pointer.
fn show_popup(map: &MapboxMap, event: &JsValue) {
    let Some(attrs) = clicked_attributes(event) else {
        return;
    };
    let lng_lat = Reflect::get(event, &"lngLat".into()).unwrap_or(JsValue::UNDEFINED);
    Popup::new_popup()
        .set_lng_lat(&lng_lat)
        .set_html(&display::popup_html(&attrs))
        .add_to(map);
}

/// Display attributes of the feature a click event selects, if any.
pub fn clicked_attributes(event: &JsValue) -> Option<DisplayAttributes> {
    let features: Array = Reflect::get(event, &"features".into()).ok()?.dyn_into().ok()?;
    let under_pointer = features.to_vec();
    let picked = display::clicked(&under_pointer)?;
    let props: Object = Reflect::get(picked, &"properties".into()).ok()?.dyn_into().ok()?;
    serde_wasm_bindgen::from_value(props.into()).ok()
}
