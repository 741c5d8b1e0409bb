//! propmap-wasm — WebAssembly viewer for property payloads
//!
//! Fetches the payload written by the analytics job, runs it through
//! `propmap-core`, and draws one circle per property with Mapbox GL JS.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { load_and_render_map } from './pkg/propmap_wasm.js';
//!
//! async function run() {
//!   await init();
//!   // MAPBOX_ACCESS_TOKEN comes from config.js (generated from .env)
//!   const token = typeof MAPBOX_ACCESS_TOKEN === 'undefined' ? undefined : MAPBOX_ACCESS_TOKEN;
//!   const count = await load_and_render_map('vis', token);
//!   console.log('Properties loaded:', count);
//! }
//! run();
//! ```
//!
//! Notes
//! -----
//! - `mapboxgl` must be loaded as a global before calling `load_and_render_map`.
//! - A missing or placeholder token never creates a map; the container shows
//!   setup instructions instead.
//! - Any other failure replaces the container contents with the error text.
mod mapbox;

use propmap_core::config::DEFAULT_DATA_PATH;
use propmap_core::display;
use propmap_core::{normalize_str, project, AccessToken, DisplayAttributes, PropMapError};
use propmap_core::session;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

pub use mapbox::{clicked_attributes, MapboxSurface};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    init_logger();
    web_sys::console::log_1(&"propmap WASM initialized".into());
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsError::new(&e.to_string()).into()
}

/* --------------------------------------------------------------------------
   Load cycle
-------------------------------------------------------------------------- */

/// Runs one full load cycle into the element with id `container`.
///
/// Resolves to the number of features rendered. On failure the container
/// already shows the message and the promise rejects with the same text.
#[wasm_bindgen]
pub async fn load_and_render_map(
    container: String,
    access_token: Option<String>,
    data_url: Option<String>,
) -> Result<usize, JsValue> {
    let mut surface = MapboxSurface::new(container);

    // Checked before any network or rendering work.
    let config = session::begin(&mut surface, access_token.as_deref()).map_err(js_error)?;

    let url = data_url.unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
    let payload = fetch_text(&url).await;

    session::finish(&mut surface, &config, payload)
        .map(|stats| stats.features)
        .map_err(js_error)
}

async fn fetch_text(url: &str) -> propmap_core::Result<String> {
    let fetch_fault = |e: JsValue| PropMapError::RenderingFault(format!("fetching {url}: {e:?}"));

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    let request = Request::new_with_str_and_init(url, &opts).map_err(fetch_fault)?;

    let window = web_sys::window()
        .ok_or_else(|| PropMapError::RenderingFault("no window object".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(fetch_fault)?;
    let resp: Response = resp_value.dyn_into().map_err(fetch_fault)?;
    if !resp.ok() {
        return Err(PropMapError::NotFound(format!(
            "{url} returned HTTP {}",
            resp.status()
        )));
    }

    let text = JsFuture::from(resp.text().map_err(fetch_fault)?)
        .await
        .map_err(fetch_fault)?;
    text.as_string()
        .ok_or_else(|| PropMapError::MalformedPayload(format!("{url} did not return text")))
}

/* --------------------------------------------------------------------------
   Pipeline helpers (no map required)
-------------------------------------------------------------------------- */

/// Normalizes and projects payload text into a GeoJSON FeatureCollection.
#[wasm_bindgen]
pub fn payload_to_features(text: &str) -> Result<JsValue, JsValue> {
    let records = normalize_str(text).map_err(js_error)?;
    mapbox::to_js(&project(&records))
}

/// Number of records the payload normalizes to.
#[wasm_bindgen]
pub fn count_records(text: &str) -> Result<usize, JsValue> {
    normalize_str(text).map(|r| r.len()).map_err(js_error)
}

/// Popup markup for a feature's `properties` object.
#[wasm_bindgen]
pub fn popup_html(properties: JsValue) -> Result<String, JsValue> {
    let attrs: DisplayAttributes = serde_wasm_bindgen::from_value(properties)?;
    Ok(display::popup_html(&attrs))
}

/// Checks a token the same way the load cycle does.
#[wasm_bindgen]
pub fn is_token_configured(access_token: Option<String>) -> bool {
    AccessToken::from_config(access_token.as_deref()).is_ok()
}
