//! Browser entry points for lazy video placeholders.
//!
//! Loading the module sets up every `.video-lazy-container` once the page is
//! ready and publishes `window.VideoLazyLoad = { init, setupContainer }` for
//! containers inserted later.

pub mod console;
pub mod dom;
pub mod spawn;

use lazyvid_core::{ConfigOverrides, LazyVideoLoader, LoaderConfig};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Window};

pub use dom::{BrowserContainer, BrowserDocument};
pub use spawn::BrowserSpawner;

/// Name of the global object exposing the JS API.
pub const GLOBAL_NAME: &str = "VideoLazyLoad";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console::init(console::DEFAULT_FILTER);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    publish_global(&window)?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(|| {
            if let Err(e) = init(JsValue::UNDEFINED) {
                warn!("lazy video initialization failed: {:?}", JsValue::from(e));
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        init(JsValue::UNDEFINED)?;
    }
    Ok(())
}

/// Scan the document and set up every container found.
///
/// `options` is an optional object of config overrides. Returns how many
/// containers were set up; skipped ones are reported on the console.
#[wasm_bindgen]
pub fn init(options: JsValue) -> Result<u32, JsError> {
    let loader = loader_from(options)?;
    let report = loader.initialize(&BrowserDocument::current()?)?;
    Ok(report.initialized as u32)
}

/// Set up one element directly, bypassing the document scan.
#[wasm_bindgen(js_name = setupContainer)]
pub fn setup_container(element: Element, options: JsValue) -> Result<(), JsError> {
    let loader = loader_from(options)?;
    loader.setup_container(&BrowserContainer::new(element))?;
    Ok(())
}

fn loader_from(options: JsValue) -> Result<LazyVideoLoader<BrowserSpawner>, JsError> {
    let config = if options.is_undefined() || options.is_null() {
        LoaderConfig::default()
    } else {
        let overrides: ConfigOverrides = serde_wasm_bindgen::from_value(options)?;
        LoaderConfig::with_overrides(overrides)?
    };
    Ok(LazyVideoLoader::new(config, BrowserSpawner))
}

fn publish_global(window: &Window) -> Result<(), JsValue> {
    let api = js_sys::Object::new();

    let init_fn = Closure::<dyn Fn(JsValue) -> Result<u32, JsValue>>::new(|options| {
        init(options).map_err(JsValue::from)
    });
    js_sys::Reflect::set(&api, &"init".into(), init_fn.as_ref())?;
    init_fn.forget();

    let setup_fn = Closure::<dyn Fn(Element, JsValue) -> Result<(), JsValue>>::new(
        |element, options| setup_container(element, options).map_err(JsValue::from),
    );
    js_sys::Reflect::set(&api, &"setupContainer".into(), setup_fn.as_ref())?;
    setup_fn.forget();

    js_sys::Reflect::set(window, &GLOBAL_NAME.into(), &api)?;
    Ok(())
}
