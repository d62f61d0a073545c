//! Browser shell for the Rumbo SPA router
//!
//! This crate owns every `web-sys` touchpoint of the shell: fetching view
//! fragments, injecting them into the container, swapping per-view
//! stylesheets, the busy overlay, and the hero carousel's DOM side. All
//! decisions (which view a fragment resolves to, when the overlay may hide,
//! which hero frame to render) are made by the pure state machines in
//! `rumbo-router`; this crate applies them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       Router (wasm)                     │
//! │  hashchange ──► route() ──► loader::load_view()         │
//! │                               │                         │
//! │        fetch ─ parse ─ scrub ─ inject ─ styles ─ rebind │
//! │                               │                         │
//! │  overlay ◄── IndicatorState   └──► nav / hero binding   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`Router`]: `wasm-bindgen` entry point; construct with a JSON config
//!   and call [`Router::init`] once at page load
//! - [`loader`]: the view-loading pipeline
//! - [`overlay`]: busy-overlay phases applied to `#route-loader`
//! - [`nav`] / [`hero`] / [`styles`]: post-injection rebinding

mod fetch;
mod hero;
mod loader;
mod nav;
mod overlay;
mod styles;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, MutationObserver, MutationObserverInit, Window};

use rumbo_router::{
    HeroConfig, HeroEngine, IndicatorState, LoadTracker, RouteTable, RouterConfig, ViewKey,
};

/// Id of the element view content is injected into
pub(crate) const CONTAINER_ID: &str = "app";

pub(crate) fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub(crate) fn error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

/// Millisecond clock fed into the core state machines
pub(crate) fn now() -> f64 {
    js_sys::Date::now()
}

pub(crate) fn window() -> Option<Window> {
    web_sys::window()
}

pub(crate) fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

pub(crate) fn container() -> Option<Element> {
    document().and_then(|d| d.get_element_by_id(CONTAINER_ID))
}

/// Best-effort description of a JS error value
pub(crate) fn js_detail(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Shared mutable state behind the wasm boundary.
///
/// Single-threaded: everything runs on the browser main thread, so a
/// `Rc<RefCell<_>>` is the whole concurrency story. Borrows are never held
/// across an await point.
pub(crate) struct Shell {
    pub(crate) routes: RouteTable,
    pub(crate) hero_config: HeroConfig,
    pub(crate) indicator: IndicatorState,
    pub(crate) loads: LoadTracker,
    /// Hero engine for the currently injected content, if any
    pub(crate) hero: Option<HeroEngine>,
    /// Autoplay interval handle; cleared before every hero re-init
    pub(crate) hero_interval: Option<i32>,
    /// Autoplay callback, kept alive while its interval is registered
    pub(crate) hero_tick: Option<Closure<dyn FnMut()>>,
    pub(crate) grace_timer: Option<i32>,
    pub(crate) safety_timer: Option<i32>,
    pub(crate) redundant_timer: Option<i32>,
    /// Listeners bound into the injected content; replaced wholesale on
    /// every injection, after the old elements are gone
    pub(crate) bound: Vec<Closure<dyn FnMut(web_sys::Event)>>,
}

impl Shell {
    fn new(config: RouterConfig) -> Self {
        Self {
            routes: RouteTable::standard(),
            hero_config: config.hero,
            indicator: IndicatorState::new(),
            loads: LoadTracker::new(),
            hero: None,
            hero_interval: None,
            hero_tick: None,
            grace_timer: None,
            safety_timer: None,
            redundant_timer: None,
            bound: Vec::new(),
        }
    }
}

pub(crate) type SharedShell = Rc<RefCell<Shell>>;

/// The fragment-hash router.
///
/// Construct once with a JSON configuration object and call [`Router::init`]
/// at page load:
///
/// ```js
/// import init, { Router } from 'rumbo-web';
///
/// await init();
/// const router = new Router({
///     hero: { images: ['banner.png', 'img/local.jpg'], autoplayMs: 6000 },
/// });
/// router.init();
/// ```
#[wasm_bindgen]
pub struct Router {
    state: SharedShell,
}

#[wasm_bindgen]
impl Router {
    /// Create a router from a configuration object (may be `undefined`)
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Router, JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let config = parse_config(&config)?;
        Ok(Router {
            state: Rc::new(RefCell::new(Shell::new(config))),
        })
    }

    /// Wire up the router: bind document-wide navigation, subscribe to
    /// `hashchange`, install the last-resort overlay hooks, and resolve the
    /// page's starting URL. Intended to run once at page load.
    pub fn init(&self) -> Result<(), JsValue> {
        let window = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        log("[router] initializing");

        nav::bind_document(&self.state, &document);

        let st = self.state.clone();
        let on_hash = Closure::<dyn FnMut()>::new(move || route(&st));
        window.add_event_listener_with_callback("hashchange", on_hash.as_ref().unchecked_ref())?;
        on_hash.forget();

        // Uncaught errors and rejections anywhere on the page must never
        // leave the overlay stuck visible.
        for event in ["error", "unhandledrejection"] {
            let st = self.state.clone();
            let hook = Closure::<dyn FnMut()>::new(move || overlay::force_hide(&st));
            window.add_event_listener_with_callback(event, hook.as_ref().unchecked_ref())?;
            hook.forget();
        }

        // Any content swap in the container (child-list only, not subtree)
        // also hides the overlay, covering swaps outside the loader's own
        // control flow.
        if let Some(container) = document.get_element_by_id(CONTAINER_ID) {
            let st = self.state.clone();
            let on_mutation = Closure::<dyn FnMut()>::new(move || overlay::force_hide(&st));
            let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
            let options = MutationObserverInit::new();
            options.set_child_list(true);
            observer.observe_with_options(&container, &options)?;
            on_mutation.forget();
        }

        route(&self.state);
        Ok(())
    }
}

/// Resolve the current fragment and drive the loader
pub(crate) fn route(state: &SharedShell) {
    let Some(window) = window() else { return };
    let Some(document) = window.document() else { return };

    let hash = window.location().hash().unwrap_or_default();
    let key = ViewKey::resolve(&hash);

    // Styling/debugging hook
    if let Some(root) = document.document_element() {
        let _ = root.set_attribute("data-route", key.id());
    }

    let descriptor = state.borrow().routes.get(key).copied();
    match descriptor {
        Some(descriptor) => {
            log(&format!(
                "[router] view '{}' <- '{}'",
                key.id(),
                if hash.is_empty() { "(empty)" } else { &hash }
            ));
            let st = state.clone();
            spawn_local(async move {
                loader::load_view(st, descriptor).await;
            });
        }
        None => overlay::force_hide(state),
    }
}

fn parse_config(value: &JsValue) -> Result<RouterConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(RouterConfig::default());
    }
    let json = js_sys::JSON::stringify(value)?;
    serde_json::from_str(&String::from(json))
        .map_err(|err| JsValue::from_str(&format!("invalid router configuration: {}", err)))
}
