//! Internal navigation binding
//!
//! Elements carrying the `data-view` attribute are internal links: a click
//! is intercepted and translated into a fragment-hash change, which the
//! `hashchange` subscription turns into a route resolution. Injected markup
//! arrives with no handlers of its own, so binding is re-run against the
//! container after every injection.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList};

use crate::SharedShell;

/// Attribute naming the navigation target view
pub(crate) const NAV_ATTR: &str = "data-view";

/// Bind every `[data-view]` element in the page shell (called once at init)
pub(crate) fn bind_document(state: &SharedShell, document: &Document) {
    if let Ok(nodes) = document.query_selector_all(&format!("[{}]", NAV_ATTR)) {
        bind_nodes(state, &nodes);
    }
}

/// Bind every `[data-view]` element inside freshly injected content
pub(crate) fn bind_within(state: &SharedShell, root: &Element) {
    if let Ok(nodes) = root.query_selector_all(&format!("[{}]", NAV_ATTR)) {
        bind_nodes(state, &nodes);
    }
}

fn bind_nodes(state: &SharedShell, nodes: &NodeList) {
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else { continue };
        let Ok(element) = node.dyn_into::<Element>() else {
            continue;
        };
        let Some(target) = element.get_attribute(NAV_ATTR) else {
            continue;
        };

        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            if target.is_empty() {
                return;
            }
            if let Some(window) = crate::window() {
                let _ = window.location().set_hash(&format!("#/{}", target));
            }
        });
        let _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        state.borrow_mut().bound.push(closure);
    }
}
