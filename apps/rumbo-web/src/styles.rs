//! Per-view stylesheet synchronization
//!
//! The shell owns exactly the `<link>` elements tagged with the marker
//! attribute; the page's own stylesheets are never touched. The marked set
//! is fully replaced on every view change, so the links in `<head>` always
//! equal the active view's CSS list.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlLinkElement};

/// Marker attribute distinguishing view-owned links from the page shell's
pub(crate) const STYLE_MARK: &str = "data-view-style";

/// Replace the marked stylesheet set with `css`, in order.
///
/// Best-effort: DOM failures are logged and swallowed, so a stylesheet
/// problem never aborts the surrounding view load.
pub(crate) fn ensure_styles(document: &Document, css: &[&str]) {
    if let Err(err) = sync_links(document, css) {
        crate::error(&format!(
            "[styles] stylesheet swap failed: {}",
            crate::js_detail(&err)
        ));
    }
}

fn sync_links(document: &Document, css: &[&str]) -> Result<(), JsValue> {
    let marked = document.query_selector_all(&format!("link[{}=\"1\"]", STYLE_MARK))?;
    for i in 0..marked.length() {
        if let Some(node) = marked.item(i) {
            if let Ok(element) = node.dyn_into::<Element>() {
                element.remove();
            }
        }
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no head"))?;
    for href in css {
        let link: HtmlLinkElement = document
            .create_element("link")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("created element was not a link"))?;
        link.set_rel("stylesheet");
        link.set_href(href);
        link.set_attribute(STYLE_MARK, "1")?;
        head.append_child(&link)?;
    }
    Ok(())
}
