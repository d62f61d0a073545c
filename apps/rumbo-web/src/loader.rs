//! View loading pipeline
//!
//! Fetch, parse, scrub, inject, then rebind, strictly sequential within one
//! load. Overlapping loads are resolved by generation: each run takes a
//! fresh generation up front, and a run that has been superseded discards
//! its result (success or failure) without touching the DOM.

use wasm_bindgen::JsCast;
use web_sys::{Document, DomParser, Element, SupportedType, Window};

use rumbo_router::loader::{error_markup, FETCH_TIMEOUT_MS, MODAL_SCRUB_IDS};
use rumbo_router::{LoadGeneration, RouteError, RouteResult, ViewDescriptor};

use crate::{fetch, hero, js_detail, nav, overlay, styles, SharedShell, CONTAINER_ID};

/// Load one view end to end.
///
/// Whatever happens (success, failure, or supersession), the safety
/// deadline is disarmed, this run's indicator acquire is released, and the
/// redundant secondary hide is scheduled.
pub(crate) async fn load_view(state: SharedShell, descriptor: ViewDescriptor) {
    let Some(window) = crate::window() else { return };
    let Some(document) = window.document() else { return };

    let generation = state.borrow_mut().loads.begin();
    overlay::acquire(&state);
    overlay::arm_safety(&state);

    let outcome = run(&state, &window, &document, descriptor, generation).await;

    if let Err(err) = outcome {
        crate::error(&format!("[loader] view load failed: {}", err));
        if state.borrow().loads.is_current(generation) {
            if let Some(container) = document.get_element_by_id(CONTAINER_ID) {
                container.set_inner_html(&error_markup(&err));
            }
        }
    }

    overlay::disarm_safety(&state);
    overlay::release(&state);
    overlay::schedule_redundant_hide(&state);
}

async fn run(
    state: &SharedShell,
    window: &Window,
    document: &Document,
    descriptor: ViewDescriptor,
    generation: LoadGeneration,
) -> RouteResult<()> {
    let text = fetch::fetch_fragment(window, descriptor.url, FETCH_TIMEOUT_MS).await?;

    let parsed = parse_fragment(&text)?;
    scrub_modals(&parsed);

    if !state.borrow().loads.is_current(generation) {
        crate::log("[loader] superseded by a newer navigation, discarding result");
        return Ok(());
    }

    let container = document
        .get_element_by_id(CONTAINER_ID)
        .ok_or_else(|| RouteError::Dom {
            detail: format!("container #{} not found", CONTAINER_ID),
        })?;

    let markup = parsed
        .body()
        .map(|body| body.inner_html())
        .unwrap_or_else(|| text.clone());
    container.set_inner_html(&markup);

    styles::ensure_styles(document, descriptor.css);

    // The old content's listeners died with it; rebind into the new subtree
    state.borrow_mut().bound.clear();
    nav::bind_within(state, &container);
    hero::init_hero(state, &container);

    window.scroll_to_with_x_and_y(0.0, 0.0);
    Ok(())
}

fn parse_fragment(text: &str) -> RouteResult<Document> {
    let parser = DomParser::new().map_err(|e| RouteError::Dom {
        detail: js_detail(&e),
    })?;
    parser
        .parse_from_string(text, SupportedType::TextHtml)
        .map_err(|e| RouteError::Parse {
            detail: js_detail(&e),
        })
}

/// Fragments must not reintroduce modals already present in the shell page;
/// strip every match for the fixed id set. Best-effort.
fn scrub_modals(parsed: &Document) {
    for id in MODAL_SCRUB_IDS {
        let Ok(matches) = parsed.query_selector_all(&format!("#{}", id)) else {
            continue;
        };
        for i in 0..matches.length() {
            if let Some(node) = matches.item(i) {
                if let Ok(element) = node.dyn_into::<Element>() {
                    element.remove();
                }
            }
        }
    }
}
