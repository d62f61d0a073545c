//! Hero carousel DOM glue
//!
//! Applies [`HeroFrame`]s from the core engine to the injected view's
//! `header` element and wires the arrow controls and autoplay interval.
//! Re-initialized after every injection; the previous interval is always
//! cleared first, so re-entering a view never stacks autoplay timers.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use rumbo_router::{HeroEngine, HeroFrame};

use crate::SharedShell;

/// Fixed header height while a hero image is applied
const HERO_HEIGHT: &str = "500px";

/// Caption/text box inside the header
const TEXT_SELECTOR: &str = ".hero-text";

/// Class hiding the text box (inline `display` is set as a fallback)
const TEXT_HIDDEN_CLASS: &str = "is-hidden";

const ARROW_LEFT_SELECTOR: &str = ".hero-arrow-left";
const ARROW_RIGHT_SELECTOR: &str = ".hero-arrow-right";

#[derive(Clone, Copy)]
enum Direction {
    Back,
    Forward,
}

/// (Re)initialize the carousel against freshly injected content.
///
/// No-op when no hero images are configured or the content has no `header`
/// element. The previous view's interval is cleared unconditionally.
pub(crate) fn init_hero(state: &SharedShell, root: &Element) {
    let Some(window) = crate::window() else { return };

    // Clear the previous view's autoplay before anything else
    {
        let mut shell = state.borrow_mut();
        if let Some(handle) = shell.hero_interval.take() {
            window.clear_interval_with_handle(handle);
        }
        shell.hero_tick = None;
        shell.hero = None;
    }

    let config = state.borrow().hero_config.clone();
    if !config.is_enabled() {
        return;
    }
    let Ok(Some(_header)) = root.query_selector("header") else {
        return;
    };

    state.borrow_mut().hero = Some(HeroEngine::new(config.clone()));
    apply_current(state);

    bind_arrow(state, root, ARROW_LEFT_SELECTOR, Direction::Back);
    bind_arrow(state, root, ARROW_RIGHT_SELECTOR, Direction::Forward);

    if let Some(ms) = config.autoplay_interval() {
        let st = state.clone();
        let tick = Closure::<dyn FnMut()>::new(move || {
            step(&st, Direction::Forward);
        });
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            ms as i32,
        ) {
            Ok(handle) => {
                let mut shell = state.borrow_mut();
                shell.hero_interval = Some(handle);
                shell.hero_tick = Some(tick);
            }
            Err(err) => crate::error(&format!(
                "[hero] failed to start autoplay: {}",
                crate::js_detail(&err)
            )),
        }
    }
}

fn bind_arrow(state: &SharedShell, root: &Element, selector: &str, direction: Direction) {
    let Ok(Some(arrow)) = root.query_selector(selector) else {
        return;
    };
    let st = state.clone();
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        step(&st, direction);
    });
    let _ = arrow.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    state.borrow_mut().bound.push(closure);
}

/// Move the index one step and re-render
fn step(state: &SharedShell, direction: Direction) {
    {
        let mut shell = state.borrow_mut();
        if let Some(hero) = shell.hero.as_mut() {
            match direction {
                Direction::Back => hero.retreat(),
                Direction::Forward => hero.advance(),
            };
        }
    }
    apply_current(state);
}

/// Render the engine's current frame into the header
fn apply_current(state: &SharedShell) {
    let frame = state.borrow().hero.as_ref().and_then(HeroEngine::frame);
    let Some(frame) = frame else { return };
    let Some(container) = crate::container() else { return };
    let Ok(Some(header)) = container.query_selector("header") else {
        return;
    };
    let Ok(header) = header.dyn_into::<HtmlElement>() else {
        return;
    };

    let style = header.style();
    let _ = style.set_property("background-image", &format!("url('{}')", frame.src));
    let _ = style.set_property("background-size", "cover");
    let _ = style.set_property("background-position", "center");
    let _ = style.set_property("height", HERO_HEIGHT);

    apply_text_visibility(&container, &frame);
}

fn apply_text_visibility(container: &Element, frame: &HeroFrame) {
    let Ok(Some(text_box)) = container.query_selector(TEXT_SELECTOR) else {
        return;
    };
    let _ = text_box
        .class_list()
        .toggle_with_force(TEXT_HIDDEN_CLASS, !frame.show_text);
    if let Some(text_box) = text_box.dyn_ref::<HtmlElement>() {
        let style = text_box.style();
        if frame.show_text {
            let _ = style.remove_property("display");
        } else {
            let _ = style.set_property("display", "none");
        }
    }
}
