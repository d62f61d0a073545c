//! Busy-overlay DOM control
//!
//! Applies [`IndicatorPhase`] transitions to the `#route-loader` element.
//! All decisions live in the core [`IndicatorState`] machine; this module
//! feeds it the clock and one-shot timers and mirrors the resulting phase
//! into classes and inline styles. Every function is a no-op when the
//! overlay element is absent.

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use rumbo_router::indicator::{HIDE_GRACE_MS, SAFETY_HIDE_MS};
use rumbo_router::loader::REDUNDANT_HIDE_DELAY_MS;
use rumbo_router::IndicatorPhase;

use crate::SharedShell;

/// Id of the overlay element in the shell page
const LOADER_ID: &str = "route-loader";

/// Class applied while fading out
const CLASS_FADE: &str = "rf-hide";

/// Class applied once fully hidden
const CLASS_HIDDEN: &str = "rf-hidden";

/// One more show request: a view load has begun
pub(crate) fn acquire(state: &SharedShell) {
    let changed = state.borrow_mut().indicator.acquire();
    if changed {
        apply(IndicatorPhase::Showing);
    }
}

/// Drop one show request; starts the fade when the last one is released
pub(crate) fn release(state: &SharedShell) {
    let phase = {
        let mut shell = state.borrow_mut();
        let changed = shell.indicator.release(crate::now());
        changed.then(|| shell.indicator.phase())
    };
    if let Some(phase) = phase {
        apply(phase);
        schedule_grace(state);
    }
}

/// Hide unconditionally, no matter how many loads are outstanding. Used by
/// the mutation observer, the global error hooks, and the redundant hide.
pub(crate) fn force_hide(state: &SharedShell) {
    let phase = {
        let mut shell = state.borrow_mut();
        let changed = shell.indicator.force_hide(crate::now());
        changed.then(|| shell.indicator.phase())
    };
    if let Some(phase) = phase {
        apply(phase);
        schedule_grace(state);
    }
}

/// Arm the forced hide that rescues the overlay from a hung load
pub(crate) fn arm_safety(state: &SharedShell) {
    let Some(window) = crate::window() else { return };

    {
        let mut shell = state.borrow_mut();
        shell.indicator.arm_safety(crate::now());
        if let Some(handle) = shell.safety_timer.take() {
            window.clear_timeout_with_handle(handle);
        }
    }

    let st = state.clone();
    let on_deadline = Closure::once_into_js(move || {
        st.borrow_mut().safety_timer = None;
        tick(&st);
    });
    if let Ok(handle) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        on_deadline.unchecked_ref::<Function>(),
        SAFETY_HIDE_MS as i32,
    ) {
        state.borrow_mut().safety_timer = Some(handle);
    }
}

/// Disarm the safety deadline once its load has settled
pub(crate) fn disarm_safety(state: &SharedShell) {
    let Some(window) = crate::window() else { return };
    let mut shell = state.borrow_mut();
    shell.indicator.disarm_safety();
    if let Some(handle) = shell.safety_timer.take() {
        window.clear_timeout_with_handle(handle);
    }
}

/// Schedule the redundant secondary hide that follows every settled load
pub(crate) fn schedule_redundant_hide(state: &SharedShell) {
    let Some(window) = crate::window() else { return };

    {
        let mut shell = state.borrow_mut();
        if let Some(handle) = shell.redundant_timer.take() {
            window.clear_timeout_with_handle(handle);
        }
    }

    let st = state.clone();
    let on_fire = Closure::once_into_js(move || {
        st.borrow_mut().redundant_timer = None;
        force_hide(&st);
    });
    if let Ok(handle) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        on_fire.unchecked_ref::<Function>(),
        REDUNDANT_HIDE_DELAY_MS as i32,
    ) {
        state.borrow_mut().redundant_timer = Some(handle);
    }
}

/// Advance timed transitions (safety deadline, fade grace) and apply any
/// phase change to the DOM
pub(crate) fn tick(state: &SharedShell) {
    let phase = state.borrow_mut().indicator.tick(crate::now());
    if let Some(phase) = phase {
        apply(phase);
        if matches!(phase, IndicatorPhase::Hiding { .. }) {
            schedule_grace(state);
        }
    }
}

/// One-shot timer that completes a fade after the grace period
fn schedule_grace(state: &SharedShell) {
    let Some(window) = crate::window() else { return };

    {
        let mut shell = state.borrow_mut();
        if let Some(handle) = shell.grace_timer.take() {
            window.clear_timeout_with_handle(handle);
        }
    }

    let st = state.clone();
    let on_grace = Closure::once_into_js(move || {
        st.borrow_mut().grace_timer = None;
        tick(&st);
    });
    if let Ok(handle) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        on_grace.unchecked_ref::<Function>(),
        HIDE_GRACE_MS as i32,
    ) {
        state.borrow_mut().grace_timer = Some(handle);
    }
}

/// Mirror a phase into the overlay element
fn apply(phase: IndicatorPhase) {
    let Some(element) = crate::document()
        .and_then(|d| d.get_element_by_id(LOADER_ID))
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    let style = element.style();
    match phase {
        IndicatorPhase::Showing => {
            let _ = element.class_list().remove_2(CLASS_HIDDEN, CLASS_FADE);
            let _ = style.set_property_with_priority("display", "block", "important");
            let _ = style.set_property("opacity", "1");
            let _ = style.set_property("pointer-events", "all");
        }
        IndicatorPhase::Hiding { .. } => {
            let _ = element.class_list().add_1(CLASS_FADE);
            let _ = style.set_property("pointer-events", "none");
        }
        IndicatorPhase::Hidden => {
            let _ = element.class_list().add_1(CLASS_HIDDEN);
            let _ = style.set_property_with_priority("display", "none", "important");
        }
    }
}
