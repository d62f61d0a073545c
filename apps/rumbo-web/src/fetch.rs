//! Fragment fetch with an abortable deadline
//!
//! The deadline is enforced, not advisory: when it passes, an
//! `AbortController` cancels the in-flight request, so a timed-out fetch
//! stops consuming resources instead of racing later loads for the DOM. An
//! aborted fetch surfaces as [`RouteError::Timeout`], distinct from HTTP
//! status and network failures.

use std::cell::Cell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Request, RequestCache, RequestInit, Response, Window};

use rumbo_router::{RouteError, RouteResult};

use crate::js_detail;

/// GET `url` with caching disabled, bounded by `timeout_ms`.
///
/// Returns the response body as text. Non-2xx statuses are
/// [`RouteError::Http`]; an elapsed deadline is [`RouteError::Timeout`];
/// everything else the fetch can throw is [`RouteError::Network`].
pub(crate) async fn fetch_fragment(
    window: &Window,
    url: &str,
    timeout_ms: u32,
) -> RouteResult<String> {
    let controller = AbortController::new().map_err(|e| dom_err(&e))?;
    let timed_out = Rc::new(Cell::new(false));

    // Deadline: flag the timeout, then cancel the request. The flag is what
    // distinguishes our own abort from a genuine network failure.
    let deadline = {
        let controller = controller.clone();
        let timed_out = timed_out.clone();
        Closure::once_into_js(move || {
            timed_out.set(true);
            controller.abort();
        })
    };
    let timer = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            deadline.unchecked_ref::<Function>(),
            timeout_ms as i32,
        )
        .map_err(|e| dom_err(&e))?;

    let init = RequestInit::new();
    init.set_method("GET");
    init.set_cache(RequestCache::NoStore);
    init.set_signal(Some(&controller.signal()));

    let request = Request::new_with_str_and_init(url, &init).map_err(|e| dom_err(&e))?;
    let response = JsFuture::from(window.fetch_with_request(&request)).await;
    window.clear_timeout_with_handle(timer);

    let response = match response {
        Ok(value) => value,
        Err(err) => {
            return Err(if timed_out.get() {
                RouteError::Timeout {
                    url: url.to_string(),
                    ms: timeout_ms,
                }
            } else {
                RouteError::Network {
                    url: url.to_string(),
                    detail: js_detail(&err),
                }
            });
        }
    };

    let response: Response = response.dyn_into().map_err(|e| dom_err(&e))?;
    if !response.ok() {
        return Err(RouteError::Http {
            status: response.status(),
            url: url.to_string(),
        });
    }

    let text = JsFuture::from(response.text().map_err(|e| dom_err(&e))?)
        .await
        .map_err(|err| RouteError::Network {
            url: url.to_string(),
            detail: js_detail(&err),
        })?;

    text.as_string().ok_or_else(|| RouteError::Parse {
        detail: "response body was not text".to_string(),
    })
}

fn dom_err(value: &JsValue) -> RouteError {
    RouteError::Dom {
        detail: js_detail(value),
    }
}
