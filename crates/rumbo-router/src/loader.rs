//! Load generations, fragment scrubbing, and error presentation
//!
//! Overlapping navigations are resolved with a monotonically increasing load
//! generation: every `load_view` run takes a fresh generation from the
//! [`LoadTracker`], and only the newest generation is allowed to commit DOM
//! writes. A superseded run discards its result instead of racing the newer
//! one for the container.

use crate::error::RouteError;

/// Per-fetch deadline in milliseconds; the request is aborted when it passes
pub const FETCH_TIMEOUT_MS: u32 = 15_000;

/// Delay of the redundant secondary hide scheduled after a load settles,
/// in milliseconds
pub const REDUNDANT_HIDE_DELAY_MS: f64 = 300.0;

/// Element ids that fragments must not reintroduce: modals already present
/// in the shell page are stripped from every parsed fragment.
pub const MODAL_SCRUB_IDS: &[&str] = &["modalEmpresa", "modalRepartidor"];

/// Identifies one `load_view` run. Ordered: newer generations compare greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadGeneration(u64);

/// Hands out load generations and remembers the newest
#[derive(Debug, Default)]
pub struct LoadTracker {
    current: u64,
}

impl LoadTracker {
    /// Create a tracker with no loads started
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, superseding all earlier ones
    pub fn begin(&mut self) -> LoadGeneration {
        self.current += 1;
        LoadGeneration(self.current)
    }

    /// Whether `generation` is still the newest load
    pub fn is_current(&self, generation: LoadGeneration) -> bool {
        generation.0 == self.current
    }
}

/// Render the inline error block injected into the container when a view
/// fails to load. Contains the failure's message and a hint that the
/// fragment file may be missing.
pub fn error_markup(err: &RouteError) -> String {
    format!(
        "<div style=\"padding:24px\"><h2>Failed to load view</h2><p>{}</p>\
         <p><small>Check that the fragment file exists next to index.html.</small></p></div>",
        escape_html(&err.to_string())
    )
}

/// Minimal HTML escaping for text interpolated into the error block
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
