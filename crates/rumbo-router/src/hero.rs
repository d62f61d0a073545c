//! Hero carousel engine
//!
//! The rotating banner/header image block shown atop views. The engine owns
//! only an index into the configured image list; every transition is an
//! immediate, synchronous re-render of the [`HeroFrame`] the browser glue
//! applies to the header element. The autoplay interval timer itself lives in
//! the glue; the engine just says whether one should exist.

use serde::Deserialize;

/// Hero configuration, injected at startup
///
/// A `null` caption entry means "hide the text box for this image". When no
/// caption list is supplied at all, the text box is shown only for the
/// default banner image (a file named exactly `banner.png`, any path prefix,
/// case-insensitive).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroConfig {
    /// Image URLs, in rotation order
    pub images: Vec<String>,
    /// Optional parallel caption list; `null` entries hide the text box
    pub captions: Option<Vec<Option<String>>>,
    /// Autoplay interval in milliseconds; non-positive or non-finite
    /// values disable autoplay
    pub autoplay_ms: Option<f64>,
}

impl HeroConfig {
    /// Whether the carousel has anything to show
    pub fn is_enabled(&self) -> bool {
        !self.images.is_empty()
    }

    /// The effective autoplay interval: positive and finite, or nothing
    pub fn autoplay_interval(&self) -> Option<f64> {
        self.autoplay_ms.filter(|ms| ms.is_finite() && *ms > 0.0)
    }
}

/// What the glue should render for the current index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroFrame {
    /// Background image URL
    pub src: String,
    /// Whether the caption/text box is visible
    pub show_text: bool,
}

/// Carousel state: the configured images plus a current index
///
/// Re-created on every view injection; the previous instance's autoplay
/// timer must be cleared by the glue before a new engine is installed.
#[derive(Debug, Clone)]
pub struct HeroEngine {
    config: HeroConfig,
    index: usize,
}

impl HeroEngine {
    /// Create an engine at index 0
    pub fn new(config: HeroConfig) -> Self {
        Self { config, index: 0 }
    }

    /// Number of configured images
    pub fn len(&self) -> usize {
        self.config.images.len()
    }

    /// Whether there is nothing to rotate
    pub fn is_empty(&self) -> bool {
        self.config.images.is_empty()
    }

    /// Current index
    pub fn index(&self) -> usize {
        self.index
    }

    /// The frame for the current index, or `None` with no images
    pub fn frame(&self) -> Option<HeroFrame> {
        let src = self.config.images.get(self.index)?;
        Some(HeroFrame {
            src: src.clone(),
            show_text: self.show_text_at(self.index),
        })
    }

    /// Advance one image, wrapping, and return the new frame
    pub fn advance(&mut self) -> Option<HeroFrame> {
        if self.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.len();
        self.frame()
    }

    /// Step back one image, wrapping, and return the new frame
    pub fn retreat(&mut self) -> Option<HeroFrame> {
        if self.is_empty() {
            return None;
        }
        self.index = (self.index + self.len() - 1) % self.len();
        self.frame()
    }

    /// Caption/text visibility rule for an index.
    ///
    /// With a caption list: hidden exactly when the entry is `null` (entries
    /// past the end of a short list count as present). Without one: shown
    /// only for the default banner image.
    pub fn show_text_at(&self, index: usize) -> bool {
        match &self.config.captions {
            Some(captions) => captions.get(index).map_or(true, |c| c.is_some()),
            None => self
                .config
                .images
                .get(index)
                .is_some_and(|src| is_default_banner(src)),
        }
    }
}

/// Whether the URL's final path segment is exactly `banner.png`,
/// case-insensitive
fn is_default_banner(src: &str) -> bool {
    let name = src.rsplit('/').next().unwrap_or(src);
    name.eq_ignore_ascii_case("banner.png")
}
