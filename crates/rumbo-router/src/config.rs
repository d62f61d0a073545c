//! Shell configuration
//!
//! Configuration is injected explicitly at startup instead of being read
//! from ambient globals: the embedding page builds one JSON object and hands
//! it to the router constructor.

use serde::Deserialize;

use crate::hero::HeroConfig;

/// Top-level configuration for the shell
///
/// Every field is optional; an empty object (or no object at all) yields a
/// router with the hero carousel disabled.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Hero carousel section
    pub hero: HeroConfig,
}
