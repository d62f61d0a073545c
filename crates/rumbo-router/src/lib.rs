//! Core engine for the Rumbo SPA shell
//!
//! This crate provides the browser-independent half of the fragment-hash
//! router:
//! - View keys, descriptors, and fragment resolution
//! - Loading-indicator state machine with reference-counted visibility
//! - Hero carousel engine (index, wrap-around, caption visibility)
//! - Load-generation tracking for overlapping navigations
//! - Error types and the inline error markup rendered on failed loads
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`view`]: View keys, descriptors, and the fixed route table
//! - [`indicator`]: Busy-overlay state machine (injectable clock)
//! - [`hero`]: Hero carousel configuration and engine
//! - [`loader`]: Load generations, scrub list, error markup
//! - [`config`]: Top-level configuration injected at startup
//! - [`error`]: Error types for all fallible operations
//!
//! ## Example
//!
//! ```rust
//! use rumbo_router::{RouteTable, ViewKey};
//!
//! let routes = RouteTable::standard();
//! let key = ViewKey::resolve("#/Servicio/detalle");
//! assert_eq!(key, ViewKey::Servicio);
//! assert_eq!(routes.get(key).unwrap().url, "servicio.html");
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state management is pure Rust, testable without
//!    a browser
//! 2. **Time Abstraction**: Timed behavior uses injectable millisecond clocks
//!    for deterministic testing
//! 3. **Minimal Dependencies**: Core types have no browser dependencies

pub mod config;
pub mod error;
pub mod hero;
pub mod indicator;
pub mod loader;
pub mod view;

// Re-export core types for convenience
pub use config::RouterConfig;
pub use error::{RouteError, RouteResult};
pub use hero::{HeroConfig, HeroEngine, HeroFrame};
pub use indicator::{IndicatorPhase, IndicatorState};
pub use loader::{error_markup, LoadGeneration, LoadTracker};
pub use view::{RouteTable, ViewDescriptor, ViewKey};

/// Grace period between the fade-out and the hard hide of the indicator
pub use indicator::HIDE_GRACE_MS;

/// Deadline after which a load force-hides the indicator regardless of outcome
pub use indicator::SAFETY_HIDE_MS;

/// Per-fetch deadline, enforced by aborting the request
pub use loader::FETCH_TIMEOUT_MS;
