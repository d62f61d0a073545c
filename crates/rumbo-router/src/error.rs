//! Error types for the router core
//!
//! This module provides structured error types for all fallible operations
//! in the shell, following the project's error handling conventions. Every
//! load-time failure is funneled into a [`RouteError`] so the loader boundary
//! can log it and render a single inline error block.

/// Errors that can occur while resolving and loading a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The fragment fetch completed with a non-2xx status
    Http {
        /// HTTP status code of the response
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// The fragment fetch failed at the network level
    Network {
        /// URL that was requested
        url: String,
        /// Underlying failure description
        detail: String,
    },

    /// The fragment fetch exceeded its deadline and was aborted
    Timeout {
        /// URL that was requested
        url: String,
        /// Deadline in milliseconds
        ms: u32,
    },

    /// The fetched markup could not be parsed into usable content
    Parse {
        /// Why parsing failed
        detail: String,
    },

    /// An unexpected DOM API failure
    Dom {
        /// Underlying failure description
        detail: String,
    },
}

impl std::fmt::Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http { status, url } => write!(f, "HTTP {} while loading {}", status, url),
            Self::Network { url, detail } => {
                write!(f, "network failure loading {}: {}", url, detail)
            }
            Self::Timeout { url, ms } => {
                write!(f, "timed out after {} ms loading {}", ms, url)
            }
            Self::Parse { detail } => write!(f, "could not parse fragment markup: {}", detail),
            Self::Dom { detail } => write!(f, "DOM operation failed: {}", detail),
        }
    }
}

impl std::error::Error for RouteError {}

/// Result type alias for router operations
pub type RouteResult<T> = Result<T, RouteError>;
