//! Error types for the debug controller

use thiserror::Error;

use crate::browser::TabId;

/// Main error type for controller operations
#[derive(Debug, Error)]
pub enum OdooDebugError {
    /// Misuse at construction time (missing callback, zero quiet window)
    #[error("[InvalidArgumentException] {0}")]
    InvalidArgument(String),
    /// Tab URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// Parsed, but not a page the web client runs on
    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),
    /// Browser API failure
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Browser-side failures reported by a [`crate::browser::TabGateway`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Nothing answered the state-query message
    #[error("no content script responded")]
    NoResponder,
    /// Tab went away between query and update
    #[error("no such tab: {0:?}")]
    NoSuchTab(TabId),
    /// The browser host is gone
    #[error("browser host closed")]
    Closed,
}

/// Convenience Result type for controller operations
pub type Result<T> = std::result::Result<T, OdooDebugError>;
