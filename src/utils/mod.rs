//! Shared utilities

pub mod error;

pub use error::{GatewayError, OdooDebugError, Result};
