//! # Odoo Debug - toolbar-button debug mode controller
//!
//! Toggles the `debug` query parameter (`debug=0|1|assets`) on the active tab
//! of an Odoo web client and mirrors the current debug level in a three-state
//! toolbar icon.
//!
//! ## Architecture
//!
//! - **debounce**: collapses rapid toolbar clicks into one burst with a click count
//! - **debug**: debug levels, session state, URL rewriting and the controller
//! - **browser**: the [`TabGateway`] capability trait and an in-memory host
//! - **events**: routes browser events to the debouncer and the controller
//! - **config**: controller tunables
//! - **utils**: shared error types

pub mod browser;
pub mod config;
pub mod debounce;
pub mod debug;
pub mod events;
pub mod utils;

// Re-export main types for convenience
pub use browser::{PageState, SimulatedBrowser, Tab, TabGateway, TabId};
pub use config::ControllerConfig;
pub use debounce::{BurstCounter, ClickListener};
pub use debug::{DebugController, DebugLevel, DebugMode, Icon, SessionState};
pub use events::{BrowserEvent, EventRouter};
pub use utils::error::{GatewayError, OdooDebugError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "Odoo Debug";
