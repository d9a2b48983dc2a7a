//! Debug levels, session state and the controller driving them

mod controller;
mod level;
mod state;
pub mod url;

pub use controller::{DebugController, Transition};
pub use level::{DebugLevel, DebugMode, Icon};
pub use state::SessionState;
