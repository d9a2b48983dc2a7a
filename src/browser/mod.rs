//! Browser-facing surface: the gateway trait and an in-memory host

mod gateway;
mod simulated;

pub use gateway::{GET_ODOO_DEBUG_INFO, PageState, StateQuery, Tab, TabGateway, TabId};
pub use simulated::SimulatedBrowser;

#[cfg(test)]
pub use gateway::MockTabGateway;
