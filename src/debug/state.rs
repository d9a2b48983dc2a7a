//! Session state shared between passive checks and click bursts

use crate::browser::PageState;
use crate::config::LEGACY_VERSION;
use crate::debug::DebugMode;

/// Last state reported by a recognized page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// `debug` value the page reported
    pub debug_mode: DebugMode,
    /// Web client generation the page reported
    pub odoo_version: String,
}

impl SessionState {
    pub fn new(odoo_version: impl Into<String>) -> Self {
        Self {
            debug_mode: DebugMode::Unset,
            odoo_version: odoo_version.into(),
        }
    }

    /// Overwrite from a page report; unrecognized pages leave the state alone
    pub fn record(&mut self, page: &PageState) -> bool {
        match page.recognized_version() {
            Some(version) => {
                self.odoo_version = version.to_string();
                self.debug_mode = page.debug_mode.clone();
                true
            }
            None => false,
        }
    }

    pub fn is_legacy(&self, legacy_version: &str) -> bool {
        self.odoo_version == legacy_version
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(LEGACY_VERSION)
    }
}
