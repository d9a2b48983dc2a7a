//! Controller configuration

use std::time::Duration;

/// Max time between two clicks of the same burst
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(500);

/// Generation reported before any Odoo page has answered
pub const LEGACY_VERSION: &str = "legacy";

/// Tunables for the debouncer and the debug-state controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Quiet period closing a click burst
    pub quiet_window: Duration,
    /// Rewrite recognized pages to `debug=1` on passive checks
    pub auto_debug: bool,
    /// Generation marker for which "off" is written as `debug=0`; other
    /// generations get the empty value
    pub legacy_version: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            quiet_window: DEFAULT_QUIET_WINDOW,
            auto_debug: true,
            legacy_version: LEGACY_VERSION.to_string(),
        }
    }
}

impl ControllerConfig {
    pub fn with_quiet_window(mut self, quiet_window: Duration) -> Self {
        self.quiet_window = quiet_window;
        self
    }

    pub fn with_auto_debug(mut self, enabled: bool) -> Self {
        self.auto_debug = enabled;
        self
    }

    pub fn with_legacy_version(mut self, version: impl Into<String>) -> Self {
        self.legacy_version = version.into();
        self
    }
}
