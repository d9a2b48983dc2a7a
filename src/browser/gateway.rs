//! Capability interface over the browser tab, icon and messaging APIs

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::debug::{DebugMode, Icon};
use crate::utils::GatewayError;

/// Unique tab identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(u64);

impl TabId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Snapshot of a browser tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    /// Raw URL as the browser reports it; may not parse
    pub url: String,
}

impl Tab {
    pub fn new(id: TabId, url: impl Into<String>) -> Self {
        Self { id, url: url.into() }
    }
}

/// Name of the state-query message understood by the content script
pub const GET_ODOO_DEBUG_INFO: &str = "getOdooDebugInfo";

/// Outbound message asking the content script for the page state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateQuery {
    pub message: String,
}

impl StateQuery {
    pub fn debug_info() -> Self {
        Self {
            message: GET_ODOO_DEBUG_INFO.to_string(),
        }
    }
}

impl Default for StateQuery {
    fn default() -> Self {
        Self::debug_info()
    }
}

/// Content script reply
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    /// Web client generation; `None` when the page is not recognized
    #[serde(default, deserialize_with = "truthy_version")]
    pub odoo_version: Option<String>,
    #[serde(default)]
    pub debug_mode: DebugMode,
}

impl PageState {
    pub fn new(odoo_version: Option<&str>, debug_mode: DebugMode) -> Self {
        Self {
            odoo_version: odoo_version.map(str::to_string),
            debug_mode,
        }
    }

    /// Generation, when the page identifies as a recognized web client
    pub fn recognized_version(&self) -> Option<&str> {
        self.odoo_version.as_deref().filter(|version| !version.is_empty())
    }
}

/// Accepts strings, numbers, booleans and null; falsy values become `None`
fn truthy_version<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(version) if !version.is_empty() => Some(version),
        serde_json::Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        serde_json::Value::Bool(true) => Some("true".to_string()),
        _ => None,
    })
}

/// Browser operations the controller depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TabGateway: Send + Sync {
    /// Active tab of the focused window
    async fn active_tab(&self) -> Option<Tab>;

    /// Round-trip a state query through the tab's content script
    async fn query_page_state(&self, tab: TabId, query: &StateQuery) -> Result<PageState, GatewayError>;

    /// Navigate a tab
    async fn update_tab_url(&self, tab: TabId, url: &Url) -> Result<(), GatewayError>;

    /// Swap the toolbar icon
    async fn set_icon(&self, icon: Icon) -> Result<(), GatewayError>;
}
