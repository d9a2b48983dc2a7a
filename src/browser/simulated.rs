//! In-memory browser host
//!
//! Holds a set of tabs, answers state queries the way the page-side content
//! script does (reading `debug` from the current URL), and records every
//! icon change and navigation so callers can inspect the side effects.

use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use super::gateway::{GET_ODOO_DEBUG_INFO, PageState, StateQuery, Tab, TabGateway, TabId};
use crate::debug::{Icon, url as debug_url};
use crate::utils::GatewayError;

#[derive(Debug, Clone)]
struct SimulatedTab {
    tab: Tab,
    /// Generation the content script reports; `None` for pages without one
    odoo_version: Option<String>,
    /// Restricted pages get no content script at all
    scripted: bool,
}

#[derive(Debug, Default)]
struct Inner {
    tabs: Vec<SimulatedTab>,
    active: Option<TabId>,
    next_id: u64,
    icons: Vec<Icon>,
    navigations: Vec<(TabId, String)>,
}

/// Browser host backed by plain data
#[derive(Debug, Default)]
pub struct SimulatedBrowser {
    inner: Mutex<Inner>,
}

impl SimulatedBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> Result<R, GatewayError> {
        self.inner
            .lock()
            .map(|mut inner| f(&mut inner))
            .map_err(|_| GatewayError::Closed)
    }

    fn open(&self, url: &str, odoo_version: Option<&str>, scripted: bool) -> Result<TabId, GatewayError> {
        self.with_inner(|inner| {
            inner.next_id += 1;
            let id = TabId::new(inner.next_id);
            inner.tabs.push(SimulatedTab {
                tab: Tab::new(id, url),
                odoo_version: odoo_version.map(str::to_string),
                scripted,
            });
            inner.active = Some(id);
            id
        })
    }

    /// Open and focus a web page; `odoo_version` marks it as a recognized page
    pub fn open_tab(&self, url: &str, odoo_version: Option<&str>) -> Result<TabId, GatewayError> {
        self.open(url, odoo_version, true)
    }

    /// Open and focus a page no content script runs on
    pub fn open_restricted_tab(&self, url: &str) -> Result<TabId, GatewayError> {
        self.open(url, None, false)
    }

    /// Focus an existing tab
    pub fn activate(&self, id: TabId) -> Result<(), GatewayError> {
        self.with_inner(|inner| {
            if !inner.tabs.iter().any(|t| t.tab.id == id) {
                return Err(GatewayError::NoSuchTab(id));
            }
            inner.active = Some(id);
            Ok(())
        })?
    }

    /// Close a tab; focus moves to the first remaining one
    pub fn close_tab(&self, id: TabId) -> Result<(), GatewayError> {
        self.with_inner(|inner| {
            let before = inner.tabs.len();
            inner.tabs.retain(|t| t.tab.id != id);
            if inner.tabs.len() == before {
                return Err(GatewayError::NoSuchTab(id));
            }
            if inner.active == Some(id) {
                inner.active = inner.tabs.first().map(|t| t.tab.id);
            }
            Ok(())
        })?
    }

    pub fn tab(&self, id: TabId) -> Option<Tab> {
        self.with_inner(|inner| inner.tabs.iter().find(|t| t.tab.id == id).map(|t| t.tab.clone()))
            .ok()
            .flatten()
    }

    /// Every icon set so far, oldest first
    pub fn icon_history(&self) -> Vec<Icon> {
        self.with_inner(|inner| inner.icons.clone()).unwrap_or_default()
    }

    pub fn current_icon(&self) -> Option<Icon> {
        self.with_inner(|inner| inner.icons.last().copied()).ok().flatten()
    }

    /// Every navigation issued so far, oldest first
    pub fn navigations(&self) -> Vec<(TabId, String)> {
        self.with_inner(|inner| inner.navigations.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TabGateway for SimulatedBrowser {
    async fn active_tab(&self) -> Option<Tab> {
        self.with_inner(|inner| {
            let active = inner.active?;
            inner.tabs.iter().find(|t| t.tab.id == active).map(|t| t.tab.clone())
        })
        .ok()
        .flatten()
    }

    async fn query_page_state(&self, tab: TabId, query: &StateQuery) -> Result<PageState, GatewayError> {
        let page = self
            .with_inner(|inner| inner.tabs.iter().find(|t| t.tab.id == tab).cloned())?
            .ok_or(GatewayError::NoSuchTab(tab))?;

        if !page.scripted || query.message != GET_ODOO_DEBUG_INFO {
            return Err(GatewayError::NoResponder);
        }
        let url = debug_url::parse_tab_url(&page.tab.url).map_err(|_| GatewayError::NoResponder)?;

        Ok(PageState {
            odoo_version: page.odoo_version,
            debug_mode: debug_url::debug_mode(&url),
        })
    }

    async fn update_tab_url(&self, tab: TabId, url: &Url) -> Result<(), GatewayError> {
        self.with_inner(|inner| {
            let page = inner
                .tabs
                .iter_mut()
                .find(|t| t.tab.id == tab)
                .ok_or(GatewayError::NoSuchTab(tab))?;
            page.tab.url = url.to_string();
            inner.navigations.push((tab, url.to_string()));
            Ok(())
        })?
    }

    async fn set_icon(&self, icon: Icon) -> Result<(), GatewayError> {
        self.with_inner(|inner| inner.icons.push(icon))
    }
}
