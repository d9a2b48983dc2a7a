//! Debug-state controller
//!
//! Reacts to completed click bursts by rewriting the active tab's `debug`
//! parameter, and to tab/window events by asking the page for its state,
//! auto-enabling basic debug on recognized pages and refreshing the icon.

use std::sync::Mutex;

use url::Url;

use crate::browser::{StateQuery, Tab, TabGateway};
use crate::config::ControllerConfig;
use crate::debug::url as debug_url;
use crate::debug::{DebugLevel, Icon, SessionState};
use crate::utils::Result;

/// Side effects issued for one click burst
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub level: DebugLevel,
    /// Value written to the `debug` parameter
    pub value: &'static str,
    pub url: Url,
    pub icon: Icon,
}

/// Owns the session state and drives the browser through a [`TabGateway`]
pub struct DebugController<G> {
    gateway: G,
    config: ControllerConfig,
    state: Mutex<SessionState>,
}

impl<G: TabGateway> DebugController<G> {
    pub fn new(gateway: G, config: ControllerConfig) -> Self {
        let state = SessionState::new(config.legacy_version.clone());
        Self {
            gateway,
            config,
            state: Mutex::new(state),
        }
    }

    /// Start from a known state instead of the defaults
    pub fn with_state(self, state: SessionState) -> Self {
        if let Ok(mut current) = self.state.lock() {
            *current = state;
        }
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Snapshot of the last recorded page state
    pub fn state(&self) -> SessionState {
        self.state
            .lock()
            .map(|state| state.clone())
            .unwrap_or_else(|_| SessionState::new(self.config.legacy_version.clone()))
    }

    /// Work out what a burst on `tab` should do, without touching the browser
    pub fn plan_burst(&self, tab: &Tab, clicks: u32) -> Result<Option<Transition>> {
        let state = self.state();
        let Some(level) = DebugLevel::from_burst(clicks, &state.debug_mode) else {
            return Ok(None);
        };

        let url = debug_url::parse_tab_url(&tab.url)?;
        let value = level.query_value(state.is_legacy(&self.config.legacy_version));

        Ok(Some(Transition {
            level,
            value,
            url: debug_url::with_debug_param(&url, value),
            icon: level.icon(),
        }))
    }

    /// Apply a completed click burst to `tab`
    pub async fn on_burst(&self, tab: &Tab, clicks: u32) -> Result<Option<Transition>> {
        let Some(transition) = self.plan_burst(tab, clicks)? else {
            log::trace!("Ignoring burst of {} clicks", clicks);
            return Ok(None);
        };

        log::debug!(
            "Burst of {} on tab {:?}: debug={:?}",
            clicks,
            tab.id,
            transition.value
        );
        self.gateway.set_icon(transition.icon).await?;
        self.gateway.update_tab_url(tab.id, &transition.url).await?;
        Ok(Some(transition))
    }

    /// Navigate `tab` to `debug=1` unless it already runs basic or assets debug
    pub async fn ensure_auto_debug(&self, tab: &Tab) -> Result<Option<Url>> {
        let url = debug_url::parse_tab_url(&tab.url)?;
        let Some(target) = debug_url::ensure_basic_debug(&url) else {
            return Ok(None);
        };

        log::debug!("Auto-enabling debug on tab {:?}", tab.id);
        self.gateway.update_tab_url(tab.id, &target).await?;
        Ok(Some(target))
    }

    /// Passive check of the active tab.
    ///
    /// Returns the icon that was set, or `None` when no tab is active. The
    /// icon reflects the state the page reported, before any auto rewrite.
    pub async fn adapt_icon(&self) -> Result<Option<Icon>> {
        let Some(tab) = self.gateway.active_tab().await else {
            return Ok(None);
        };

        let page = match self.gateway.query_page_state(tab.id, &StateQuery::debug_info()).await {
            Ok(page) => Some(page),
            Err(err) => {
                log::debug!("No page state for tab {:?}: {}", tab.id, err);
                None
            }
        };

        let mut icon = Icon::default();
        if let Some(page) = page.filter(|page| page.recognized_version().is_some()) {
            if self.config.auto_debug && !page.debug_mode.is_active() {
                if let Err(err) = self.ensure_auto_debug(&tab).await {
                    log::debug!("Skipping auto debug on tab {:?}: {}", tab.id, err);
                }
            }
            icon = Icon::for_mode(&page.debug_mode);
            if let Ok(mut state) = self.state.lock() {
                state.record(&page);
            }
        }

        self.gateway.set_icon(icon).await?;
        Ok(Some(icon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{MockTabGateway, PageState, TabId};
    use crate::debug::DebugMode;
    use crate::utils::{GatewayError, OdooDebugError};
    use mockall::predicate::eq;
    use mockall::Sequence;
    use pretty_assertions::assert_eq;

    const PAGE: &str = "https://erp.example.com/odoo/action-12?db=prod&lang=en_US#view_type=list";

    fn tab(url: &str) -> Tab {
        Tab::new(TabId::new(7), url)
    }

    fn controller(gateway: MockTabGateway) -> DebugController<MockTabGateway> {
        DebugController::new(gateway, ControllerConfig::default())
    }

    fn modern(mode: DebugMode) -> SessionState {
        SessionState {
            debug_mode: mode,
            odoo_version: "17.0".into(),
        }
    }

    fn expect_navigation(gateway: &mut MockTabGateway, expected: &'static str) {
        gateway
            .expect_update_tab_url()
            .withf(move |id, url| *id == TabId::new(7) && url.as_str() == expected)
            .times(1)
            .returning(|_, _| Ok(()));
    }

    #[tokio::test]
    async fn test_single_click_enables_basic_debug() {
        let mut gateway = MockTabGateway::new();
        gateway.expect_set_icon().with(eq(Icon::On)).times(1).returning(|_| Ok(()));
        expect_navigation(
            &mut gateway,
            "https://erp.example.com/odoo/action-12?db=prod&lang=en_US&debug=1#view_type=list",
        );

        let transition = controller(gateway).on_burst(&tab(PAGE), 1).await.unwrap().unwrap();
        assert_eq!(transition.level, DebugLevel::Basic);
        assert_eq!(transition.value, "1");
    }

    #[tokio::test]
    async fn test_single_click_turns_off_on_modern_page() {
        let mut gateway = MockTabGateway::new();
        gateway.expect_set_icon().with(eq(Icon::Off)).times(1).returning(|_| Ok(()));
        expect_navigation(&mut gateway, "https://erp.example.com/web?debug=&menu_id=3");

        let controller = controller(gateway).with_state(modern(DebugMode::Basic));
        let transition = controller
            .on_burst(&tab("https://erp.example.com/web?debug=1&menu_id=3"), 1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(transition.value, "");
        assert_eq!(transition.icon, Icon::Off);
    }

    #[tokio::test]
    async fn test_single_click_turns_off_on_legacy_page() {
        let mut gateway = MockTabGateway::new();
        gateway.expect_set_icon().with(eq(Icon::Off)).times(1).returning(|_| Ok(()));
        expect_navigation(&mut gateway, "https://erp.example.com/web?debug=0");

        let controller = controller(gateway).with_state(SessionState {
            debug_mode: DebugMode::Assets,
            odoo_version: "legacy".into(),
        });
        let transition = controller
            .on_burst(&tab("https://erp.example.com/web?debug=assets"), 1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(transition.value, "0");
    }

    #[tokio::test]
    async fn test_double_click_selects_assets_regardless_of_state() {
        for mode in [DebugMode::Unset, DebugMode::Basic, DebugMode::Assets] {
            let mut gateway = MockTabGateway::new();
            gateway.expect_set_icon().with(eq(Icon::Super)).times(1).returning(|_| Ok(()));
            expect_navigation(
                &mut gateway,
                "https://erp.example.com/odoo/action-12?db=prod&lang=en_US&debug=assets#view_type=list",
            );

            let controller = controller(gateway).with_state(modern(mode));
            let transition = controller.on_burst(&tab(PAGE), 2).await.unwrap().unwrap();
            assert_eq!(transition.level, DebugLevel::Assets);
        }
    }

    #[tokio::test]
    async fn test_icon_is_set_before_navigation() {
        let mut seq = Sequence::new();
        let mut gateway = MockTabGateway::new();
        gateway
            .expect_set_icon()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        gateway
            .expect_update_tab_url()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        controller(gateway).on_burst(&tab(PAGE), 1).await.unwrap();
    }

    #[tokio::test]
    async fn test_triple_click_is_ignored() {
        // No expectations: any browser call fails the test
        let gateway = MockTabGateway::new();
        let result = controller(gateway).on_burst(&tab(PAGE), 3).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_burst_on_internal_page_is_rejected() {
        let gateway = MockTabGateway::new();
        let result = controller(gateway).on_burst(&tab("about:blank"), 1).await;
        assert!(matches!(result, Err(OdooDebugError::UnsupportedUrl(_))));
    }

    #[tokio::test]
    async fn test_passive_check_auto_enables_debug() {
        let mut gateway = MockTabGateway::new();
        gateway.expect_active_tab().returning(|| Some(tab(PAGE)));
        gateway
            .expect_query_page_state()
            .withf(|_, query| query.message == "getOdooDebugInfo")
            .returning(|_, _| Ok(PageState::new(Some("17.0"), DebugMode::Unset)));
        expect_navigation(
            &mut gateway,
            "https://erp.example.com/odoo/action-12?db=prod&lang=en_US&debug=1#view_type=list",
        );
        // Icon reflects the state reported before the rewrite
        gateway.expect_set_icon().with(eq(Icon::Off)).times(1).returning(|_| Ok(()));

        let controller = controller(gateway);
        assert_eq!(controller.adapt_icon().await.unwrap(), Some(Icon::Off));
        assert_eq!(controller.state(), modern(DebugMode::Unset));
    }

    #[tokio::test]
    async fn test_passive_check_without_responder_resets_icon() {
        let mut gateway = MockTabGateway::new();
        gateway.expect_active_tab().returning(|| Some(tab(PAGE)));
        gateway
            .expect_query_page_state()
            .returning(|_, _| Err(GatewayError::NoResponder));
        gateway.expect_update_tab_url().never();
        gateway.expect_set_icon().with(eq(Icon::Off)).times(1).returning(|_| Ok(()));

        let controller = controller(gateway).with_state(modern(DebugMode::Assets));
        assert_eq!(controller.adapt_icon().await.unwrap(), Some(Icon::Off));
        // State keeps the last recognized page
        assert_eq!(controller.state(), modern(DebugMode::Assets));
    }

    #[tokio::test]
    async fn test_passive_check_on_unrecognized_page() {
        let mut gateway = MockTabGateway::new();
        gateway.expect_active_tab().returning(|| Some(tab("https://example.org/")));
        gateway
            .expect_query_page_state()
            .returning(|_, _| Ok(PageState::new(None, DebugMode::Basic)));
        gateway.expect_update_tab_url().never();
        gateway.expect_set_icon().with(eq(Icon::Off)).times(1).returning(|_| Ok(()));

        let controller = controller(gateway);
        controller.adapt_icon().await.unwrap();
        assert_eq!(controller.state(), SessionState::default());
    }

    #[tokio::test]
    async fn test_passive_check_in_assets_mode() {
        let mut gateway = MockTabGateway::new();
        gateway
            .expect_active_tab()
            .returning(|| Some(tab("https://erp.example.com/web?debug=assets")));
        gateway
            .expect_query_page_state()
            .returning(|_, _| Ok(PageState::new(Some("16.0"), DebugMode::Assets)));
        gateway.expect_update_tab_url().never();
        gateway.expect_set_icon().with(eq(Icon::Super)).times(1).returning(|_| Ok(()));

        let controller = controller(gateway);
        assert_eq!(controller.adapt_icon().await.unwrap(), Some(Icon::Super));
        assert_eq!(controller.state().debug_mode, DebugMode::Assets);
    }

    #[tokio::test]
    async fn test_passive_check_with_auto_debug_disabled() {
        let mut gateway = MockTabGateway::new();
        gateway.expect_active_tab().returning(|| Some(tab(PAGE)));
        gateway
            .expect_query_page_state()
            .returning(|_, _| Ok(PageState::new(Some("17.0"), DebugMode::Unset)));
        gateway.expect_update_tab_url().never();
        gateway.expect_set_icon().with(eq(Icon::Off)).times(1).returning(|_| Ok(()));

        let controller = DebugController::new(gateway, ControllerConfig::default().with_auto_debug(false));
        controller.adapt_icon().await.unwrap();
        assert_eq!(controller.state().odoo_version, "17.0");
    }

    #[tokio::test]
    async fn test_passive_check_without_active_tab() {
        let mut gateway = MockTabGateway::new();
        gateway.expect_active_tab().returning(|| None);
        gateway.expect_set_icon().never();

        assert_eq!(controller(gateway).adapt_icon().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_auto_debug_is_idempotent() {
        let mut gateway = MockTabGateway::new();
        gateway.expect_update_tab_url().never();
        let controller = controller(gateway);

        for url in ["https://x.test/web?debug=1#a=1", "https://x.test/web?z=9&debug=assets"] {
            assert_eq!(controller.ensure_auto_debug(&tab(url)).await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn test_auto_debug_skips_internal_pages() {
        let mut gateway = MockTabGateway::new();
        gateway.expect_update_tab_url().never();

        let result = controller(gateway).ensure_auto_debug(&tab("chrome://newtab")).await;
        assert!(result.is_err());
    }
}
