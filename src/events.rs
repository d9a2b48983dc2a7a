//! Browser event wiring
//!
//! Toolbar clicks go through the click listener; tab activation, tab updates
//! and window focus changes trigger a passive check of the active tab.
//! Runtime failures stop here: they are logged and dropped.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::browser::{Tab, TabGateway, TabId};
use crate::debounce::ClickListener;
use crate::debug::DebugController;
use crate::utils::Result;

/// Browser events the controller subscribes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    /// Toolbar button clicked while `Tab` was active
    ActionClicked(Tab),
    TabActivated(TabId),
    TabUpdated(TabId),
    WindowFocusChanged,
}

/// Routes browser events to the debouncer and the controller
pub struct EventRouter<G> {
    controller: Arc<DebugController<G>>,
    clicks: ClickListener<Tab>,
}

impl<G: TabGateway + 'static> EventRouter<G> {
    /// Must be called from within a tokio runtime
    pub fn new(controller: Arc<DebugController<G>>) -> Result<Self> {
        let burst_controller = Arc::clone(&controller);
        let clicks = ClickListener::builder()
            .quiet_window(controller.config().quiet_window)
            .on_burst(move |tab: Tab, clicks| {
                let controller = Arc::clone(&burst_controller);
                async move {
                    if let Err(err) = controller.on_burst(&tab, clicks).await {
                        log::debug!("Burst on tab {:?} ignored: {}", tab.id, err);
                    }
                }
            })
            .build()?;

        Ok(Self { controller, clicks })
    }

    pub fn controller(&self) -> &Arc<DebugController<G>> {
        &self.controller
    }

    pub async fn dispatch(&self, event: BrowserEvent) {
        log::trace!("Dispatching {:?}", event);
        match event {
            BrowserEvent::ActionClicked(tab) => self.clicks.click(tab),
            BrowserEvent::TabActivated(_) | BrowserEvent::TabUpdated(_) | BrowserEvent::WindowFocusChanged => {
                if let Err(err) = self.controller.adapt_icon().await {
                    log::debug!("Passive check failed: {}", err);
                }
            }
        }
    }

    /// Dispatch events until the sender side closes
    pub async fn run(self, mut events: mpsc::Receiver<BrowserEvent>) {
        while let Some(event) = events.recv().await {
            self.dispatch(event).await;
        }
        log::debug!("Event stream closed");
        self.clicks.shutdown().await;
    }
}
