//! Odoo Debug - toolbar-button debug mode controller
//!
//! Replays a short browsing session against the in-memory browser host and
//! prints what the toolbar would show after each step.

use std::sync::Arc;
use std::time::Duration;

use env_logger::Env;
use odoo_debug::{
    BrowserEvent, ControllerConfig, DebugController, EventRouter, NAME, SimulatedBrowser, TabId, VERSION,
};
use tokio::sync::mpsc;

type Controller = Arc<DebugController<SimulatedBrowser>>;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    println!("🚀 {} v{} - replaying a demo session", NAME, VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if let Err(e) = run_demo().await {
        eprintln!("❌ Demo failed: {}", e);
        std::process::exit(1);
    }
}

async fn run_demo() -> odoo_debug::Result<()> {
    let config = ControllerConfig::default();
    let settle = config.quiet_window + Duration::from_millis(100);

    let browser = SimulatedBrowser::new();
    let page = browser.open_tab(
        "https://erp.example.com/odoo/action-12?db=prod#view_type=list",
        Some("17.0"),
    )?;
    let controller: Controller = Arc::new(DebugController::new(browser, config));
    let router = EventRouter::new(Arc::clone(&controller))?;

    let (tx, rx) = mpsc::channel(16);
    let handle = tokio::spawn(router.run(rx));

    send(&tx, BrowserEvent::TabActivated(page)).await;
    report(&controller, page, "tab activated");

    // The auto rewrite navigated the tab; the browser reports the update
    send(&tx, BrowserEvent::TabUpdated(page)).await;
    report(&controller, page, "tab updated");

    if let Some(tab) = controller.gateway().tab(page) {
        send(&tx, BrowserEvent::ActionClicked(tab.clone())).await;
        send(&tx, BrowserEvent::ActionClicked(tab)).await;
    }
    tokio::time::sleep(settle).await;
    send(&tx, BrowserEvent::TabUpdated(page)).await;
    report(&controller, page, "double click");

    if let Some(tab) = controller.gateway().tab(page) {
        send(&tx, BrowserEvent::ActionClicked(tab)).await;
    }
    tokio::time::sleep(settle).await;
    report(&controller, page, "single click");

    let settings = controller.gateway().open_restricted_tab("chrome://settings")?;
    send(&tx, BrowserEvent::TabActivated(settings)).await;
    report(&controller, settings, "restricted tab");

    drop(tx);
    if let Err(e) = handle.await {
        eprintln!("❌ Event loop stopped: {}", e);
    }

    println!("\n✅ Demo finished");
    Ok(())
}

async fn send(tx: &mpsc::Sender<BrowserEvent>, event: BrowserEvent) {
    if tx.send(event).await.is_err() {
        log::warn!("Event loop is gone");
    }
    // Let the router drain the queue
    tokio::time::sleep(Duration::from_millis(20)).await;
}

fn report(controller: &Controller, tab: TabId, step: &str) {
    let gateway = controller.gateway();
    let url = gateway.tab(tab).map(|t| t.url).unwrap_or_default();
    let icon = gateway.current_icon().unwrap_or_default();
    let state = controller.state();

    println!("• {:<16} icon={:<28} url={}", step, icon.path(), url);
    println!(
        "  {:<16} odooVersion={} debugMode={:?}",
        "",
        state.odoo_version,
        state.debug_mode.as_str()
    );
}
