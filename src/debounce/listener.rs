//! Async click listener driving a [`BurstCounter`] off a tokio timer

use std::future::Future;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use super::burst::{Burst, BurstCounter};
use crate::config::DEFAULT_QUIET_WINDOW;
use crate::utils::{OdooDebugError, Result};

type BurstCallback<T> = Box<dyn FnMut(T, u32) -> BoxFuture<'static, ()> + Send>;

/// A click and the moment it happened
type Stamped<T> = (T, Instant);

/// Event handler that collapses rapid clicks into one callback per burst
pub struct ClickListener<T> {
    sender: UnboundedSender<Stamped<T>>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> ClickListener<T> {
    pub fn builder() -> ClickListenerBuilder<T> {
        ClickListenerBuilder::default()
    }

    /// Register a click, timestamped now. Never blocks; clicks after
    /// shutdown are dropped.
    pub fn click(&self, trigger: T) {
        if self.sender.send((trigger, Instant::now())).is_err() {
            log::trace!("Click listener stopped, dropping click");
        }
    }

    /// Stop listening; a burst still waiting for its quiet window is discarded
    pub async fn shutdown(self) {
        drop(self.sender);
        if let Err(err) = self.task.await {
            log::warn!("Click listener task failed: {}", err);
        }
    }
}

/// Configures and spawns a [`ClickListener`]
pub struct ClickListenerBuilder<T> {
    quiet_window: Duration,
    callback: Option<BurstCallback<T>>,
}

impl<T> Default for ClickListenerBuilder<T> {
    fn default() -> Self {
        Self {
            quiet_window: DEFAULT_QUIET_WINDOW,
            callback: None,
        }
    }
}

impl<T: Send + 'static> ClickListenerBuilder<T> {
    pub fn quiet_window(mut self, quiet_window: Duration) -> Self {
        self.quiet_window = quiet_window;
        self
    }

    /// Action run once per burst with the last trigger and the click count
    pub fn on_burst<F, Fut>(mut self, mut callback: F) -> Self
    where
        F: FnMut(T, u32) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.callback = Some(Box::new(move |trigger, clicks| callback(trigger, clicks).boxed()));
        self
    }

    /// Spawn the listener on the current tokio runtime
    pub fn build(self) -> Result<ClickListener<T>> {
        let callback = self
            .callback
            .ok_or_else(|| OdooDebugError::InvalidArgument("a burst callback is required".to_string()))?;
        let counter = BurstCounter::new(self.quiet_window)?;
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|err| OdooDebugError::InvalidArgument(format!("no async runtime: {}", err)))?;

        let (sender, receiver) = unbounded_channel();
        let task = runtime.spawn(drive(counter, receiver, callback));
        Ok(ClickListener { sender, task })
    }
}

async fn drive<T>(
    mut counter: BurstCounter<T>,
    mut clicks: UnboundedReceiver<Stamped<T>>,
    mut callback: BurstCallback<T>,
) {
    loop {
        let next = match counter.deadline() {
            None => clicks.recv().await,
            Some(deadline) => tokio::select! {
                biased;
                _ = time::sleep_until(deadline) => {
                    // Queued clicks are applied at their own timestamps first
                    let mut closed = Vec::new();
                    while let Ok((trigger, at)) = clicks.try_recv() {
                        closed.extend(counter.click(trigger, at).1);
                    }
                    closed.extend(counter.poll(Instant::now()));
                    for burst in closed {
                        fire(&mut callback, burst).await;
                    }
                    continue;
                }
                click = clicks.recv() => click,
            },
        };

        match next {
            Some((trigger, at)) => {
                if let (_, Some(burst)) = counter.click(trigger, at) {
                    fire(&mut callback, burst).await;
                }
            }
            None => break,
        }
    }

    if let Some(burst) = counter.cancel() {
        log::debug!("Discarding open burst of {} clicks", burst.clicks);
    }
}

async fn fire<T>(callback: &mut BurstCallback<T>, burst: Burst<T>) {
    log::trace!("Burst closed with {} clicks", burst.clicks);
    callback(burst.trigger, burst.clicks).await;
}
