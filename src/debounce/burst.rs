//! Click-burst state machine with injected time

use std::time::Duration;

use tokio::time::Instant;

use crate::utils::{OdooDebugError, Result};

/// A completed burst: the last click's trigger and how many clicks it held
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Burst<T> {
    pub trigger: T,
    pub clicks: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State<T> {
    Idle,
    Counting {
        clicks: u32,
        trigger: T,
        deadline: Instant,
    },
}

/// Counts clicks until a full quiet window passes without one.
///
/// Every click restarts the window, so a burst only closes once the user
/// stops clicking. Time is passed in by the caller.
#[derive(Debug, Clone)]
pub struct BurstCounter<T> {
    quiet_window: Duration,
    state: State<T>,
}

impl<T> BurstCounter<T> {
    pub fn new(quiet_window: Duration) -> Result<Self> {
        if quiet_window.is_zero() {
            return Err(OdooDebugError::InvalidArgument(
                "quiet window must be longer than zero".to_string(),
            ));
        }
        Ok(Self {
            quiet_window,
            state: State::Idle,
        })
    }

    pub fn quiet_window(&self) -> Duration {
        self.quiet_window
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    /// Clicks counted in the open burst
    pub fn clicks(&self) -> u32 {
        match self.state {
            State::Idle => 0,
            State::Counting { clicks, .. } => clicks,
        }
    }

    /// When the open burst closes, if one is open
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            State::Idle => None,
            State::Counting { deadline, .. } => Some(deadline),
        }
    }

    /// Register a click at `now` and restart the window.
    ///
    /// A burst whose window has already elapsed by `now` is closed first and
    /// handed back; the click then opens a new one. Returns the click count
    /// of the open burst alongside it.
    pub fn click(&mut self, trigger: T, now: Instant) -> (u32, Option<Burst<T>>) {
        let expired = self.poll(now);
        let clicks = self.clicks() + 1;
        self.state = State::Counting {
            clicks,
            trigger,
            deadline: now + self.quiet_window,
        };
        (clicks, expired)
    }

    /// Close the burst if its window has elapsed by `now`
    pub fn poll(&mut self, now: Instant) -> Option<Burst<T>> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.cancel(),
            _ => None,
        }
    }

    /// Drop back to idle, handing back whatever was counted
    pub fn cancel(&mut self) -> Option<Burst<T>> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => None,
            State::Counting { clicks, trigger, .. } => Some(Burst { trigger, clicks }),
        }
    }
}
