//! Click debouncing
//!
//! [`BurstCounter`] is the pure {idle, counting} state machine; it never reads
//! the clock. [`ClickListener`] feeds it from a channel and closes bursts on a
//! tokio timer, so tests can drive it with paused time.

mod burst;
mod listener;

pub use burst::{Burst, BurstCounter};
pub use listener::{ClickListener, ClickListenerBuilder};
