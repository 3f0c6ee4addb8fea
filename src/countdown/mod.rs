//! Countdown state machine module
//!
//! This module contains the timer core: the state enumeration, the listener
//! interface used to publish progress, and the `Countdown` handle itself.

pub mod listener;
pub mod state;
pub mod ticker;
pub mod timer;

// Re-export main types
pub use listener::{CountdownEvent, CountdownListener, EventListener};
pub use state::CountdownState;
pub use timer::{Countdown, DEFAULT_TICK_INTERVAL};
