//! Countdown Timer - a countdown state machine with an HTTP control surface
//!
//! The core is [`countdown::Countdown`], which derives remaining time from the
//! instant a run started and notifies a weakly held listener on every tick and
//! once on completion. The rest of the crate wires it to a small HTTP API.

pub mod api;
pub mod config;
pub mod countdown;
pub mod display;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use countdown::{Countdown, CountdownEvent, CountdownListener, CountdownState};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
