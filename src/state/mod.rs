//! State management module
//!
//! This module holds the application state that owns the countdown and the
//! snapshot published to HTTP clients.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::TimerState;
