//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod display_update;

// Re-export main functions
pub use display_update::display_update_task;
