//! Caller-side display helpers
//!
//! Picker ranges, the remaining-time clock string and the completion alert
//! shown when a countdown finishes.

pub mod alert;
pub mod clock;
pub mod picker;

// Re-export main types
pub use alert::Alert;
pub use clock::format_clock;
pub use picker::{picker_columns, PickerError, PickerSelection};
