//! Completion alert content

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The dialog raised when a countdown finishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
    /// Label of the dismiss action
    pub action: String,
    pub raised_at: DateTime<Utc>,
}

impl Alert {
    /// Alert for a countdown that ran to completion
    pub fn finished() -> Self {
        Self {
            title: "Timer Finished".to_string(),
            message: "Your countdown is over :D".to_string(),
            action: "Okay".to_string(),
            raised_at: Utc::now(),
        }
    }
}
