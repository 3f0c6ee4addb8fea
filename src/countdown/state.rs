//! Countdown state enumeration

use serde::{Deserialize, Serialize};

/// Externally visible state of a countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    /// Idle, showing the configured duration
    #[default]
    Reset,
    /// Running; the ticker is active
    Started,
    /// Stopped part way through, remaining time frozen
    Paused,
    /// Ran to completion
    Finished,
}

impl CountdownState {
    /// Whether `start()` would begin or resume a run from this state
    pub fn can_start(&self) -> bool {
        !matches!(self, CountdownState::Started)
    }

    /// Check if the countdown is currently running
    pub fn is_running(&self) -> bool {
        matches!(self, CountdownState::Started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&CountdownState::Finished).unwrap();
        assert_eq!(json, "\"finished\"");
        let back: CountdownState = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(back, CountdownState::Paused);
    }

    #[test]
    fn only_started_blocks_start() {
        assert!(CountdownState::Reset.can_start());
        assert!(CountdownState::Paused.can_start());
        assert!(CountdownState::Finished.can_start());
        assert!(!CountdownState::Started.can_start());
    }
}
