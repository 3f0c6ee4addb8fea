//! Published snapshot of the countdown for display

use serde::{Deserialize, Serialize};

use crate::{
    countdown::{Countdown, CountdownState},
    display::format_clock,
};

/// What a screen needs to render the countdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub state: CountdownState,
    pub remaining_seconds: f64,
    /// Remaining time as `HH:MM:SS.SS`
    pub display: String,
    /// Configured duration for the next run
    pub duration_seconds: f64,
    /// The start control is disabled while a run is in progress
    pub start_enabled: bool,
}

impl TimerState {
    /// Capture the current state of a countdown
    pub fn capture(countdown: &Countdown) -> Self {
        let state = countdown.state();
        let remaining = countdown.time_remaining();
        Self {
            state,
            remaining_seconds: remaining.as_secs_f64(),
            display: format_clock(remaining),
            duration_seconds: countdown.duration().as_secs_f64(),
            start_enabled: state.can_start(),
        }
    }

    /// Check if the countdown is running
    pub fn is_active(&self) -> bool {
        self.state.is_running()
    }
}
