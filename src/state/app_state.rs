//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use crate::{
    countdown::{Countdown, CountdownEvent, EventListener},
    display::{Alert, PickerError, PickerSelection},
};
use super::TimerState;

const EVENT_CAPACITY: usize = 64;

/// Application state owning the countdown and what is shown about it
#[derive(Debug)]
pub struct AppState {
    /// The countdown driven by the HTTP handlers
    pub countdown: Countdown,
    /// Current picker selection
    pub selection: Arc<Mutex<PickerSelection>>,
    /// Strong owner of the countdown's listener
    listener: Arc<EventListener>,
    /// Completion alert waiting to be dismissed
    pub alert: Arc<Mutex<Option<Alert>>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState with the countdown reset to `selection`
    pub fn new(port: u16, host: String, selection: PickerSelection, tick_interval: Duration) -> Self {
        let countdown = Countdown::with_tick_interval(selection.duration(), tick_interval);
        let listener = Arc::new(EventListener::new(EVENT_CAPACITY));
        countdown.set_listener(&listener);

        let (timer_update_tx, timer_update_rx) = watch::channel(TimerState::capture(&countdown));

        Self {
            countdown,
            selection: Arc::new(Mutex::new(selection)),
            listener,
            alert: Arc::new(Mutex::new(None)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Subscribe to countdown tick and finish events
    pub fn subscribe_events(&self) -> broadcast::Receiver<CountdownEvent> {
        self.listener.subscribe()
    }

    /// Subscribe to published timer snapshots
    pub fn subscribe_timer(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Apply a picker change, configuring the duration of the next run
    pub fn select(&self, minutes: u32, seconds: u32) -> Result<TimerState, PickerError> {
        let selection = PickerSelection::new(minutes, seconds)?;
        info!("Picker set to {}min {}sec", minutes, seconds);

        if let Ok(mut current) = self.selection.lock() {
            *current = selection;
        }
        self.countdown.set_duration(selection.duration());
        self.record_action("duration");
        Ok(self.refresh())
    }

    /// Get the current picker selection
    pub fn get_selection(&self) -> Result<PickerSelection, String> {
        self.selection.lock()
            .map(|selection| *selection)
            .map_err(|e| format!("Failed to lock picker selection: {}", e))
    }

    /// Start or resume the countdown
    pub fn start(&self) -> TimerState {
        if let Err(e) = self.dismiss_alert() {
            warn!("Failed to clear previous alert: {}", e);
        }
        self.countdown.start();
        self.record_action("start");
        self.refresh()
    }

    /// Pause the countdown
    pub fn pause(&self) -> TimerState {
        self.countdown.pause();
        self.record_action("pause");
        self.refresh()
    }

    /// Reset the countdown to the selected duration
    pub fn reset(&self) -> TimerState {
        self.countdown.reset();
        self.record_action("reset");
        self.refresh()
    }

    /// Latest published snapshot
    pub fn current_timer(&self) -> TimerState {
        self.timer_update_tx.borrow().clone()
    }

    /// Capture the countdown and publish it to timer watchers
    pub fn refresh(&self) -> TimerState {
        let timer_state = TimerState::capture(&self.countdown);

        if let Err(e) = self.timer_update_tx.send(timer_state.clone()) {
            warn!("Failed to send timer update: {}", e);
        }

        timer_state
    }

    /// Raise the completion alert
    pub fn raise_alert(&self) -> Result<Alert, String> {
        let mut alert = self.alert.lock()
            .map_err(|e| format!("Failed to lock alert: {}", e))?;

        let raised = Alert::finished();
        info!("{}: {}", raised.title, raised.message);
        *alert = Some(raised.clone());
        Ok(raised)
    }

    /// Get the pending alert, if any
    pub fn get_alert(&self) -> Result<Option<Alert>, String> {
        self.alert.lock()
            .map(|alert| alert.clone())
            .map_err(|e| format!("Failed to lock alert: {}", e))
    }

    /// Dismiss the pending alert, returning it
    pub fn dismiss_alert(&self) -> Result<Option<Alert>, String> {
        self.alert.lock()
            .map(|mut alert| alert.take())
            .map_err(|e| format!("Failed to lock alert: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
