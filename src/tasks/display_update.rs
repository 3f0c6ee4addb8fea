//! Display update background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::{
    countdown::{CountdownEvent, CountdownState},
    state::AppState,
};

/// Background task that refreshes the published timer on every countdown event
/// and raises the completion alert when a run finishes
pub async fn display_update_task(state: Arc<AppState>) {
    info!("Starting display update task");

    let mut events = state.subscribe_events();

    loop {
        match events.recv().await {
            Ok(CountdownEvent::Tick { remaining }) => {
                debug!("Countdown tick: {:?} remaining", remaining);
                state.refresh();
            }
            Ok(CountdownEvent::Finished) => {
                info!("Countdown finished");
                if let Err(e) = state.raise_alert() {
                    error!("Failed to raise completion alert: {}", e);
                }
                state.refresh();
            }
            Err(RecvError::Lagged(missed)) => {
                warn!("Display update task lagged, skipped {} events", missed);
                let timer_state = state.refresh();

                // The finish event may have been among the skipped ones
                if timer_state.state == CountdownState::Finished {
                    match state.get_alert() {
                        Ok(None) => {
                            if let Err(e) = state.raise_alert() {
                                error!("Failed to raise completion alert: {}", e);
                            }
                        }
                        Ok(Some(_)) => {}
                        Err(e) => error!("{}", e),
                    }
                }
            }
            Err(RecvError::Closed) => {
                info!("Countdown event channel closed, stopping display update task");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::PickerSelection;
    use std::time::Duration;
    use tokio::time::sleep;

    fn spawn_app(seconds: u32) -> Arc<AppState> {
        let state = Arc::new(AppState::new(
            20554,
            "127.0.0.1".to_string(),
            PickerSelection::new(0, seconds).unwrap(),
            Duration::from_millis(100),
        ));
        tokio::spawn(display_update_task(Arc::clone(&state)));
        state
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_progress_while_running() {
        let state = spawn_app(5);
        let rx = state.subscribe_timer();
        tokio::task::yield_now().await;

        state.start();
        sleep(Duration::from_millis(2050)).await;

        let timer = rx.borrow().clone();
        assert_eq!(timer.state, CountdownState::Started);
        assert_eq!(timer.display, "00:00:03.00");
        assert_eq!(state.get_alert().unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn raises_alert_on_finish() {
        let state = spawn_app(2);
        let rx = state.subscribe_timer();
        tokio::task::yield_now().await;

        state.start();
        sleep(Duration::from_secs(3)).await;

        let alert = state.get_alert().unwrap().expect("alert raised");
        assert_eq!(alert.title, "Timer Finished");
        assert_eq!(alert.message, "Your countdown is over :D");

        let timer = rx.borrow().clone();
        assert_eq!(timer.state, CountdownState::Finished);
        assert_eq!(timer.display, "00:00:00.00");
        assert!(timer.start_enabled);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_length_run_raises_alert() {
        let state = spawn_app(0);
        tokio::task::yield_now().await;

        state.start();
        sleep(Duration::from_millis(10)).await;

        assert!(state.get_alert().unwrap().is_some());
    }
}
