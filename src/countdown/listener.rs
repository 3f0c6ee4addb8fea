//! Listener interface for countdown notifications

use std::time::Duration;

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

/// Receiver of countdown progress.
///
/// A countdown only ever holds a weak reference to its listener, so the
/// owner must keep the listener alive for as long as it wants notifications.
pub trait CountdownListener: Send + Sync {
    /// Called on `start()`, `reset()`, `pause()` and on every tick while running
    fn on_tick(&self, time_remaining: Duration);

    /// Called exactly once when a run completes
    fn on_finish(&self);
}

/// A single notification emitted by a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum CountdownEvent {
    Tick {
        #[serde(rename = "remaining_seconds", serialize_with = "as_secs_f64")]
        remaining: Duration,
    },
    Finished,
}

fn as_secs_f64<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Listener that forwards every notification onto a broadcast channel
#[derive(Debug)]
pub struct EventListener {
    tx: broadcast::Sender<CountdownEvent>,
}

impl EventListener {
    /// Create a listener with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to forwarded events
    pub fn subscribe(&self) -> broadcast::Receiver<CountdownEvent> {
        self.tx.subscribe()
    }

    fn forward(&self, event: CountdownEvent) {
        // No subscribers is not an error, the event is simply dropped
        if self.tx.send(event).is_err() {
            debug!("No subscribers for countdown event {:?}", event);
        }
    }
}

impl CountdownListener for EventListener {
    fn on_tick(&self, time_remaining: Duration) {
        self.forward(CountdownEvent::Tick { remaining: time_remaining });
    }

    fn on_finish(&self) {
        self.forward(CountdownEvent::Finished);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_to_subscribers() {
        let listener = EventListener::new(8);
        let mut rx = listener.subscribe();

        listener.on_tick(Duration::from_secs(3));
        listener.on_finish();

        assert_eq!(
            rx.try_recv().unwrap(),
            CountdownEvent::Tick { remaining: Duration::from_secs(3) }
        );
        assert_eq!(rx.try_recv().unwrap(), CountdownEvent::Finished);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn forwarding_without_subscribers_is_silent() {
        let listener = EventListener::new(1);
        listener.on_tick(Duration::ZERO);
        listener.on_finish();
    }

    #[test]
    fn tick_event_serializes_seconds() {
        let json = serde_json::to_value(CountdownEvent::Tick {
            remaining: Duration::from_millis(2500),
        })
        .unwrap();
        assert_eq!(json["event"], "tick");
        assert_eq!(json["remaining_seconds"], 2.5);
    }
}
