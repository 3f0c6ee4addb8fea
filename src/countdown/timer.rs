//! Countdown timer state machine
//!
//! ```text
//!            start()                 elapsed >= duration
//!  Reset ─────────────► Started ─────────────────────────► Finished
//!    ▲                   │   ▲                                │
//!    │          pause()  │   │ start()                        │ start()
//!    │                   ▼   │                                ▼
//!    │                   Paused                            Started
//!    │
//!    └──────────────────── reset() (from any state) ──────────────
//! ```
//!
//! Remaining time is always derived from the instant the current run started,
//! never from the number of ticks seen, so delayed or skipped ticks do not
//! accumulate drift.

use std::{
    fmt,
    ops::ControlFlow,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};
use tokio::time::Instant;
use tracing::{debug, info};

use super::{
    listener::CountdownListener,
    state::CountdownState,
    ticker::{spawn_ticker, TickGuard},
};

/// Default period between progress notifications
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// A single countdown driven by a periodic tick task.
///
/// All transitions are serialized behind one mutex. Listener notifications are
/// delivered after the lock is released, so a listener may call back into the
/// countdown. Notification order matches transition order only on a
/// single-threaded runtime. `start()` needs a tokio runtime because the
/// ticker is a spawned task; dropping the countdown cancels that task.
pub struct Countdown {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    duration: Duration,
    tick_interval: Duration,
    phase: Phase,
    listener: Option<Weak<dyn CountdownListener>>,
    runs: u64,
}

enum Phase {
    Reset,
    Running(Run),
    Paused { remaining: Duration },
    Finished,
}

/// One run from `start()` until it finishes, pauses or is reset
struct Run {
    id: u64,
    started_at: Instant,
    /// Duration captured when the run started
    length: Duration,
    _ticker: TickGuard,
}

impl Run {
    fn remaining(&self, now: Instant) -> Duration {
        self.length
            .saturating_sub(now.saturating_duration_since(self.started_at))
    }
}

enum Notice {
    Tick(Duration),
    Finish,
}

impl Notice {
    fn deliver(self, listener: Option<Arc<dyn CountdownListener>>) {
        // A listener that has gone away is treated as not registered
        let Some(listener) = listener else { return };
        match self {
            Notice::Tick(remaining) => listener.on_tick(remaining),
            Notice::Finish => listener.on_finish(),
        }
    }
}

impl Inner {
    fn listener(&self) -> Option<Arc<dyn CountdownListener>> {
        self.listener.as_ref().and_then(Weak::upgrade)
    }

    fn state(&self) -> CountdownState {
        match self.phase {
            Phase::Reset => CountdownState::Reset,
            Phase::Running(_) => CountdownState::Started,
            Phase::Paused { .. } => CountdownState::Paused,
            Phase::Finished => CountdownState::Finished,
        }
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    // Listener code never runs under this lock, so a poisoned guard still
    // holds a consistent state
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Countdown {
    /// Create a countdown in the `Reset` state with the default tick interval
    pub fn new(duration: Duration) -> Self {
        Self::with_tick_interval(duration, DEFAULT_TICK_INTERVAL)
    }

    /// Create a countdown with a custom tick interval
    pub fn with_tick_interval(duration: Duration, tick_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                duration,
                tick_interval: tick_interval.max(MIN_TICK_INTERVAL),
                phase: Phase::Reset,
                listener: None,
                runs: 0,
            })),
        }
    }

    /// Register the listener for tick and finish notifications.
    ///
    /// Only a weak reference is kept; once the caller drops its `Arc` the
    /// notifications are silently discarded.
    pub fn set_listener<L>(&self, listener: &Arc<L>)
    where
        L: CountdownListener + 'static,
    {
        let weak: Weak<L> = Arc::downgrade(listener);
        let weak: Weak<dyn CountdownListener> = weak;
        lock(&self.inner).listener = Some(weak);
    }

    /// Remove the registered listener
    #[cfg(test)]
    pub(crate) fn clear_listener(&self) {
        lock(&self.inner).listener = None;
    }

    /// Configured duration used by the next run
    pub fn duration(&self) -> Duration {
        lock(&self.inner).duration
    }

    /// Change the configured duration.
    ///
    /// A run already in progress keeps the duration it captured at `start()`.
    pub fn set_duration(&self, duration: Duration) {
        let mut inner = lock(&self.inner);
        inner.duration = duration;
        match inner.phase {
            Phase::Running(_) | Phase::Paused { .. } => {
                debug!("Duration set to {:?}, applies to the next run", duration)
            }
            _ => debug!("Duration set to {:?}", duration),
        }
    }

    /// Period between progress notifications while running
    pub fn tick_interval(&self) -> Duration {
        lock(&self.inner).tick_interval
    }

    /// Current state of the machine
    pub fn state(&self) -> CountdownState {
        lock(&self.inner).state()
    }

    /// Time left in the current run, or the configured duration when reset
    pub fn time_remaining(&self) -> Duration {
        let inner = lock(&self.inner);
        match &inner.phase {
            Phase::Reset => inner.duration,
            Phase::Running(run) => run.remaining(Instant::now()),
            Phase::Paused { remaining } => *remaining,
            Phase::Finished => Duration::ZERO,
        }
    }

    /// Instant the current run started, if one is running
    pub fn started_at(&self) -> Option<Instant> {
        match &lock(&self.inner).phase {
            Phase::Running(run) => Some(run.started_at),
            _ => None,
        }
    }

    /// Start a run, or resume a paused one.
    ///
    /// Emits an immediate tick with the full remaining time. A zero-length run
    /// finishes on the spot without any tick. Calling this while running does
    /// nothing.
    pub fn start(&self) {
        let (listener, notice) = {
            let mut inner = lock(&self.inner);
            let length = match &inner.phase {
                Phase::Running(_) => {
                    debug!("Countdown already running, ignoring start");
                    return;
                }
                Phase::Paused { remaining } => *remaining,
                Phase::Reset | Phase::Finished => inner.duration,
            };

            if length.is_zero() {
                info!("Countdown started with nothing remaining, finishing immediately");
                inner.phase = Phase::Finished;
                (inner.listener(), Notice::Finish)
            } else {
                inner.runs += 1;
                let id = inner.runs;
                let started_at = Instant::now();
                let weak = Arc::downgrade(&self.inner);
                let ticker = spawn_ticker(started_at + length, inner.tick_interval, move || {
                    Self::tick_fired(&weak, id)
                });

                info!("Countdown run {} started for {:?}", id, length);
                inner.phase = Phase::Running(Run {
                    id,
                    started_at,
                    length,
                    _ticker: ticker,
                });
                (inner.listener(), Notice::Tick(length))
            }
        };

        notice.deliver(listener);
    }

    /// Freeze a running countdown, keeping its remaining time
    pub fn pause(&self) {
        let (listener, notice) = {
            let mut inner = lock(&self.inner);
            let remaining = match &inner.phase {
                Phase::Running(run) => run.remaining(Instant::now()),
                _ => {
                    debug!("Countdown not running, ignoring pause");
                    return;
                }
            };

            if remaining.is_zero() {
                info!("Countdown reached zero while pausing, finishing");
                inner.phase = Phase::Finished;
                (inner.listener(), Notice::Finish)
            } else {
                info!("Countdown paused with {:?} remaining", remaining);
                inner.phase = Phase::Paused { remaining };
                (inner.listener(), Notice::Tick(remaining))
            }
        };

        notice.deliver(listener);
    }

    /// Return to the configured duration from any state.
    ///
    /// Stops the ticker if one is running and republishes the duration.
    pub fn reset(&self) {
        let (listener, duration) = {
            let mut inner = lock(&self.inner);
            if !matches!(inner.phase, Phase::Reset) {
                info!("Countdown reset from {:?}", inner.state());
            }
            inner.phase = Phase::Reset;
            (inner.listener(), inner.duration)
        };

        Notice::Tick(duration).deliver(listener);
    }

    fn tick_fired(inner: &Weak<Mutex<Inner>>, run_id: u64) -> ControlFlow<()> {
        let Some(inner) = inner.upgrade() else {
            return ControlFlow::Break(());
        };

        let (listener, notice) = {
            let mut guard = lock(&inner);
            let remaining = match &guard.phase {
                Phase::Running(run) if run.id == run_id => run.remaining(Instant::now()),
                _ => return ControlFlow::Break(()),
            };

            if remaining.is_zero() {
                info!("Countdown run {} finished", run_id);
                // Drops the run and with it this ticker's guard
                guard.phase = Phase::Finished;
                (guard.listener(), Notice::Finish)
            } else {
                (guard.listener(), Notice::Tick(remaining))
            }
        };

        let finished = matches!(notice, Notice::Finish);
        notice.deliver(listener);

        if finished {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl fmt::Debug for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("Countdown")
            .field("duration", &inner.duration)
            .field("tick_interval", &inner.tick_interval)
            .field("state", &inner.state())
            .finish()
    }
}
