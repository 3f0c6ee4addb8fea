//! Periodic tick source for a running countdown

use std::{future::Future, ops::ControlFlow, time::Duration};
use tokio::{
    task::AbortHandle,
    time::{interval_at, sleep_until, Instant, MissedTickBehavior},
};

/// Owns a spawned tick task and aborts it when dropped.
///
/// Aborting a task that already completed is a no-op, so cancellation is
/// idempotent no matter how the guard is released.
#[derive(Debug)]
pub struct TickGuard {
    handle: AbortHandle,
}

impl TickGuard {
    fn spawn<F>(task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(task).abort_handle(),
        }
    }

    /// Check if the tick task has stopped
    #[cfg(test)]
    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn a ticker calling `on_tick` every `period` and once more at `deadline`.
///
/// The loop stops as soon as `on_tick` returns `ControlFlow::Break`. Late or
/// missed ticks are skipped rather than replayed in a burst.
pub fn spawn_ticker<F>(deadline: Instant, period: Duration, mut on_tick: F) -> TickGuard
where
    F: FnMut() -> ControlFlow<()> + Send + 'static,
{
    TickGuard::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let expiry = sleep_until(deadline);
        tokio::pin!(expiry);
        let mut expired = false;

        loop {
            tokio::select! {
                biased;
                _ = &mut expiry, if !expired => expired = true,
                _ = interval.tick() => {}
            }

            if on_tick().is_break() {
                break;
            }
        }
    })
}
