//! Background Polling
//!
//! Re-fetches the board on a fixed cadence while the backend is ready.
//! The task lives exactly as long as its [`SyncTask`] handle: dropping the
//! handle aborts the task, so no timer outlives the board that owns it.

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Default time between category fetches
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Handle to a running poll loop
pub struct SyncTask {
    handle: JoinHandle<()>,
}

impl SyncTask {
    /// Spawn a loop calling `tick` every `interval`, starting one interval
    /// from now. The loop ends when `tick` returns [`ControlFlow::Break`]
    /// or the handle is dropped.
    pub fn spawn<F, Fut>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        let interval = interval.max(MIN_POLL_INTERVAL);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                tracing::debug!("Running scheduled board refresh");
                if tick().await.is_break() {
                    tracing::debug!("Board refresh loop finished");
                    break;
                }
            }
        });

        tracing::info!(interval_secs = interval.as_secs_f64(), "Started board polling");
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop polling now
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for SyncTask {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            tracing::info!("Stopping board polling");
        }
        self.handle.abort();
    }
}
