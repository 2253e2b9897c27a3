//! Trailing-edge debouncer for bursts of input events.
//!
//! Each call aborts the previously scheduled action, so only the last event
//! within a quiet period fires. Intermediate events are dropped, not queued.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Collapses rapid repeated triggers into one action after a quiet period
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `action` to run after the quiet period, cancelling any
    /// previously scheduled action
    pub fn call<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
