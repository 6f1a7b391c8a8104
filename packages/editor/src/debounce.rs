// ABOUTME: Cancellable debounce timer wrapping the pending-task-and-abort pattern
// ABOUTME: Reusable independent of the editor; schedule() replaces any pending run

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Delay-and-coalesce timer: `schedule` arms a run after the configured
/// delay, replacing (not queuing behind) any run still pending. Classic
/// debounce, not throttle.
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

    /// Arm `work` to run after the delay, cancelling any previously armed run
    pub fn schedule<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            work.await;
        }));
    }

    /// Drop the pending run, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a run is armed and has not finished
    pub fn is_armed(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
