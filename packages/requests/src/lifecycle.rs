// ABOUTME: Lifecycle engine driving send/confirm/cancel/repost on top of the store
// ABOUTME: Owns the cancellable per-request timer simulating the sent -> processing handoff

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use dealdraft_core::{RequestStatus, RequestSummary};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::Result;
use crate::store::{RequestStore, StatusUpdate};

const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_secs(2);

/// Orchestrates status transitions for the UI.
///
/// Legality is enforced by the store; this layer adds the timer that moves a
/// sent request to processing after a simulated matching delay, and keeps the
/// timer handle per request id so a cancel mid-flight can abort it.
pub struct LifecycleEngine {
    store: Arc<RequestStore>,
    processing_delay: Duration,
    timers: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl LifecycleEngine {
    pub fn new(store: Arc<RequestStore>) -> Self {
        Self::with_processing_delay(store, DEFAULT_PROCESSING_DELAY)
    }

    pub fn with_processing_delay(store: Arc<RequestStore>, processing_delay: Duration) -> Self {
        Self {
            store,
            processing_delay,
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Send a draft. On success the request moves to `sent` immediately and
    /// a timer advances it to `processing` after the matching delay.
    pub async fn send(&self, id: &str) -> StatusUpdate {
        let outcome = self.store.update_status(id, RequestStatus::Sent).await;
        if matches!(outcome, StatusUpdate::Applied(_)) {
            self.schedule_processing(id.to_string()).await;
        }
        outcome
    }

    /// Mark a draft as confirmed; gates like `sent` but displays distinctly
    pub async fn confirm(&self, id: &str) -> StatusUpdate {
        self.store.update_status(id, RequestStatus::Confirmed).await
    }

    /// Cancel a request. Aborts any pending processing timer first so the
    /// simulated handoff cannot race the cancellation.
    pub async fn cancel(&self, id: &str) -> StatusUpdate {
        if let Some(handle) = self.timers.lock().await.remove(id) {
            debug!("aborting pending processing timer for request {}", id);
            handle.abort();
        }
        self.store.update_status(id, RequestStatus::Cancelled).await
    }

    /// Mark a processing request as completed
    pub async fn complete(&self, id: &str) -> StatusUpdate {
        self.store.update_status(id, RequestStatus::Completed).await
    }

    /// Copy a dispatched/completed request into a fresh draft
    pub async fn repost(&self, id: &str) -> Result<RequestSummary> {
        self.store.repost(id).await
    }

    /// Whether a processing timer is still pending for `id`
    pub async fn has_pending_timer(&self, id: &str) -> bool {
        self.timers
            .lock()
            .await
            .get(id)
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    async fn schedule_processing(&self, id: String) {
        let store = Arc::clone(&self.store);
        let timers = Arc::clone(&self.timers);
        let delay = self.processing_delay;
        let task_id = id.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The store rejects the transition if the request was cancelled
            // between the abort and this wakeup
            store
                .update_status(&task_id, RequestStatus::Processing)
                .await;
            timers.lock().await.remove(&task_id);
        });

        if let Some(previous) = self.timers.lock().await.insert(id, handle) {
            previous.abort();
        }
    }
}
