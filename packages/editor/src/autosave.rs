// ABOUTME: Autosave controller debouncing draft edits into the request store
// ABOUTME: Exposes the idle -> saving -> saved -> idle indicator cycle over a watch channel

use std::sync::Arc;
use std::time::Duration;

use dealdraft_core::DocumentEdit;
use dealdraft_requests::{EditOutcome, RequestStore};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};
use tracing::debug;

use crate::debounce::Debouncer;

/// Save indicator state shown next to the editable document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveState {
    Idle,
    Saving,
    Saved,
}

/// Timing knobs for the autosave cycle
#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    /// Quiet period after the last edit before a save fires
    pub debounce: Duration,
    /// Simulated duration of the save operation itself
    pub save_delay: Duration,
    /// How long the `saved` indicator lingers before reverting to idle
    pub saved_hold: Duration,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_secs(1),
            save_delay: Duration::from_millis(500),
            saved_hold: Duration::from_secs(2),
        }
    }
}

#[derive(Default)]
struct PendingEdit {
    edit: DocumentEdit,
    // Bumped on every recorded edit; a completed save only clears the buffer
    // when no newer edit arrived while it was writing
    generation: u64,
}

/// Coalesces edit events into debounced writes through the store.
///
/// Edits against non-draft requests are refused here as defense-in-depth even
/// when the surface is already read-only; the store refuses them again.
pub struct AutosaveController {
    store: Arc<RequestStore>,
    config: AutosaveConfig,
    debouncer: Debouncer,
    pending: Arc<Mutex<PendingEdit>>,
    state_tx: watch::Sender<SaveState>,
    // Held so state updates always have a live receiver
    state_rx: watch::Receiver<SaveState>,
}

impl AutosaveController {
    pub fn new(store: Arc<RequestStore>) -> Self {
        Self::with_config(store, AutosaveConfig::default())
    }

    pub fn with_config(store: Arc<RequestStore>, config: AutosaveConfig) -> Self {
        let (state_tx, state_rx) = watch::channel(SaveState::Idle);
        Self {
            store,
            debouncer: Debouncer::new(config.debounce),
            config,
            pending: Arc::new(Mutex::new(PendingEdit::default())),
            state_tx,
            state_rx,
        }
    }

    /// Current indicator state
    pub fn save_state(&self) -> SaveState {
        *self.state_rx.borrow()
    }

    /// Watch the indicator cycle
    pub fn subscribe(&self) -> watch::Receiver<SaveState> {
        self.state_tx.subscribe()
    }

    /// Record an edit event for `id`. Returns false when the edit is refused
    /// (empty edit, unknown id, or the request is no longer a draft).
    pub async fn record_edit(&mut self, id: &str, edit: DocumentEdit) -> bool {
        if edit.is_empty() {
            return false;
        }

        let editable = match self.store.get_by_id(id).await {
            Some(request) => request.status.can_edit(),
            None => false,
        };
        if !editable {
            debug!("ignoring edit for non-draft or unknown request {}", id);
            return false;
        }

        {
            let mut pending = self.pending.lock().await;
            pending.edit.merge(&edit);
            pending.generation += 1;
        }

        let store = Arc::clone(&self.store);
        let pending = Arc::clone(&self.pending);
        let state_tx = self.state_tx.clone();
        let id = id.to_string();
        let save_delay = self.config.save_delay;
        let saved_hold = self.config.saved_hold;

        self.debouncer.schedule(async move {
            let (edit, generation) = {
                let pending = pending.lock().await;
                (pending.edit.clone(), pending.generation)
            };
            if edit.is_empty() {
                return;
            }

            let _ = state_tx.send(SaveState::Saving);
            tokio::time::sleep(save_delay).await;

            match store.update_content(&id, &edit).await {
                EditOutcome::Saved(_) => {
                    {
                        let mut pending = pending.lock().await;
                        if pending.generation == generation {
                            pending.edit = DocumentEdit::default();
                        }
                    }
                    let _ = state_tx.send(SaveState::Saved);

                    tokio::time::sleep(saved_hold).await;
                    // A new edit may already have flipped the indicator back
                    // to saving; only a lingering `saved` reverts to idle
                    state_tx.send_if_modified(|state| {
                        if *state == SaveState::Saved {
                            *state = SaveState::Idle;
                            true
                        } else {
                            false
                        }
                    });
                }
                outcome => {
                    debug!("autosave write refused for request {}: {:?}", id, outcome);
                    let _ = state_tx.send(SaveState::Idle);
                }
            }
        });

        true
    }

    /// Drop any scheduled save, e.g. when the surface unloads the document
    pub fn cancel_pending(&mut self) {
        self.debouncer.cancel();
    }
}
