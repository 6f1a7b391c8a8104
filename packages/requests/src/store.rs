// ABOUTME: In-memory request store owning history, the current request, and all mutations
// ABOUTME: Enforces the lifecycle transition table and the current/history consistency invariant

use dealdraft_ai::{DocumentGenerator, DocumentType};
use dealdraft_core::{
    generate_request_id, DocumentEdit, RequestStatus, RequestSummary,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::chat::ChatThread;
use crate::error::{RequestError, Result};

/// Outcome of a status mutation. Lookup misses and illegal transitions are
/// no-ops surfaced as values, never as panics or errors.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    Applied(RequestSummary),
    Rejected {
        from: RequestStatus,
        to: RequestStatus,
    },
    NotFound,
}

/// Outcome of a draft content edit
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Saved(RequestSummary),
    ReadOnly(RequestStatus),
    NotFound,
}

#[derive(Default)]
struct StoreInner {
    /// Newest-first; entries are replaced wholesale, never mutated in place
    history: Vec<RequestSummary>,
    /// Id of the current request; always present in history when set
    current: Option<String>,
}

/// Session-scoped store for request documents.
///
/// All mutations go through this type. History and the current request live
/// behind one lock, and the current request is stored as an id into history,
/// so the two views of an entity can never diverge.
pub struct RequestStore {
    generator: DocumentGenerator,
    inner: RwLock<StoreInner>,
    chat: ChatThread,
}

impl RequestStore {
    pub fn new(generator: DocumentGenerator) -> Self {
        Self {
            generator,
            inner: RwLock::new(StoreInner::default()),
            chat: ChatThread::new(),
        }
    }

    /// Generate a document from free text and insert it as the new current
    /// draft. Total: generation falls back to heuristic synthesis, so this
    /// always yields a request.
    pub async fn create_from_text(&self, text: &str) -> RequestSummary {
        let fields = self
            .generator
            .generate(text, DocumentType::Summary, None)
            .await;

        let request = {
            let mut inner = self.inner.write().await;
            let id = loop {
                let candidate = generate_request_id();
                if !inner.history.iter().any(|r| r.id == candidate) {
                    break candidate;
                }
            };
            let request = RequestSummary::from_document(id, text, fields.clone());
            inner.history.insert(0, request.clone());
            inner.current = Some(request.id.clone());
            request
        };

        self.chat.push_user_text(text).await;
        self.chat.push_document(fields).await;

        info!("created request {} \"{}\"", request.id, request.title);
        request
    }

    /// Apply a status change if the transition table allows it.
    ///
    /// Unknown ids are silently ignored (the UI may race with stale ids);
    /// illegal transitions are rejected without mutating anything.
    pub async fn update_status(&self, id: &str, new_status: RequestStatus) -> StatusUpdate {
        let updated = {
            let mut inner = self.inner.write().await;
            let Some(pos) = inner.history.iter().position(|r| r.id == id) else {
                debug!("status update for unknown request {} ignored", id);
                return StatusUpdate::NotFound;
            };

            let from = inner.history[pos].status;
            if !from.can_transition(new_status) {
                warn!(
                    "rejected illegal transition {} -> {} for request {}",
                    from, new_status, id
                );
                return StatusUpdate::Rejected {
                    from,
                    to: new_status,
                };
            }

            let updated = inner.history[pos].with_status(new_status);
            inner.history[pos] = updated.clone();
            updated
        };

        self.chat.push_status(id, new_status).await;
        info!("request {} is now {}", id, new_status);
        StatusUpdate::Applied(updated)
    }

    /// Lookup by id, no side effects
    pub async fn get_by_id(&self, id: &str) -> Option<RequestSummary> {
        let inner = self.inner.read().await;
        inner.history.iter().find(|r| r.id == id).cloned()
    }

    /// Switch the current request to another entity in history, or clear it.
    /// Unknown ids leave the selection untouched. Returns whether it applied.
    pub async fn set_current(&self, id: Option<&str>) -> bool {
        let mut inner = self.inner.write().await;
        match id {
            None => {
                inner.current = None;
                true
            }
            Some(id) if inner.history.iter().any(|r| r.id == id) => {
                inner.current = Some(id.to_string());
                true
            }
            Some(id) => {
                debug!("set_current for unknown request {} ignored", id);
                false
            }
        }
    }

    /// The request currently displayed/edited, if any
    pub async fn current_request(&self) -> Option<RequestSummary> {
        let inner = self.inner.read().await;
        let current = inner.current.as_deref()?;
        inner.history.iter().find(|r| r.id == current).cloned()
    }

    /// Full request history, newest-first
    pub async fn history(&self) -> Vec<RequestSummary> {
        self.inner.read().await.history.clone()
    }

    /// Apply a content edit to a draft. Non-draft requests are read-only and
    /// the edit is refused without touching `last_modified`.
    pub async fn update_content(&self, id: &str, edit: &DocumentEdit) -> EditOutcome {
        let mut inner = self.inner.write().await;
        let Some(pos) = inner.history.iter().position(|r| r.id == id) else {
            debug!("content edit for unknown request {} ignored", id);
            return EditOutcome::NotFound;
        };

        let status = inner.history[pos].status;
        if !status.can_edit() {
            debug!("refused content edit for request {} in status {}", id, status);
            return EditOutcome::ReadOnly(status);
        }

        let updated = inner.history[pos].with_edit(edit);
        inner.history[pos] = updated.clone();
        EditOutcome::Saved(updated)
    }

    /// User-initiated delete; only drafts may be removed from history
    pub async fn delete_draft(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        let Some(pos) = inner.history.iter().position(|r| r.id == id) else {
            return Err(RequestError::NotFound(id.to_string()));
        };

        let status = inner.history[pos].status;
        if status != RequestStatus::Draft {
            return Err(RequestError::ActionUnavailable {
                action: "delete",
                status,
            });
        }

        inner.history.remove(pos);
        if inner.current.as_deref() == Some(id) {
            inner.current = None;
        }
        info!("deleted draft request {}", id);
        Ok(())
    }

    /// Copy a dispatched or completed request into a brand-new draft with its
    /// own id and timestamps. The source entity is left untouched.
    pub async fn repost(&self, id: &str) -> Result<RequestSummary> {
        let reposted = {
            let mut inner = self.inner.write().await;
            let Some(source) = inner.history.iter().find(|r| r.id == id).cloned() else {
                return Err(RequestError::NotFound(id.to_string()));
            };

            if !source.status.can_repost() {
                return Err(RequestError::ActionUnavailable {
                    action: "repost",
                    status: source.status,
                });
            }

            let new_id = loop {
                let candidate = generate_request_id();
                if !inner.history.iter().any(|r| r.id == candidate) {
                    break candidate;
                }
            };
            let reposted =
                RequestSummary::from_document(new_id, &source.original_text, source.repost_fields());
            inner.history.insert(0, reposted.clone());
            inner.current = Some(reposted.id.clone());
            reposted
        };

        self.chat
            .push_status(&reposted.id, RequestStatus::Draft)
            .await;
        info!("reposted request {} as new draft {}", id, reposted.id);
        Ok(reposted)
    }

    /// The assistant conversation for this session
    pub fn chat(&self) -> &ChatThread {
        &self.chat
    }

    /// Drop all session state: history, current selection, and chat log
    pub async fn reset(&self) {
        let mut inner = self.inner.write().await;
        inner.history.clear();
        inner.current = None;
        drop(inner);
        self.chat.clear().await;
    }
}
