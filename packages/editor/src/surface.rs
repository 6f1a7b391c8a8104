// ABOUTME: Editable rendering of the current request synchronized with the store
// ABOUTME: Field edits flow through the autosave controller; non-draft documents are read-only

use std::sync::Arc;

use dealdraft_ai::synthesizer::render_full_content;
use dealdraft_core::{DocumentEdit, DocumentFields, RequestStatus, RequestSummary};
use dealdraft_requests::RequestStore;
use tracing::debug;

use crate::autosave::{AutosaveController, SaveState};

/// Content fields the surface exposes for in-place editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    Title,
    Problem,
    Impact,
    DesiredOutcome,
}

#[derive(Debug, Clone)]
struct LoadedDocument {
    id: String,
    status: RequestStatus,
    title: String,
    problem: String,
    impact: String,
    desired_outcome: String,
    est_price: u64,
    est_eta: String,
}

impl LoadedDocument {
    fn from_request(request: &RequestSummary) -> Self {
        Self {
            id: request.id.clone(),
            status: request.status,
            title: request.title.clone(),
            problem: request.problem.clone(),
            impact: request.impact.clone(),
            desired_outcome: request.desired_outcome.clone(),
            est_price: request.est_price,
            est_eta: request.est_eta.clone(),
        }
    }
}

/// Editable view of the current request.
///
/// The rich-text widget itself is external; this type is the synchronization
/// layer between whatever renders the document and the request store.
pub struct DocumentSurface {
    store: Arc<RequestStore>,
    controller: AutosaveController,
    loaded: Option<LoadedDocument>,
}

impl DocumentSurface {
    pub fn new(store: Arc<RequestStore>) -> Self {
        let controller = AutosaveController::new(Arc::clone(&store));
        Self::with_controller(store, controller)
    }

    pub fn with_controller(store: Arc<RequestStore>, controller: AutosaveController) -> Self {
        Self {
            store,
            controller,
            loaded: None,
        }
    }

    /// Load the store's current request into the surface. Returns whether a
    /// document is now loaded. Any pending save for the previous document is
    /// dropped.
    pub async fn load_current(&mut self) -> bool {
        self.controller.cancel_pending();
        self.loaded = self
            .store
            .current_request()
            .await
            .as_ref()
            .map(LoadedDocument::from_request);
        self.loaded.is_some()
    }

    /// Re-read the loaded document's entity, picking up status changes made
    /// elsewhere (send, cancel, the processing timer)
    pub async fn refresh(&mut self) {
        let Some(id) = self.loaded.as_ref().map(|doc| doc.id.clone()) else {
            return;
        };
        self.loaded = self
            .store
            .get_by_id(&id)
            .await
            .as_ref()
            .map(LoadedDocument::from_request);
    }

    /// Id of the loaded document, if any
    pub fn loaded_id(&self) -> Option<&str> {
        self.loaded.as_ref().map(|doc| doc.id.as_str())
    }

    /// The surface is read-only whenever nothing is loaded or the loaded
    /// request has left draft
    pub fn is_read_only(&self) -> bool {
        self.loaded
            .as_ref()
            .map(|doc| !doc.status.can_edit())
            .unwrap_or(true)
    }

    /// Apply an in-place edit to one field. Updates the local rendering
    /// immediately and schedules a debounced save. Returns false when the
    /// surface is read-only and the edit was dropped.
    pub async fn set_field(&mut self, field: EditableField, value: &str) -> bool {
        if self.is_read_only() {
            debug!("dropping edit on read-only surface");
            return false;
        }
        let Some(doc) = self.loaded.as_mut() else {
            return false;
        };

        let mut edit = DocumentEdit::default();
        match field {
            EditableField::Title => {
                doc.title = value.to_string();
                edit.title = Some(value.to_string());
            }
            EditableField::Problem => {
                doc.problem = value.to_string();
                edit.problem = Some(value.to_string());
            }
            EditableField::Impact => {
                doc.impact = value.to_string();
                edit.impact = Some(value.to_string());
            }
            EditableField::DesiredOutcome => {
                doc.desired_outcome = value.to_string();
                edit.desired_outcome = Some(value.to_string());
            }
        }

        let id = doc.id.clone();
        self.controller.record_edit(&id, edit).await
    }

    /// Current autosave indicator state
    pub fn save_state(&self) -> SaveState {
        self.controller.save_state()
    }

    /// Render the loaded document as markdown, the read-only download view
    pub fn export_markdown(&self) -> Option<String> {
        let doc = self.loaded.as_ref()?;
        let fields = DocumentFields {
            title: doc.title.clone(),
            problem: doc.problem.clone(),
            impact: doc.impact.clone(),
            desired_outcome: doc.desired_outcome.clone(),
            est_price: doc.est_price,
            est_eta: doc.est_eta.clone(),
            full_content: String::new(),
        };
        Some(render_full_content(&fields))
    }
}
