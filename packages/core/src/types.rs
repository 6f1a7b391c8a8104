// ABOUTME: Core entity types for Dealdraft request documents
// ABOUTME: Defines RequestSummary, generated DocumentFields, and draft content edits

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::RequestStatus;

/// The structured document representing one user-submitted business request,
/// through its full lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummary {
    pub id: String,
    pub title: String,
    pub problem: String,
    pub impact: String,
    pub desired_outcome: String,
    /// Estimated price in whole currency units
    pub est_price: u64,
    /// Short delivery-window label, e.g. "4-6 weeks"
    pub est_eta: String,
    /// Verbatim user input the document was synthesized from; never rewritten
    pub original_text: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl RequestSummary {
    /// Build a fresh draft entity from generated document fields
    pub fn from_document(id: String, original_text: &str, fields: DocumentFields) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: fields.title,
            problem: fields.problem,
            impact: fields.impact,
            desired_outcome: fields.desired_outcome,
            est_price: fields.est_price,
            est_eta: fields.est_eta,
            original_text: original_text.to_string(),
            status: RequestStatus::Draft,
            created_at: now,
            last_modified: now,
        }
    }

    /// Replace-on-write status change; readers never observe a partial update
    pub fn with_status(&self, status: RequestStatus) -> Self {
        Self {
            status,
            last_modified: Utc::now(),
            ..self.clone()
        }
    }

    /// Replace-on-write content edit; `original_text`, `created_at`, and the
    /// status are untouched
    pub fn with_edit(&self, edit: &DocumentEdit) -> Self {
        let mut updated = self.clone();
        if let Some(title) = &edit.title {
            updated.title = title.clone();
        }
        if let Some(problem) = &edit.problem {
            updated.problem = problem.clone();
        }
        if let Some(impact) = &edit.impact {
            updated.impact = impact.clone();
        }
        if let Some(outcome) = &edit.desired_outcome {
            updated.desired_outcome = outcome.clone();
        }
        updated.last_modified = Utc::now();
        updated
    }

    /// Copy the document content for a repost draft; the new entity gets its
    /// own id and timestamps and never aliases this one
    pub fn repost_fields(&self) -> DocumentFields {
        DocumentFields {
            title: self.title.clone(),
            problem: self.problem.clone(),
            impact: self.impact.clone(),
            desired_outcome: self.desired_outcome.clone(),
            est_price: self.est_price,
            est_eta: self.est_eta.clone(),
            full_content: String::new(),
        }
    }
}

/// Document content produced by the synthesizer or the completion backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFields {
    pub title: String,
    pub problem: String,
    pub impact: String,
    pub desired_outcome: String,
    pub est_price: u64,
    pub est_eta: String,
    /// Rendered markdown body of the whole document
    pub full_content: String,
}

/// Content fields the editor may rewrite while a request is still a draft
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEdit {
    pub title: Option<String>,
    pub problem: Option<String>,
    pub impact: Option<String>,
    pub desired_outcome: Option<String>,
}

impl DocumentEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.problem.is_none()
            && self.impact.is_none()
            && self.desired_outcome.is_none()
    }

    /// Coalesce a later edit into this one; later fields win
    pub fn merge(&mut self, other: &DocumentEdit) {
        if other.title.is_some() {
            self.title = other.title.clone();
        }
        if other.problem.is_some() {
            self.problem = other.problem.clone();
        }
        if other.impact.is_some() {
            self.impact = other.impact.clone();
        }
        if other.desired_outcome.is_some() {
            self.desired_outcome = other.desired_outcome.clone();
        }
    }
}
