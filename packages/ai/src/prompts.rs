// ABOUTME: Prompt construction for request document generation
// ABOUTME: Role-scoped system prompts and user prompts per document type

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of document the backend is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Structured request summary shown in the editor
    Summary,
    /// Client-facing proposal derived from a request
    Proposal,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Summary => write!(f, "summary"),
            DocumentType::Proposal => write!(f, "proposal"),
        }
    }
}

/// System prompt scoping the assistant's role for a given document type
pub fn system_prompt(document_type: DocumentType) -> String {
    let role = match document_type {
        DocumentType::Summary => {
            "You are a senior sales engineer who turns rough business descriptions \
             into structured, actionable request summaries."
        }
        DocumentType::Proposal => {
            "You are a senior sales engineer who writes clear, client-facing \
             project proposals from business requirements."
        }
    };

    format!(
        "{}\n\nAlways respond with a single JSON object matching the requested \
         structure. Do not add commentary outside the JSON.",
        role
    )
}

/// User prompt embedding the free text and optional extra context
pub fn document_prompt(document_type: DocumentType, text: &str, context: Option<&str>) -> String {
    let context_section = match context {
        Some(context) if !context.is_empty() => {
            format!("\nAdditional context:\n{}\n", context)
        }
        _ => String::new(),
    };

    format!(
        r#"Analyze this business description and produce a {document_type} document:

{text}
{context_section}
Respond with JSON in exactly this format:

{{
  "title": "Short descriptive project title",
  "problem": "The core business problem, 2-3 sentences",
  "impact": "What the problem costs the business today, 2-3 sentences",
  "desiredOutcome": "What success looks like, 2-3 sentences",
  "estPrice": 15000,
  "estETA": "4-6 weeks",
  "fullContent": "The complete document rendered as markdown"
}}

estPrice is a whole number of currency units. estETA is a short
delivery-window label. Be specific and grounded in the description."#
    )
}
