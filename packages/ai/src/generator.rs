// ABOUTME: Document generator orchestrating the completion backend with heuristic fallback
// ABOUTME: Lenient response parsing with per-field defaults; generation never fails

use dealdraft_core::DocumentFields;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::CompletionClient;
use crate::prompts::{self, DocumentType};
use crate::synthesizer::{render_full_content, synthesize, DEFAULT_ETA};

const DEFAULT_PRICE: u64 = 10000;
const DEFAULT_TITLE: &str = "Business Request Summary";
const DEFAULT_PROBLEM: &str = "General analysis of the provided business description.";
const DEFAULT_IMPACT: &str = "Impact assessment pending further detail from the client.";
const DEFAULT_OUTCOME: &str = "A tailored solution addressing the described business need.";

/// Generates request documents from free text.
///
/// Uses the completion backend when one is configured and falls back to the
/// heuristic synthesizer on any failure, so callers always receive a usable
/// document.
pub struct DocumentGenerator {
    client: CompletionClient,
}

impl DocumentGenerator {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    /// Generate a document for `text`. Total: resolves to heuristic output
    /// rather than erroring when the backend is missing, unreachable, or
    /// returns text without a parseable JSON object.
    pub async fn generate(
        &self,
        text: &str,
        document_type: DocumentType,
        context: Option<&str>,
    ) -> DocumentFields {
        if !self.client.is_configured() {
            debug!("no completion backend configured, using heuristic synthesis");
            return synthesize(text);
        }

        let prompt = prompts::document_prompt(document_type, text, context);
        let system = Some(prompts::system_prompt(document_type));

        match self.client.complete(prompt, system).await {
            Ok(response) => match parse_document_response(&response) {
                Some(fields) => fields,
                None => {
                    warn!("completion response contained no parseable JSON object, falling back");
                    synthesize(text)
                }
            },
            Err(e) => {
                warn!("completion backend failed ({}), falling back to heuristic", e);
                synthesize(text)
            }
        }
    }
}

/// Extract the first balanced `{...}` span from free-form response text.
/// Brace characters inside JSON strings are ignored.
fn extract_json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse a backend response into document fields, substituting per-field
/// defaults for anything missing or malformed. Returns None only when no
/// JSON object can be extracted at all.
fn parse_document_response(response: &str) -> Option<DocumentFields> {
    let span = extract_json_span(response)?;
    let value: Value = serde_json::from_str(span).ok()?;
    let obj = value.as_object()?;

    let text_field = |key: &str, default: &str| -> String {
        obj.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default.to_string())
    };

    let mut fields = DocumentFields {
        title: text_field("title", DEFAULT_TITLE),
        problem: text_field("problem", DEFAULT_PROBLEM),
        impact: text_field("impact", DEFAULT_IMPACT),
        desired_outcome: text_field("desiredOutcome", DEFAULT_OUTCOME),
        est_price: coerce_price(obj.get("estPrice")),
        est_eta: text_field("estETA", DEFAULT_ETA),
        full_content: text_field("fullContent", ""),
    };
    if fields.full_content.is_empty() {
        fields.full_content = render_full_content(&fields);
    }
    Some(fields)
}

// estPrice may arrive as a number, a numeric string, or garbage
fn coerce_price(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(DEFAULT_PRICE),
        Some(Value::String(s)) => s
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse()
            .unwrap_or(DEFAULT_PRICE),
        _ => DEFAULT_PRICE,
    }
}
