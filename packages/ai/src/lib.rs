// ABOUTME: Dealdraft AI package - completion backend integration and heuristic fallback
// ABOUTME: Turns free-text business descriptions into structured request documents

pub mod client;
pub mod generator;
pub mod prompts;
pub mod synthesizer;

pub use client::{CompletionClient, CompletionError, CompletionResult};
pub use generator::DocumentGenerator;
pub use prompts::DocumentType;
pub use synthesizer::synthesize;
