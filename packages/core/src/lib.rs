// ABOUTME: Core types and lifecycle rules for Dealdraft
// ABOUTME: Foundational package shared by the ai, requests, and editor packages

pub mod status;
pub mod types;
pub mod utils;

// Re-export main types
pub use status::RequestStatus;
pub use types::{DocumentEdit, DocumentFields, RequestSummary};

// Re-export utilities
pub use utils::generate_request_id;
