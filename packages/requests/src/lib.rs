// ABOUTME: Dealdraft requests library - request store and lifecycle engine
// ABOUTME: Owns request history, the current request, status transitions, and the assistant thread

pub mod chat;
pub mod error;
pub mod lifecycle;
pub mod store;

pub use chat::{ChatMessage, ChatThread, MessageContent, MessageRole};
pub use error::{RequestError, Result};
pub use lifecycle::LifecycleEngine;
pub use store::{EditOutcome, RequestStore, StatusUpdate};
