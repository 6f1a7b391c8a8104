// ABOUTME: Assistant chat thread types for the request workflow
// ABOUTME: Message content is a closed tagged union, not a dynamic payload bag

use chrono::{DateTime, Utc};
use dealdraft_core::{generate_request_id, DocumentFields, RequestStatus};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Role of the message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// What a chat message carries; the closed set of payload variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessageContent {
    /// Plain conversational text
    Text { text: String },
    /// A generated request document presented inline
    Document { document: DocumentFields },
    /// A lifecycle notice for a request
    Status {
        request_id: String,
        status: RequestStatus,
    },
}

/// A message in the assistant thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: MessageRole, content: MessageContent) -> Self {
        Self {
            id: generate_request_id(),
            role,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Session-scoped conversation log, appended to as requests are created and
/// move through the lifecycle
#[derive(Debug, Default)]
pub struct ChatThread {
    messages: RwLock<Vec<ChatMessage>>,
}

impl ChatThread {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_user_text(&self, text: &str) {
        self.push(ChatMessage::new(
            MessageRole::User,
            MessageContent::Text {
                text: text.to_string(),
            },
        ))
        .await;
    }

    pub async fn push_assistant_text(&self, text: &str) {
        self.push(ChatMessage::new(
            MessageRole::Assistant,
            MessageContent::Text {
                text: text.to_string(),
            },
        ))
        .await;
    }

    pub async fn push_document(&self, document: DocumentFields) {
        self.push(ChatMessage::new(
            MessageRole::Assistant,
            MessageContent::Document { document },
        ))
        .await;
    }

    pub async fn push_status(&self, request_id: &str, status: RequestStatus) {
        self.push(ChatMessage::new(
            MessageRole::System,
            MessageContent::Status {
                request_id: request_id.to_string(),
                status,
            },
        ))
        .await;
    }

    async fn push(&self, message: ChatMessage) {
        self.messages.write().await.push(message);
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.read().await.clone()
    }

    pub async fn clear(&self) {
        self.messages.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_thread_appends_in_order() {
        let thread = ChatThread::new();
        thread.push_user_text("hello").await;
        thread.push_assistant_text("hi there").await;
        thread.push_status("abc123XY", RequestStatus::Sent).await;

        let messages = thread.messages().await;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(
            messages[2].content,
            MessageContent::Status {
                request_id: "abc123XY".to_string(),
                status: RequestStatus::Sent,
            }
        );
    }

    #[test]
    fn test_content_serializes_with_kind_tag() {
        let content = MessageContent::Status {
            request_id: "abc123XY".to_string(),
            status: RequestStatus::Processing,
        };
        let json = serde_json::to_string(&content).unwrap();

        assert!(json.contains("\"kind\":\"status\""));
        assert!(json.contains("\"processing\""));

        let text = MessageContent::Text {
            text: "plain".to_string(),
        };
        let json = serde_json::to_string(&text).unwrap();
        assert!(json.contains("\"kind\":\"text\""));
    }
}
