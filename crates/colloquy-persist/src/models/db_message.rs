use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Database-agnostic message model
///
/// One conversational turn. Messages are immutable once stored; the memory
/// subsystem only ever reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DBMessage {
    pub id: String,
    pub thread_id: String,
    pub role: MessageRole,
    pub message_type: MessageType,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl DBMessage {
    pub fn new(thread_id: impl Into<String>, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            thread_id: thread_id.into(),
            role,
            message_type: MessageType::Text,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(thread_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(thread_id, MessageRole::User, content)
    }

    pub fn assistant(thread_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(thread_id, MessageRole::Assistant, content)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_type(mut self, message_type: MessageType) -> Self {
        self.message_type = message_type;
        self
    }

    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Plain text or one of the rich-content markers the chat UI renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Text,
    Chart,
    Table,
    Document,
    Image,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Chart => "chart",
            Self::Table => "table",
            Self::Document => "document",
            Self::Image => "image",
        }
    }

    pub fn is_rich(&self) -> bool {
        !matches!(self, Self::Text)
    }
}

// Conversion: DBMessage → colloquy_llm::Message
impl From<DBMessage> for colloquy_llm::Message {
    fn from(msg: DBMessage) -> Self {
        match msg.role {
            MessageRole::User => colloquy_llm::Message::human(msg.content),
            MessageRole::Assistant => colloquy_llm::Message::ai(msg.content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_llm_message() {
        let user: colloquy_llm::Message = DBMessage::user("t1", "hello").into();
        let assistant: colloquy_llm::Message = DBMessage::assistant("t1", "hi").into();

        assert_eq!(user.role(), "user");
        assert_eq!(assistant, colloquy_llm::Message::ai("hi"));
    }

    #[test]
    fn test_rich_markers() {
        assert!(!MessageType::Text.is_rich());
        assert!(MessageType::Chart.is_rich());
        assert_eq!(MessageType::Document.as_str(), "document");
    }
}
