use async_trait::async_trait;
use colloquy_llm::Message;
use colloquy_persist::{DBMessage, PersistenceClient};
use serde::Serialize;

use crate::error::Result;
use crate::templates::NO_SUMMARY_TEXT;

/// Bounded context for one chat turn
///
/// When `summary` is `None` the package holds the complete history. When it is
/// `Some`, every message missing from `messages` is represented by it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextPackage {
    pub summary: Option<String>,
    pub messages: Vec<DBMessage>,
    pub total_estimated_tokens: usize,
}

impl ContextPackage {
    pub fn empty() -> Self {
        Self {
            summary: None,
            messages: Vec::new(),
            total_estimated_tokens: 0,
        }
    }

    /// Whether older turns were folded into a summary
    pub fn is_compacted(&self) -> bool {
        self.summary.is_some()
    }

    /// Render into engine-ready form, `<summary>` in `template` filled with the digest
    pub fn into_window(self, template: &str) -> ContextWindow {
        let summary = self.summary.as_deref().unwrap_or(NO_SUMMARY_TEXT);
        ContextWindow {
            system_prompt: template.replace("<summary>", summary),
            messages: self.messages.into_iter().map(Message::from).collect(),
        }
    }
}

/// Result of context retrieval, ready for a chat request
#[derive(Debug, Clone)]
pub struct ContextWindow {
    pub system_prompt: String,
    pub messages: Vec<Message>,
}

/// Strategy for building a context package from conversation history
#[async_trait]
pub trait ContextStrategy: Send + Sync {
    async fn build(
        &self,
        thread_id: &str,
        persist_client: &dyn PersistenceClient,
    ) -> Result<ContextPackage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_fills_summary_placeholder() {
        let package = ContextPackage {
            summary: Some("Pricing was discussed.".to_string()),
            messages: vec![DBMessage::user("t1", "next?"), DBMessage::assistant("t1", "sure")],
            total_estimated_tokens: 20,
        };

        let window = package.into_window("Context: <summary>");
        assert_eq!(window.system_prompt, "Context: Pricing was discussed.");
        assert_eq!(window.messages, vec![Message::human("next?"), Message::ai("sure")]);
    }

    #[test]
    fn test_window_without_summary() {
        let window = ContextPackage::empty().into_window("Context: <summary>");
        assert_eq!(window.system_prompt, format!("Context: {}", NO_SUMMARY_TEXT));
        assert!(window.messages.is_empty());
    }
}
