use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::trait_client::PersistenceClient;
use crate::models::{DBMessage, MessageMetadata, ThreadSummary};
use crate::error::Result;

#[derive(Default)]
struct Store {
    messages: HashMap<String, Vec<DBMessage>>,
    summaries: HashMap<String, ThreadSummary>,
    metadata: HashMap<String, MessageMetadata>,
}

/// Process-local backend, used by tests and the demo binary
#[derive(Default)]
pub struct InMemoryPersistenceClient {
    store: RwLock<Store>,
}

impl InMemoryPersistenceClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a batch of messages
    pub async fn save_messages(&self, messages: Vec<DBMessage>) -> Result<()> {
        for message in messages {
            self.save_message(message).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl PersistenceClient for InMemoryPersistenceClient {
    async fn save_message(&self, message: DBMessage) -> Result<()> {
        let mut store = self.store.write().await;
        let thread = store.messages.entry(message.thread_id.clone()).or_default();

        // Keep ascending order; equal timestamps stay in insertion order
        let position = thread.partition_point(|m| m.created_at <= message.created_at);
        thread.insert(position, message);
        Ok(())
    }

    async fn load_messages(&self, thread_id: &str) -> Result<Vec<DBMessage>> {
        let store = self.store.read().await;
        Ok(store.messages.get(thread_id).cloned().unwrap_or_default())
    }

    async fn count_messages(&self, thread_id: &str) -> Result<usize> {
        let store = self.store.read().await;
        Ok(store.messages.get(thread_id).map_or(0, Vec::len))
    }

    async fn save_thread_summary(&self, summary: ThreadSummary) -> Result<bool> {
        let mut store = self.store.write().await;
        tracing::debug!(thread_id = %summary.thread_id, message_count = summary.message_count, "storing thread summary");
        store.summaries.insert(summary.thread_id.clone(), summary);
        Ok(true)
    }

    async fn load_thread_summary(&self, thread_id: &str) -> Result<Option<ThreadSummary>> {
        let store = self.store.read().await;
        Ok(store.summaries.get(thread_id).cloned())
    }

    async fn save_message_metadata(&self, message_id: &str, metadata: MessageMetadata) -> Result<bool> {
        let mut store = self.store.write().await;
        store.metadata.insert(message_id.to_string(), metadata);
        Ok(true)
    }

    async fn load_message_metadata(&self, message_id: &str) -> Result<Option<MessageMetadata>> {
        let store = self.store.read().await;
        Ok(store.metadata.get(message_id).cloned())
    }

    async fn query_messages_by_tag(&self, thread_id: &str, tag: &str) -> Result<Vec<DBMessage>> {
        let store = self.store.read().await;
        let Some(messages) = store.messages.get(thread_id) else {
            return Ok(Vec::new());
        };

        Ok(messages
            .iter()
            .filter(|m| {
                store
                    .metadata
                    .get(&m.id)
                    .is_some_and(|meta| meta.tags.contains(tag))
            })
            .cloned()
            .collect())
    }
}
