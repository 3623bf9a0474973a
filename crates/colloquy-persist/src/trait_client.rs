use async_trait::async_trait;
use crate::models::{DBMessage, MessageMetadata, ThreadSummary};
use crate::error::Result;

/// Trait for storage operations used by the memory subsystem
///
/// Implementations own the persistence format. Messages must come back sorted
/// by `created_at` ascending.
#[async_trait]
pub trait PersistenceClient: Send + Sync {
    /// Save a single message to the store
    async fn save_message(&self, message: DBMessage) -> Result<()>;

    /// Get all messages for a thread, oldest first
    async fn load_messages(&self, thread_id: &str) -> Result<Vec<DBMessage>>;

    /// Count messages in a thread
    async fn count_messages(&self, thread_id: &str) -> Result<usize> {
        Ok(self.load_messages(thread_id).await?.len())
    }

    /// Upsert the thread summary keyed by `summary.thread_id`
    async fn save_thread_summary(&self, summary: ThreadSummary) -> Result<bool>;

    /// Get the live summary for a thread, if one was ever computed
    async fn load_thread_summary(&self, thread_id: &str) -> Result<Option<ThreadSummary>>;

    /// Save (or replace) the metadata of one message
    async fn save_message_metadata(&self, message_id: &str, metadata: MessageMetadata) -> Result<bool>;

    /// Get the metadata of one message
    async fn load_message_metadata(&self, message_id: &str) -> Result<Option<MessageMetadata>>;

    /// Messages of a thread whose metadata carries `tag`, oldest first
    async fn query_messages_by_tag(&self, thread_id: &str, tag: &str) -> Result<Vec<DBMessage>>;
}
