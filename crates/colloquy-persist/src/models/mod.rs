mod db_message;
mod metadata;
mod summary;

// Export database-agnostic models
pub use db_message::{DBMessage, MessageRole, MessageType};
pub use metadata::{ChartKind, Complexity, MessageMetadata, Sentiment};
pub use summary::{SummaryFields, ThreadSummary};
