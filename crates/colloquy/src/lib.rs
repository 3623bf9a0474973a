//! # Colloquy
//!
//! Conversation memory for chat agents. Long threads are compacted into a
//! bounded context window, thread summaries are kept fresh incrementally, and
//! every message can be tagged with retrieval metadata.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use colloquy::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(InMemoryPersistenceClient::new());
//!
//!     // Without an engine every summary comes from the keyword heuristic
//!     let engine = ProviderConfig::from_env()
//!         .map(ClientFactory::create_client)
//!         .transpose()?;
//!
//!     let memory = ConversationMemory::new(store, engine, MemoryConfig::load()?)?;
//!     let session = memory.session("conversation-123")?;
//!
//!     session
//!         .record_message(DBMessage::user("conversation-123", "What is the market size?"))
//!         .await?;
//!
//!     let window = session.context_window().await?;
//!     println!("{}", window.system_prompt);
//!
//!     let summary = session.ensure_fresh_summary(false).await?;
//!     println!("{:?}", summary.key_topics);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`colloquy-llm`**: chat engine trait and the OpenAI-compatible client
//! - **`colloquy-persist`**: storage trait, data model and an in-memory backend
//! - **`colloquy-context`**: windowing, summarization and classification
//!
//! ## License
//!
//! MIT

pub use colloquy_llm as llm;
pub use colloquy_persist as persist;
pub use colloquy_context as context;

// Re-export commonly used types
pub use colloquy_llm::{
    ChatClient, ChatOptions, ChatRequest, ChatResponse, ClientFactory, LLMError, Message,
    OpenAIClient, OpenAIConfig, ProviderConfig,
};

pub use colloquy_persist::{
    ChartKind, Complexity, DBMessage, InMemoryPersistenceClient, MessageMetadata, MessageRole,
    MessageType, PersistError, PersistenceClient, Sentiment, SummaryFields, ThreadSummary,
};

pub use colloquy_context::{
    ContextError, ContextPackage, ContextStrategy, ContextWindow, ConversationMemory,
    ConversationMemoryBuilder, EngineSettings, FallbackReason, KeywordClassifier, MemoryConfig,
    MessageClassifier, SlidingWindowStrategy, Summarizer, SummarySource, ThreadSession,
    TiktokenEstimator, TokenEstimator,
};

/// Convenient prelude with commonly used types
pub mod prelude {
    pub use crate::{
        ChatClient, ClientFactory, OpenAIClient, ProviderConfig,
        DBMessage, MessageRole, MessageType, ThreadSummary, PersistenceClient, InMemoryPersistenceClient,
        ContextPackage, ContextWindow, ConversationMemory, MemoryConfig, ThreadSession, SummarySource,
    };
}
