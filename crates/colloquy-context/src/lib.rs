//! Conversation memory: bounded context windows, structured thread summaries
//! and per-message retrieval metadata.

pub mod classifier;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod lifecycle;
pub mod memory;
pub mod strategy;
pub mod summarizer;
pub mod templates;
pub mod tokens;
mod window;

pub use classifier::{KeywordClassifier, MessageClassifier};
pub use config::{EngineSettings, MemoryConfig};
pub use error::{ContextError, Result};
pub use lifecycle::SummaryLifecycle;
pub use memory::{ConversationMemory, ConversationMemoryBuilder, ThreadSession};
pub use strategy::{ContextPackage, ContextStrategy, ContextWindow};
pub use summarizer::{DigestOutcome, FallbackReason, Summarizer, SummaryOutcome, SummarySource};
pub use templates::{DEFAULT_SYSTEM_PROMPT_TEMPLATE, NO_SUMMARY_TEXT};
pub use tokens::{CharRatioEstimator, TiktokenEstimator, TokenEstimator};
pub use window::SlidingWindowStrategy;
