use std::sync::Arc;

use colloquy_llm::ChatClient;
use colloquy_persist::{DBMessage, MessageMetadata, PersistenceClient, ThreadSummary};
use tracing::debug;

use crate::classifier::{KeywordClassifier, MessageClassifier};
use crate::config::MemoryConfig;
use crate::error::{validate_thread_id, ContextError, Result};
use crate::lifecycle::SummaryLifecycle;
use crate::strategy::{ContextPackage, ContextStrategy, ContextWindow};
use crate::summarizer::Summarizer;
use crate::tokens::{CharRatioEstimator, TokenEstimator};
use crate::window::SlidingWindowStrategy;

/// Entry point of the memory subsystem
///
/// Owns the storage handle, the optional generation engine and the tuning
/// knobs. Cheap to share behind an `Arc`; all operations take `&self`.
pub struct ConversationMemory {
    persist: Arc<dyn PersistenceClient>,
    strategy: Arc<dyn ContextStrategy>,
    lifecycle: SummaryLifecycle,
    classifier: Arc<dyn MessageClassifier>,
    config: MemoryConfig,
}

impl ConversationMemory {
    /// Memory with the default keyword classifier and char-ratio token estimate
    pub fn new(
        persist: Arc<dyn PersistenceClient>,
        engine: Option<Arc<dyn ChatClient>>,
        config: MemoryConfig,
    ) -> Result<Self> {
        let mut builder = ConversationMemoryBuilder::new().persistence(persist).config(config);
        if let Some(engine) = engine {
            builder = builder.engine(engine);
        }
        builder.build()
    }

    pub fn builder() -> ConversationMemoryBuilder {
        ConversationMemoryBuilder::new()
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Bounded context for the next turn of `thread_id`
    pub async fn build_context(&self, thread_id: &str) -> Result<ContextPackage> {
        self.strategy.build(thread_id, self.persist.as_ref()).await
    }

    /// Return the thread summary, recomputing it when stale or when `force` is set
    pub async fn ensure_fresh_summary(&self, thread_id: &str, force: bool) -> Result<ThreadSummary> {
        self.lifecycle
            .ensure_fresh(thread_id, self.persist.as_ref(), force)
            .await
    }

    /// Metadata for one message; pure, nothing is stored
    pub fn classify_message(&self, message: &DBMessage) -> MessageMetadata {
        self.classifier.classify(message)
    }

    /// Classify `message` and store the metadata under its id
    pub async fn classify_and_store(&self, message: &DBMessage) -> Result<MessageMetadata> {
        if message.id.trim().is_empty() {
            return Err(ContextError::InvalidInput("message id must not be empty".to_string()));
        }

        let metadata = self.classifier.classify(message);
        if !self
            .persist
            .save_message_metadata(&message.id, metadata.clone())
            .await?
        {
            return Err(ContextError::WriteRejected {
                what: "message metadata",
                key: message.id.clone(),
            });
        }

        debug!(
            message_id = %message.id,
            tags = ?metadata.tags,
            is_question = metadata.is_question,
            "message metadata stored"
        );
        Ok(metadata)
    }

    /// Messages of `thread_id` whose stored metadata carries `tag`, oldest first
    pub async fn messages_by_tag(&self, thread_id: &str, tag: &str) -> Result<Vec<DBMessage>> {
        let thread_id = validate_thread_id(thread_id)?;
        Ok(self.persist.query_messages_by_tag(thread_id, tag).await?)
    }

    /// Handle scoped to one conversation
    pub fn session(&self, thread_id: impl Into<String>) -> Result<ThreadSession<'_>> {
        let thread_id = thread_id.into();
        validate_thread_id(&thread_id)?;
        Ok(ThreadSession {
            memory: self,
            thread_id,
        })
    }
}

/// One conversation bound to a [`ConversationMemory`]
///
/// Replaces ambient "current thread" state: whoever holds the session knows
/// which thread every call targets.
pub struct ThreadSession<'a> {
    memory: &'a ConversationMemory,
    thread_id: String,
}

impl ThreadSession<'_> {
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub async fn build_context(&self) -> Result<ContextPackage> {
        self.memory.build_context(&self.thread_id).await
    }

    /// Context rendered with the configured system prompt template
    pub async fn context_window(&self) -> Result<ContextWindow> {
        let package = self.build_context().await?;
        Ok(package.into_window(&self.memory.config.system_prompt_template))
    }

    pub async fn ensure_fresh_summary(&self, force: bool) -> Result<ThreadSummary> {
        self.memory.ensure_fresh_summary(&self.thread_id, force).await
    }

    pub fn classify_message(&self, message: &DBMessage) -> MessageMetadata {
        self.memory.classify_message(message)
    }

    pub async fn messages_by_tag(&self, tag: &str) -> Result<Vec<DBMessage>> {
        self.memory.messages_by_tag(&self.thread_id, tag).await
    }

    /// Store a new turn of this thread along with its metadata
    pub async fn record_message(&self, message: DBMessage) -> Result<MessageMetadata> {
        if message.thread_id != self.thread_id {
            return Err(ContextError::InvalidInput(format!(
                "message belongs to thread '{}', session is '{}'",
                message.thread_id, self.thread_id
            )));
        }

        self.memory.persist.save_message(message.clone()).await?;
        self.memory.classify_and_store(&message).await
    }
}

pub struct ConversationMemoryBuilder {
    persist: Option<Arc<dyn PersistenceClient>>,
    engine: Option<Arc<dyn ChatClient>>,
    config: MemoryConfig,
    estimator: Arc<dyn TokenEstimator>,
    classifier: Arc<dyn MessageClassifier>,
}

impl ConversationMemoryBuilder {
    pub fn new() -> Self {
        Self {
            persist: None,
            engine: None,
            config: MemoryConfig::default(),
            estimator: Arc::new(CharRatioEstimator),
            classifier: Arc::new(KeywordClassifier),
        }
    }

    pub fn persistence(mut self, client: Arc<dyn PersistenceClient>) -> Self {
        self.persist = Some(client);
        self
    }

    pub fn engine(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.engine = Some(client);
        self
    }

    pub fn config(mut self, config: MemoryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn estimator(mut self, estimator: Arc<dyn TokenEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn MessageClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn build(self) -> Result<ConversationMemory> {
        let persist = self
            .persist
            .ok_or_else(|| ContextError::InvalidInput("persistence client is required".to_string()))?;
        self.config.validate()?;

        let summarizer = Arc::new(Summarizer::new(self.engine, self.config.engine.clone()));
        let strategy = SlidingWindowStrategy::new(summarizer.clone(), self.config.recent_window_size)
            .with_estimator(self.estimator)
            .with_token_budget(self.config.token_budget);
        debug!(
            engine = summarizer.has_engine(),
            recent_window_size = self.config.recent_window_size,
            token_budget = ?self.config.token_budget,
            "conversation memory ready"
        );
        let lifecycle = SummaryLifecycle::new(summarizer, self.config.resummarize_threshold);

        Ok(ConversationMemory {
            persist,
            strategy: Arc::new(strategy),
            lifecycle,
            classifier: self.classifier,
            config: self.config,
        })
    }
}

impl Default for ConversationMemoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
