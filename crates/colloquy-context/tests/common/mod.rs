#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use colloquy_llm::{ChatClient, ChatRequest, ChatResponse, LLMError};
use colloquy_persist::{
    DBMessage, InMemoryPersistenceClient, MessageMetadata, PersistError, PersistenceClient,
    ThreadSummary,
};

pub enum Reply {
    Text(String),
    Empty,
    RateLimited,
}

/// Scripted generation engine that counts its calls
pub struct MockEngine {
    reply: Reply,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockEngine {
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(Reply::Text(text.into()), None))
    }

    pub fn new(reply: Reply, delay: Option<Duration>) -> Self {
        Self {
            reply,
            delay,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatClient for MockEngine {
    async fn chat(&self, _request: ChatRequest) -> colloquy_llm::Result<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reply {
            Reply::Text(text) => Ok(ChatResponse::text(text.clone())),
            Reply::Empty => Ok(ChatResponse {
                content: None,
                usage: None,
                finish_reason: Some("stop".to_string()),
            }),
            Reply::RateLimited => Err(LLMError::RateLimited("quota exhausted".to_string())),
        }
    }
}

/// Store whose every call fails
pub struct BrokenStore;

fn unavailable<T>() -> colloquy_persist::Result<T> {
    Err(PersistError::Storage("connection refused".to_string()))
}

#[async_trait]
impl PersistenceClient for BrokenStore {
    async fn save_message(&self, _message: DBMessage) -> colloquy_persist::Result<()> {
        unavailable()
    }

    async fn load_messages(&self, _thread_id: &str) -> colloquy_persist::Result<Vec<DBMessage>> {
        unavailable()
    }

    async fn save_thread_summary(&self, _summary: ThreadSummary) -> colloquy_persist::Result<bool> {
        unavailable()
    }

    async fn load_thread_summary(&self, _thread_id: &str) -> colloquy_persist::Result<Option<ThreadSummary>> {
        unavailable()
    }

    async fn save_message_metadata(&self, _message_id: &str, _metadata: MessageMetadata) -> colloquy_persist::Result<bool> {
        unavailable()
    }

    async fn load_message_metadata(&self, _message_id: &str) -> colloquy_persist::Result<Option<MessageMetadata>> {
        unavailable()
    }

    async fn query_messages_by_tag(&self, _thread_id: &str, _tag: &str) -> colloquy_persist::Result<Vec<DBMessage>> {
        unavailable()
    }
}

/// In-memory store that refuses summary writes
#[derive(Default)]
pub struct ReadOnlySummaries {
    inner: InMemoryPersistenceClient,
}

impl ReadOnlySummaries {
    pub fn inner(&self) -> &InMemoryPersistenceClient {
        &self.inner
    }
}

#[async_trait]
impl PersistenceClient for ReadOnlySummaries {
    async fn save_message(&self, message: DBMessage) -> colloquy_persist::Result<()> {
        self.inner.save_message(message).await
    }

    async fn load_messages(&self, thread_id: &str) -> colloquy_persist::Result<Vec<DBMessage>> {
        self.inner.load_messages(thread_id).await
    }

    async fn save_thread_summary(&self, _summary: ThreadSummary) -> colloquy_persist::Result<bool> {
        Ok(false)
    }

    async fn load_thread_summary(&self, thread_id: &str) -> colloquy_persist::Result<Option<ThreadSummary>> {
        self.inner.load_thread_summary(thread_id).await
    }

    async fn save_message_metadata(&self, message_id: &str, metadata: MessageMetadata) -> colloquy_persist::Result<bool> {
        self.inner.save_message_metadata(message_id, metadata).await
    }

    async fn load_message_metadata(&self, message_id: &str) -> colloquy_persist::Result<Option<MessageMetadata>> {
        self.inner.load_message_metadata(message_id).await
    }

    async fn query_messages_by_tag(&self, thread_id: &str, tag: &str) -> colloquy_persist::Result<Vec<DBMessage>> {
        self.inner.query_messages_by_tag(thread_id, tag).await
    }
}

/// `count` alternating user/assistant turns, one second apart, ids `m0..`
pub fn conversation(thread_id: &str, count: usize, content: impl Fn(usize) -> String) -> Vec<DBMessage> {
    let base = Utc::now() - ChronoDuration::hours(1);
    (0..count)
        .map(|i| {
            let message = if i % 2 == 0 {
                DBMessage::user(thread_id, content(i))
            } else {
                DBMessage::assistant(thread_id, content(i))
            };
            message
                .with_id(format!("m{}", i))
                .at(base + ChronoDuration::seconds(i as i64))
        })
        .collect()
}

pub async fn seeded_store(thread_id: &str, count: usize) -> Arc<InMemoryPersistenceClient> {
    let store = Arc::new(InMemoryPersistenceClient::new());
    store
        .save_messages(conversation(thread_id, count, |i| format!("Message {} about the rollout plan", i)))
        .await
        .unwrap();
    store
}
