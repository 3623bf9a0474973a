mod common;

use std::sync::Arc;

use colloquy_context::tokens::estimate_text;
use colloquy_context::{ContextError, ConversationMemory, MemoryConfig, NO_SUMMARY_TEXT};
use colloquy_persist::InMemoryPersistenceClient;

use common::{conversation, seeded_store, BrokenStore, MockEngine, Reply};

fn heuristic_memory(store: Arc<InMemoryPersistenceClient>, config: MemoryConfig) -> ConversationMemory {
    ConversationMemory::new(store, None, config).unwrap()
}

#[tokio::test]
async fn test_short_thread_is_returned_whole() {
    let store = seeded_store("t1", 5).await;
    let memory = heuristic_memory(store, MemoryConfig::default());

    let package = memory.build_context("t1").await.unwrap();

    assert!(package.summary.is_none());
    assert_eq!(package.messages.len(), 5);
    let expected: usize = package
        .messages
        .iter()
        .map(|m| estimate_text(&m.content) + 4)
        .sum();
    assert_eq!(package.total_estimated_tokens, expected);
}

#[tokio::test]
async fn test_window_size_exactly_reached_keeps_everything() {
    let store = seeded_store("t1", 20).await;
    let memory = heuristic_memory(store, MemoryConfig::default());

    let package = memory.build_context("t1").await.unwrap();
    assert!(!package.is_compacted());
    assert_eq!(package.messages.len(), 20);
}

#[tokio::test]
async fn test_long_thread_keeps_recent_window() {
    let store = seeded_store("t1", 25).await;
    let memory = heuristic_memory(store, MemoryConfig::default());

    let package = memory.build_context("t1").await.unwrap();

    let ids: Vec<&str> = package.messages.iter().map(|m| m.id.as_str()).collect();
    let expected: Vec<String> = (5..25).map(|i| format!("m{}", i)).collect();
    assert_eq!(ids, expected);

    let summary = package.summary.expect("older turns must be summarized");
    assert!(summary.starts_with("Earlier conversation: 3 user messages and 2 assistant messages."));
}

#[tokio::test]
async fn test_rebuild_is_identical() {
    let store = seeded_store("t1", 42).await;
    let memory = heuristic_memory(store, MemoryConfig::default().with_recent_window_size(10));

    let first = memory.build_context("t1").await.unwrap();
    let second = memory.build_context("t1").await.unwrap();

    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[tokio::test]
async fn test_empty_thread_yields_empty_package() {
    let memory = heuristic_memory(Arc::new(InMemoryPersistenceClient::new()), MemoryConfig::default());

    let package = memory.build_context("nobody").await.unwrap();
    assert!(package.summary.is_none());
    assert!(package.messages.is_empty());
    assert_eq!(package.total_estimated_tokens, 0);
}

#[tokio::test]
async fn test_blank_thread_id_is_rejected() {
    let memory = heuristic_memory(Arc::new(InMemoryPersistenceClient::new()), MemoryConfig::default());

    let err = memory.build_context("").await.unwrap_err();
    assert!(matches!(err, ContextError::InvalidInput(_)));
}

#[tokio::test]
async fn test_storage_failure_is_reported() {
    let memory = ConversationMemory::new(Arc::new(BrokenStore), None, MemoryConfig::default()).unwrap();

    let err = memory.build_context("t1").await.unwrap_err();
    assert!(matches!(err, ContextError::Persistence(_)));
}

#[tokio::test]
async fn test_engine_digest_replaces_evicted_turns() {
    let store = seeded_store("t1", 25).await;
    let engine = MockEngine::replying("They agreed on a phased rollout.");
    let memory = ConversationMemory::new(store, Some(engine.clone()), MemoryConfig::default()).unwrap();

    let package = memory.build_context("t1").await.unwrap();

    assert_eq!(package.summary.as_deref(), Some("They agreed on a phased rollout."));
    assert_eq!(package.messages.len(), 20);
    assert_eq!(engine.calls(), 1);
}

#[tokio::test]
async fn test_engine_failure_falls_back_to_heuristic_digest() {
    let store = seeded_store("t1", 25).await;
    let engine = Arc::new(MockEngine::new(Reply::RateLimited, None));
    let memory = ConversationMemory::new(store, Some(engine), MemoryConfig::default()).unwrap();

    let package = memory.build_context("t1").await.unwrap();

    let summary = package.summary.unwrap();
    assert!(summary.starts_with("Earlier conversation:"));
    assert_eq!(package.messages.len(), 20);
}

#[tokio::test]
async fn test_token_budget_bounds_the_package() {
    let store = Arc::new(InMemoryPersistenceClient::new());
    store
        .save_messages(conversation("t1", 30, |i| format!("{} {}", i, "x".repeat(400))))
        .await
        .unwrap();
    let config = MemoryConfig::default().with_token_budget(500);
    let memory = heuristic_memory(store, config);

    let package = memory.build_context("t1").await.unwrap();

    assert!(package.total_estimated_tokens <= 500);
    assert!(package.summary.is_some());
    assert!(!package.messages.is_empty());
    assert!(package.messages.len() < 20);
    assert_eq!(package.messages.last().unwrap().id, "m29");
}

#[tokio::test]
async fn test_token_budget_applies_to_short_threads() {
    let store = Arc::new(InMemoryPersistenceClient::new());
    store
        .save_messages(conversation("t1", 10, |i| format!("{} {}", i, "x".repeat(400))))
        .await
        .unwrap();
    let memory = heuristic_memory(store, MemoryConfig::default().with_token_budget(500));

    let package = memory.build_context("t1").await.unwrap();

    assert!(package.total_estimated_tokens <= 500);
    let summary = package.summary.expect("over-budget history must be compacted");
    assert!(summary.starts_with("Earlier conversation:"));
    assert_eq!(package.messages.last().unwrap().id, "m9");
    assert!(package.messages.len() < 10);
}

#[tokio::test]
async fn test_short_thread_within_budget_is_untouched() {
    let store = seeded_store("t1", 10).await;
    let memory = heuristic_memory(store, MemoryConfig::default().with_token_budget(10_000));

    let package = memory.build_context("t1").await.unwrap();
    assert!(package.summary.is_none());
    assert_eq!(package.messages.len(), 10);
}

#[tokio::test]
async fn test_single_oversized_message_is_kept_whole() {
    let store = Arc::new(InMemoryPersistenceClient::new());
    store
        .save_messages(conversation("t1", 1, |_| "y".repeat(4_000)))
        .await
        .unwrap();
    let memory = heuristic_memory(store, MemoryConfig::default().with_token_budget(100));

    let package = memory.build_context("t1").await.unwrap();
    assert!(package.summary.is_none());
    assert_eq!(package.messages.len(), 1);
}

#[tokio::test]
async fn test_context_window_renders_system_prompt() {
    let store = seeded_store("t1", 25).await;
    let config = MemoryConfig::default().with_system_prompt_template("Earlier: <summary>");
    let memory = heuristic_memory(store, config);

    let session = memory.session("t1").unwrap();
    let window = session.context_window().await.unwrap();

    assert!(window.system_prompt.starts_with("Earlier: Earlier conversation:"));
    assert_eq!(window.messages.len(), 20);

    let empty = memory.session("t2").unwrap().context_window().await.unwrap();
    assert_eq!(empty.system_prompt, format!("Earlier: {}", NO_SUMMARY_TEXT));
}
