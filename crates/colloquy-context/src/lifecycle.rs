use std::sync::Arc;

use chrono::Utc;
use colloquy_persist::{PersistenceClient, ThreadSummary};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{validate_thread_id, ContextError, Result};
use crate::summarizer::Summarizer;

/// Decides when a thread summary is stale and recomputes it
///
/// At most one refresh runs per thread at a time. Callers that arrive while a
/// refresh is in flight wait for it, then re-check staleness against the
/// summary it stored.
pub struct SummaryLifecycle {
    summarizer: Arc<Summarizer>,
    threshold: usize,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl SummaryLifecycle {
    pub fn new(summarizer: Arc<Summarizer>, threshold: usize) -> Self {
        Self {
            summarizer,
            threshold: threshold.max(1),
            in_flight: DashMap::new(),
        }
    }

    /// Whether a summary built from `existing` should be recomputed at `current_count` messages
    pub fn needs_refresh(&self, existing: Option<&ThreadSummary>, current_count: usize, force: bool) -> bool {
        match existing {
            _ if force => true,
            None => true,
            Some(summary) => current_count.saturating_sub(summary.message_count) >= self.threshold,
        }
    }

    pub async fn ensure_fresh(
        &self,
        thread_id: &str,
        persist_client: &dyn PersistenceClient,
        force: bool,
    ) -> Result<ThreadSummary> {
        let thread_id = validate_thread_id(thread_id)?;

        let lock = self
            .in_flight
            .entry(thread_id.to_string())
            .or_default()
            .clone();

        let result = {
            let _guard = lock.lock().await;
            self.refresh_locked(thread_id, persist_client, force).await
        };

        drop(lock);
        self.in_flight
            .remove_if(thread_id, |_, lock| Arc::strong_count(lock) == 1);

        result
    }

    async fn refresh_locked(
        &self,
        thread_id: &str,
        persist_client: &dyn PersistenceClient,
        force: bool,
    ) -> Result<ThreadSummary> {
        let existing = persist_client.load_thread_summary(thread_id).await?;
        let current_count = persist_client.count_messages(thread_id).await?;

        if !self.needs_refresh(existing.as_ref(), current_count, force) {
            if let Some(summary) = existing {
                debug!(
                    thread_id,
                    summarized = summary.message_count,
                    current = current_count,
                    "thread summary still fresh"
                );
                return Ok(summary);
            }
        }

        let messages = persist_client.load_messages(thread_id).await?;
        let outcome = self.summarizer.summarize(&messages).await;
        let summary = ThreadSummary::from_fields(thread_id, outcome.fields, messages.len(), Utc::now());

        // Only a complete result reaches storage
        if !persist_client.save_thread_summary(summary.clone()).await? {
            return Err(ContextError::WriteRejected {
                what: "thread summary",
                key: thread_id.to_string(),
            });
        }

        info!(
            thread_id,
            message_count = summary.message_count,
            forced = force,
            source = ?outcome.source,
            "thread summary refreshed"
        );
        Ok(summary)
    }

    #[cfg(test)]
    fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }
}
