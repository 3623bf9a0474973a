use std::sync::Arc;

use async_trait::async_trait;
use colloquy_persist::{DBMessage, PersistenceClient};
use tracing::debug;

use crate::error::{validate_thread_id, Result};
use crate::strategy::{ContextPackage, ContextStrategy};
use crate::summarizer::Summarizer;
use crate::tokens::{CharRatioEstimator, TokenEstimator, CHARS_PER_TOKEN};

/// Smallest digest kept when a token budget squeezes the package
const MIN_DIGEST_TOKENS: usize = 16;

/// Keeps the last `recent_window_size` messages verbatim and digests the rest
pub struct SlidingWindowStrategy {
    summarizer: Arc<Summarizer>,
    estimator: Arc<dyn TokenEstimator>,
    recent_window_size: usize,
    token_budget: Option<usize>,
}

impl SlidingWindowStrategy {
    pub fn new(summarizer: Arc<Summarizer>, recent_window_size: usize) -> Self {
        Self {
            summarizer,
            estimator: Arc::new(CharRatioEstimator),
            recent_window_size: recent_window_size.max(1),
            token_budget: None,
        }
    }

    pub fn with_estimator(mut self, estimator: Arc<dyn TokenEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_token_budget(mut self, budget: Option<usize>) -> Self {
        self.token_budget = budget;
        self
    }

    /// Index of the first verbatim message
    fn split_point(&self, history: &[DBMessage]) -> usize {
        let mut split = history.len().saturating_sub(self.recent_window_size);
        let Some(budget) = self.token_budget else {
            return split;
        };

        // Leave a quarter of the budget for the digest, never drop the latest turn
        let tail_budget = budget - budget / 4;
        while split < history.len() - 1
            && self.estimator.estimate_messages(&history[split..]) > tail_budget
        {
            split += 1;
        }
        split
    }

    fn fit_digest(&self, digest: String, tail_tokens: usize) -> String {
        let Some(budget) = self.token_budget else {
            return digest;
        };
        let allowance = budget.saturating_sub(tail_tokens).max(MIN_DIGEST_TOKENS);
        truncate_to_tokens(digest, allowance, self.estimator.as_ref())
    }
}

#[async_trait]
impl ContextStrategy for SlidingWindowStrategy {
    async fn build(
        &self,
        thread_id: &str,
        persist_client: &dyn PersistenceClient,
    ) -> Result<ContextPackage> {
        let thread_id = validate_thread_id(thread_id)?;

        // 1. Full ordered history
        let history = persist_client.load_messages(thread_id).await?;

        if history.is_empty() {
            return Ok(ContextPackage::empty());
        }

        // 2. Everything fits in the window and the budget
        let history_tokens = self.estimator.estimate_messages(&history);
        let over_budget = self.token_budget.is_some_and(|budget| history_tokens > budget);
        if history.len() <= self.recent_window_size && !over_budget {
            return Ok(ContextPackage {
                total_estimated_tokens: history_tokens,
                summary: None,
                messages: history,
            });
        }

        // 3. Digest the prefix, keep the tail verbatim
        let split = self.split_point(&history);
        if split == 0 {
            // A lone message larger than the budget is still sent whole
            return Ok(ContextPackage {
                total_estimated_tokens: history_tokens,
                summary: None,
                messages: history,
            });
        }
        let digest = self.summarizer.digest(&history[..split]).await;

        let mut tail = history;
        let prefix: Vec<DBMessage> = tail.drain(..split).collect();
        let tail_tokens = self.estimator.estimate_messages(&tail);
        let summary = self.fit_digest(digest.text, tail_tokens);

        debug!(
            thread_id,
            digested = prefix.len(),
            kept = tail.len(),
            source = ?digest.source,
            "context window compacted"
        );

        Ok(ContextPackage {
            total_estimated_tokens: tail_tokens + self.estimator.estimate_text(&summary),
            summary: Some(summary),
            messages: tail,
        })
    }
}

/// Cut `text` on a char boundary until it fits in `allowance` tokens
fn truncate_to_tokens(mut text: String, allowance: usize, estimator: &dyn TokenEstimator) -> String {
    let mut max_bytes = allowance.saturating_mul(CHARS_PER_TOKEN).min(text.len());
    while estimator.estimate_text(&text) > allowance && max_bytes > 0 {
        let mut end = max_bytes.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
        max_bytes = (end - end / 10).min(end.saturating_sub(1));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::estimate_text;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "ação ".repeat(40);
        let cut = truncate_to_tokens(text.clone(), 5, &CharRatioEstimator);

        assert!(estimate_text(&cut) <= 5);
        assert!(text.starts_with(&cut));
    }

    #[test]
    fn test_truncate_leaves_short_text_alone() {
        let cut = truncate_to_tokens("short".to_string(), 16, &CharRatioEstimator);
        assert_eq!(cut, "short");
    }
}
