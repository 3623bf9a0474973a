//! Token estimation.
//!
//! The default estimator is a character-ratio heuristic: cheap, deterministic
//! and biased towards over-counting. A BPE-backed estimator is available for
//! callers that want a closer number.

use std::sync::Arc;

use colloquy_persist::DBMessage;
use tiktoken_rs::{cl100k_base, CoreBPE};

use crate::error::{ContextError, Result};

pub const CHARS_PER_TOKEN: usize = 4;

/// Fixed per-message cost for role markers and separators
pub const MESSAGE_OVERHEAD: usize = 4;

/// `ceil(bytes / 4)`; bytes rather than chars so multi-byte text is never under-counted
pub fn estimate_text(text: &str) -> usize {
    text.len().div_ceil(CHARS_PER_TOKEN)
}

pub fn estimate(messages: &[DBMessage]) -> usize {
    messages
        .iter()
        .map(|m| estimate_text(&m.content) + MESSAGE_OVERHEAD)
        .sum()
}

/// Token estimator trait for different tokenization strategies
pub trait TokenEstimator: Send + Sync {
    fn estimate_text(&self, text: &str) -> usize;

    fn estimate_messages(&self, messages: &[DBMessage]) -> usize {
        messages
            .iter()
            .map(|m| self.estimate_text(&m.content) + MESSAGE_OVERHEAD)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CharRatioEstimator;

impl TokenEstimator for CharRatioEstimator {
    fn estimate_text(&self, text: &str) -> usize {
        estimate_text(text)
    }
}

/// Tiktoken-based estimator using cl100k_base
pub struct TiktokenEstimator {
    bpe: Arc<CoreBPE>,
}

impl TiktokenEstimator {
    pub fn new() -> Result<Self> {
        let bpe = cl100k_base().map_err(|e| ContextError::Tokenizer(e.to_string()))?;
        Ok(Self { bpe: Arc::new(bpe) })
    }
}

impl TokenEstimator for TiktokenEstimator {
    fn estimate_text(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}
