//! Conversation summarization with a deterministic fallback.
//!
//! Every call runs a two-step pipeline: try the generation engine, and if that
//! is not possible or does not produce a usable answer, fall back to the
//! keyword heuristic. The returned outcome records which step produced the
//! result, so callers and tests never have to guess.

mod heuristic;
mod parse;

use std::sync::Arc;

use colloquy_llm::{ChatClient, ChatOptions, ChatRequest, ErrorKind};
use colloquy_persist::{DBMessage, MessageRole, SummaryFields};
use tracing::{debug, warn};

use crate::config::EngineSettings;
use crate::templates::{
    DIGEST_INSTRUCTION, DIGEST_PROMPT, STRUCTURED_SUMMARY_INSTRUCTION, STRUCTURED_SUMMARY_PROMPT,
};

pub const MAX_KEY_TOPICS: usize = 5;

/// Why the heuristic path produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Nothing to summarize; the engine is not consulted
    EmptyInput,
    /// No engine was configured
    EngineUnconfigured,
    /// The engine call failed (credentials, quota, network, protocol)
    EngineFailed(ErrorKind),
    /// The engine did not answer within the configured timeout
    Timeout,
    /// The engine answered with no content
    EmptyResponse,
    /// The engine answered, but not with a readable structured object
    Unparseable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySource {
    Engine,
    Heuristic(FallbackReason),
}

impl SummarySource {
    pub fn is_heuristic(&self) -> bool {
        matches!(self, Self::Heuristic(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOutcome {
    pub fields: SummaryFields,
    pub source: SummarySource,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DigestOutcome {
    pub text: String,
    pub source: SummarySource,
}

pub struct Summarizer {
    engine: Option<Arc<dyn ChatClient>>,
    settings: EngineSettings,
}

impl Summarizer {
    pub fn new(engine: Option<Arc<dyn ChatClient>>, settings: EngineSettings) -> Self {
        Self { engine, settings }
    }

    /// Summarizer that never contacts an engine
    pub fn heuristic_only() -> Self {
        Self::new(None, EngineSettings::default())
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// Structured summary of `messages`; never fails
    pub async fn summarize(&self, messages: &[DBMessage]) -> SummaryOutcome {
        let engine_result = self.summarize_with_engine(messages).await;
        match engine_result {
            Ok(fields) => SummaryOutcome {
                fields,
                source: SummarySource::Engine,
            },
            Err(reason) => SummaryOutcome {
                fields: heuristic::summarize(messages, MAX_KEY_TOPICS),
                source: SummarySource::Heuristic(reason),
            },
        }
    }

    /// Free-text digest of `messages`, used to stand in for evicted turns; never fails
    pub async fn digest(&self, messages: &[DBMessage]) -> DigestOutcome {
        let engine_result = self.digest_with_engine(messages).await;
        match engine_result {
            Ok(text) => DigestOutcome {
                text,
                source: SummarySource::Engine,
            },
            Err(reason) => DigestOutcome {
                text: heuristic::digest(messages, MAX_KEY_TOPICS),
                source: SummarySource::Heuristic(reason),
            },
        }
    }

    async fn summarize_with_engine(&self, messages: &[DBMessage]) -> Result<SummaryFields, FallbackReason> {
        if messages.is_empty() {
            return Err(FallbackReason::EmptyInput);
        }

        let prompt = STRUCTURED_SUMMARY_PROMPT
            .replace("<max_topics>", &MAX_KEY_TOPICS.to_string())
            .replace("<conversation>", &transcript(messages));

        let raw = self
            .generate(STRUCTURED_SUMMARY_INSTRUCTION, prompt, self.settings.summary_temperature)
            .await?;

        parse::parse_structured(&raw, MAX_KEY_TOPICS).ok_or_else(|| {
            warn!(response_len = raw.len(), "engine summary was not a readable JSON object, using heuristic");
            FallbackReason::Unparseable
        })
    }

    async fn digest_with_engine(&self, messages: &[DBMessage]) -> Result<String, FallbackReason> {
        if messages.is_empty() {
            return Err(FallbackReason::EmptyInput);
        }

        let prompt = DIGEST_PROMPT.replace("<conversation>", &transcript(messages));
        self.generate(DIGEST_INSTRUCTION, prompt, self.settings.digest_temperature)
            .await
    }

    /// One bounded engine call; every failure is mapped to a fallback reason
    async fn generate(
        &self,
        system_instruction: &str,
        prompt: String,
        temperature: f32,
    ) -> Result<String, FallbackReason> {
        let Some(engine) = &self.engine else {
            debug!("no generation engine configured, using heuristic");
            return Err(FallbackReason::EngineUnconfigured);
        };

        let mut options = ChatOptions::new().temperature(temperature);
        if let Some(max_tokens) = self.settings.max_tokens {
            options = options.max_tokens(max_tokens);
        }
        let request = ChatRequest::instructed(&self.settings.model, system_instruction, prompt)
            .with_options(options);

        match tokio::time::timeout(self.settings.timeout(), engine.chat(request)).await {
            Err(_) => {
                warn!(timeout_secs = self.settings.timeout_secs, "generation engine timed out, using heuristic");
                Err(FallbackReason::Timeout)
            }
            Ok(Err(e)) => {
                warn!(kind = ?e.kind(), error = %e, "generation engine unavailable, using heuristic");
                Err(FallbackReason::EngineFailed(e.kind()))
            }
            Ok(Ok(response)) => response
                .content
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .ok_or_else(|| {
                    warn!("generation engine returned no content, using heuristic");
                    FallbackReason::EmptyResponse
                }),
        }
    }
}

fn transcript(messages: &[DBMessage]) -> String {
    messages
        .iter()
        .map(|m| {
            let role = match m.role {
                MessageRole::User => "User",
                MessageRole::Assistant => "Assistant",
            };
            format!("{}: {}", role, m.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
