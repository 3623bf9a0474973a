use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

/// Structured summary payload, independent of any thread
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFields {
    #[serde(default)]
    pub key_topics: Vec<String>,
    #[serde(default)]
    pub main_insights: Vec<String>,
    #[serde(default)]
    pub decisions_made: Vec<String>,
    #[serde(default)]
    pub important_facts: BTreeMap<String, String>,
    #[serde(default)]
    pub frameworks_used: BTreeSet<String>,
}

/// The live summary of one thread
///
/// Each summarization produces a complete snapshot that replaces the previous
/// one; nothing is merged across passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub thread_id: String,
    pub key_topics: Vec<String>,
    pub main_insights: Vec<String>,
    pub decisions_made: Vec<String>,
    pub important_facts: BTreeMap<String, String>,
    pub frameworks_used: BTreeSet<String>,
    pub last_summarized_at: DateTime<Utc>,
    pub message_count: usize,
}

impl ThreadSummary {
    pub fn from_fields(
        thread_id: impl Into<String>,
        fields: SummaryFields,
        message_count: usize,
        last_summarized_at: DateTime<Utc>,
    ) -> Self {
        Self {
            thread_id: thread_id.into(),
            key_topics: fields.key_topics,
            main_insights: fields.main_insights,
            decisions_made: fields.decisions_made,
            important_facts: fields.important_facts,
            frameworks_used: fields.frameworks_used,
            last_summarized_at,
            message_count,
        }
    }

    pub fn fields(&self) -> SummaryFields {
        SummaryFields {
            key_topics: self.key_topics.clone(),
            main_insights: self.main_insights.clone(),
            decisions_made: self.decisions_made.clone(),
            important_facts: self.important_facts.clone(),
            frameworks_used: self.frameworks_used.clone(),
        }
    }
}
