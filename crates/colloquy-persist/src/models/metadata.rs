use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Retrieval metadata derived from a single message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMetadata {
    pub has_attachment: bool,
    pub attachment_type: Option<String>,
    pub frameworks_mentioned: BTreeSet<String>,
    pub charts_suggested: BTreeSet<ChartKind>,
    pub is_key_insight: bool,
    pub is_question: bool,
    pub is_decision: bool,
    pub tags: BTreeSet<String>,
    pub sentiment: Sentiment,
    pub complexity: Complexity,
}

impl Default for MessageMetadata {
    fn default() -> Self {
        Self {
            has_attachment: false,
            attachment_type: None,
            frameworks_mentioned: BTreeSet::new(),
            charts_suggested: BTreeSet::new(),
            is_key_insight: false,
            is_question: false,
            is_decision: false,
            tags: BTreeSet::new(),
            sentiment: Sentiment::Neutral,
            complexity: Complexity::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
    Scatter,
    Heatmap,
    Matrix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}
