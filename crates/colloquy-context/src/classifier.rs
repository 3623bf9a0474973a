//! Per-message retrieval metadata.

use colloquy_persist::{Complexity, DBMessage, MessageMetadata, MessageRole, Sentiment};

use crate::lexicon::{self, KeywordFamily};

const HIGH_COMPLEXITY_WORDS: usize = 100;
const MEDIUM_COMPLEXITY_WORDS: usize = 50;
const DENSE_SENTENCE_TERMINALS: usize = 2;

/// Derives [`MessageMetadata`] from a message
///
/// Implementations must be pure: the same message always yields the same
/// metadata.
pub trait MessageClassifier: Send + Sync {
    fn classify(&self, message: &DBMessage) -> MessageMetadata;
}

/// Lexicon-driven classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl MessageClassifier for KeywordClassifier {
    fn classify(&self, message: &DBMessage) -> MessageMetadata {
        classify(message)
    }
}

pub fn classify(message: &DBMessage) -> MessageMetadata {
    let lowered = message.content.to_lowercase();

    MessageMetadata {
        has_attachment: message.message_type.is_rich(),
        attachment_type: message
            .message_type
            .is_rich()
            .then(|| message.message_type.as_str().to_string()),
        frameworks_mentioned: lexicon::frameworks_in(&lowered).map(str::to_string).collect(),
        charts_suggested: lexicon::CHARTS
            .iter()
            .filter(|c| c.matches(&lowered))
            .map(|c| c.label)
            .collect(),
        is_key_insight: lexicon::KEY_INSIGHT.matches(&lowered),
        is_question: message.role == MessageRole::User && is_question(&lowered),
        is_decision: lexicon::DECISION.matches(&lowered),
        tags: labels(lexicon::TAGS, &lowered),
        sentiment: sentiment(&lowered),
        complexity: complexity(&message.content),
    }
}

fn labels(families: &[KeywordFamily<&'static str>], lowered: &str) -> std::collections::BTreeSet<String> {
    families
        .iter()
        .filter(|f| f.matches(lowered))
        .map(|f| f.label.to_string())
        .collect()
}

fn is_question(lowered: &str) -> bool {
    if lowered.contains('?') {
        return true;
    }
    lowered
        .split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .is_some_and(|w| lexicon::INTERROGATIVES.contains(&w))
}

fn sentiment(lowered: &str) -> Sentiment {
    let positive = lexicon::POSITIVE.occurrences(lowered);
    let negative = lexicon::NEGATIVE.occurrences(lowered);
    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

fn complexity(content: &str) -> Complexity {
    let words = content.split_whitespace().count();
    let has_digits = content.chars().any(|c| c.is_ascii_digit());
    let terminals = content.chars().filter(|c| matches!(c, '.' | '!' | '?')).count();

    if words > HIGH_COMPLEXITY_WORDS
        || (words > MEDIUM_COMPLEXITY_WORDS && has_digits && terminals > DENSE_SENTENCE_TERMINALS)
    {
        Complexity::High
    } else if words > MEDIUM_COMPLEXITY_WORDS {
        Complexity::Medium
    } else {
        Complexity::Low
    }
}
