//! Engine-free summaries built from keyword scans.

use colloquy_persist::{DBMessage, MessageRole, SummaryFields};

use crate::classifier;
use crate::lexicon;

const MAX_DECISIONS: usize = 5;
const MAX_DECISION_CHARS: usize = 160;

struct Scan {
    user_turns: usize,
    assistant_turns: usize,
    topics: Vec<&'static str>,
    frameworks: Vec<&'static str>,
}

fn scan(messages: &[DBMessage], max_topics: usize) -> Scan {
    let lowered: Vec<String> = messages.iter().map(|m| m.content.to_lowercase()).collect();
    let user_turns = messages.iter().filter(|m| m.role == MessageRole::User).count();

    let topics = lexicon::SUMMARY_TOPICS
        .iter()
        .filter(|family| lowered.iter().any(|text| family.matches(text)))
        .map(|family| family.label)
        .take(max_topics)
        .collect();

    let frameworks = lexicon::FRAMEWORKS
        .iter()
        .filter(|family| lowered.iter().any(|text| family.matches(text)))
        .map(|family| family.label)
        .collect();

    Scan {
        user_turns,
        assistant_turns: messages.len() - user_turns,
        topics,
        frameworks,
    }
}

pub(crate) fn summarize(messages: &[DBMessage], max_topics: usize) -> SummaryFields {
    let scan = scan(messages, max_topics);

    let mut decisions: Vec<String> = Vec::new();
    for message in messages {
        if decisions.len() == MAX_DECISIONS {
            break;
        }
        if !classifier::classify(message).is_decision {
            continue;
        }
        let sentence = first_sentence(&message.content);
        if !sentence.is_empty() && !decisions.contains(&sentence) {
            decisions.push(sentence);
        }
    }

    SummaryFields {
        key_topics: scan.topics.iter().map(|t| t.to_string()).collect(),
        main_insights: vec![format!(
            "Conversation covered {} user messages and {} assistant responses.",
            scan.user_turns, scan.assistant_turns
        )],
        decisions_made: decisions,
        important_facts: Default::default(),
        frameworks_used: scan.frameworks.iter().map(|f| f.to_string()).collect(),
    }
}

pub(crate) fn digest(messages: &[DBMessage], max_topics: usize) -> String {
    let scan = scan(messages, max_topics);

    let mut text = format!(
        "Earlier conversation: {} user messages and {} assistant messages.",
        scan.user_turns, scan.assistant_turns
    );
    if !scan.topics.is_empty() {
        text.push_str(&format!(" Topics: {}.", scan.topics.join(", ")));
    }
    if !scan.frameworks.is_empty() {
        text.push_str(&format!(" Frameworks: {}.", scan.frameworks.join(", ")));
    }
    text
}

fn first_sentence(content: &str) -> String {
    let trimmed = content.trim();
    let end = trimmed
        .find(&['.', '!', '?', '\n'][..])
        .map_or(trimmed.len(), |i| i + 1);
    let sentence = trimmed[..end].trim();

    match sentence.char_indices().nth(MAX_DECISION_CHARS) {
        Some((cut, _)) => format!("{}...", &sentence[..cut]),
        None => sentence.to_string(),
    }
}
