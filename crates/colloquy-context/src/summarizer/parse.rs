//! Parsing of the engine's structured summary reply.

use std::collections::{BTreeMap, BTreeSet};

use colloquy_persist::SummaryFields;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct EngineSummary {
    #[serde(default)]
    key_topics: Vec<String>,
    #[serde(default)]
    main_insights: Vec<String>,
    #[serde(default)]
    decisions_made: Vec<String>,
    #[serde(default)]
    important_facts: BTreeMap<String, Value>,
    #[serde(default)]
    frameworks_used: Vec<String>,
}

/// Extract the outermost JSON object from `raw` and read it as summary fields
///
/// Tolerates code fences and surrounding prose. Returns `None` when no object
/// can be read.
pub(crate) fn parse_structured(raw: &str, max_topics: usize) -> Option<SummaryFields> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }

    let parsed: EngineSummary = serde_json::from_str(&raw[start..=end]).ok()?;

    let mut key_topics: Vec<String> = Vec::new();
    for topic in clean(parsed.key_topics) {
        if key_topics.len() == max_topics {
            break;
        }
        if !key_topics.contains(&topic) {
            key_topics.push(topic);
        }
    }

    let important_facts = parsed
        .important_facts
        .into_iter()
        .filter_map(|(key, value)| {
            let key = key.trim().to_string();
            let value = match value {
                Value::String(s) => s.trim().to_string(),
                Value::Null => return None,
                other => other.to_string(),
            };
            (!key.is_empty() && !value.is_empty()).then_some((key, value))
        })
        .collect();

    Some(SummaryFields {
        key_topics,
        main_insights: clean(parsed.main_insights),
        decisions_made: clean(parsed.decisions_made),
        important_facts,
        frameworks_used: clean(parsed.frameworks_used).into_iter().collect::<BTreeSet<_>>(),
    })
}

fn clean(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_fenced_json() {
        let raw = "```json\n{\"key_topics\": [\"Pricing\", \" \", \"Pricing\", \"Market\"], \
                   \"important_facts\": {\"budget\": 120000, \"region\": \"LATAM\", \"note\": null}, \
                   \"frameworks_used\": [\"SWOT\"]}\n```";
        let fields = parse_structured(raw, 5).unwrap();

        assert_eq!(fields.key_topics, vec!["Pricing", "Market"]);
        assert_eq!(fields.important_facts.get("budget").map(String::as_str), Some("120000"));
        assert_eq!(fields.important_facts.get("region").map(String::as_str), Some("LATAM"));
        assert!(!fields.important_facts.contains_key("note"));
        assert!(fields.frameworks_used.contains("SWOT"));
        assert!(fields.main_insights.is_empty());
    }

    #[test]
    fn test_topic_limit() {
        let raw = r#"{"key_topics": ["a", "b", "c", "d", "e", "f", "g"]}"#;
        assert_eq!(parse_structured(raw, 5).unwrap().key_topics.len(), 5);
    }

    #[test]
    fn test_rejects_prose_and_wrong_shapes() {
        assert!(parse_structured("I could not summarize this.", 5).is_none());
        assert!(parse_structured("} nothing {", 5).is_none());
        assert!(parse_structured(r#"{"key_topics": "not a list"}"#, 5).is_none());
    }
}
