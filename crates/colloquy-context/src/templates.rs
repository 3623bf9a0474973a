/// System prompt for the chat turn; `<summary>` is replaced with the digest
pub const DEFAULT_SYSTEM_PROMPT_TEMPLATE: &str = "You are a strategy consulting assistant. \
Use the conversation so far to keep answers consistent with earlier turns.\n\n\
Summary of earlier conversation:\n<summary>";

pub const NO_SUMMARY_TEXT: &str = "No earlier conversation.";

pub const STRUCTURED_SUMMARY_INSTRUCTION: &str = "You extract structured summaries from business \
conversations. Respond with a single JSON object and nothing else.";

/// `<max_topics>` and `<conversation>` are filled in before sending
pub const STRUCTURED_SUMMARY_PROMPT: &str = r#"Summarize the conversation below as a JSON object with exactly these keys:

{
  "key_topics": ["short label", ...],
  "main_insights": ["short statement", ...],
  "decisions_made": ["short statement", ...],
  "important_facts": {"short key": "short value"},
  "frameworks_used": ["framework name", ...]
}

Rules:
- at most <max_topics> key_topics
- use empty lists or an empty object when nothing applies
- frameworks_used only lists named business frameworks (e.g. SWOT, MECE, Porter's Five Forces)
- output JSON only, no prose, no code fences

Conversation:
<conversation>"#;

pub const DIGEST_INSTRUCTION: &str = "You compress conversation history into a short running brief.";

pub const DIGEST_PROMPT: &str = "Write a concise summary (one paragraph, under 150 words) of the \
conversation below. Keep names, numbers, decisions and open questions.\n\nConversation:\n<conversation>";
