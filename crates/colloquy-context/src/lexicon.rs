//! Fixed keyword lexicons shared by the classifier and the heuristic summarizer.
//!
//! Every keyword is lowercase and is matched against lowercased text where it
//! starts a word, so stems like "recomend" still cover their inflections while
//! "exporter" does not count as "porter". English and Portuguese spellings are
//! both accepted.

use colloquy_persist::ChartKind;

/// A canonical label and the keywords that signal it
#[derive(Debug, Clone, Copy)]
pub struct KeywordFamily<L> {
    pub label: L,
    pub keywords: &'static [&'static str],
}

impl<L> KeywordFamily<L> {
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| word_starts(lowered, k).next().is_some())
    }

    /// Total keyword occurrences, overlapping families counted separately
    pub fn occurrences(&self, lowered: &str) -> usize {
        self.keywords.iter().map(|k| word_starts(lowered, k).count()).sum()
    }
}

/// Byte offsets where `keyword` occurs at the start of a word
fn word_starts<'a>(lowered: &'a str, keyword: &'a str) -> impl Iterator<Item = usize> + 'a {
    lowered
        .match_indices(keyword)
        .map(|(at, _)| at)
        .filter(move |&at| {
            lowered[..at]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric())
        })
}

type Family = KeywordFamily<&'static str>;

pub const FRAMEWORKS: &[Family] = &[
    Family { label: "MECE", keywords: &["mece"] },
    Family { label: "Porter's Five Forces", keywords: &["porter's", "porter ", "five forces", "5 forces", "cinco forças"] },
    Family { label: "SWOT", keywords: &["swot"] },
    Family { label: "BCG Matrix", keywords: &["bcg"] },
    Family { label: "Value Chain", keywords: &["value chain", "cadeia de valor"] },
    Family { label: "PESTEL", keywords: &["pestel", "pestle"] },
    Family { label: "Ansoff Matrix", keywords: &["ansoff"] },
    Family { label: "Blue Ocean", keywords: &["blue ocean", "oceano azul"] },
];

pub const CHARTS: &[KeywordFamily<ChartKind>] = &[
    KeywordFamily { label: ChartKind::Bar, keywords: &["bar chart", "bar graph", "gráfico de barras", "barras"] },
    KeywordFamily { label: ChartKind::Pie, keywords: &["pie chart", "gráfico de pizza", "gráfico de torta"] },
    KeywordFamily { label: ChartKind::Line, keywords: &["line chart", "line graph", "gráfico de linha", "linha do tempo"] },
    KeywordFamily { label: ChartKind::Scatter, keywords: &["scatter", "dispersão"] },
    KeywordFamily { label: ChartKind::Heatmap, keywords: &["heatmap", "heat map", "mapa de calor"] },
    KeywordFamily { label: ChartKind::Matrix, keywords: &["matrix", "matriz"] },
];

const MARKET: &[&str] = &["market", "mercado"];
const PRICING: &[&str] = &["pricing", "price", "preço", "precificação"];
const COMPETITOR: &[&str] = &["competitor", "competition", "competitive", "concorrente", "concorrência"];
const FINANCIAL: &[&str] = &["financial", "finance", "revenue", "profit", "financeiro", "receita", "lucro"];
const STRATEGY: &[&str] = &["strategy", "strategic", "estratégia"];
const GROWTH: &[&str] = &["growth", "crescimento", "expansion", "expansão"];

/// Per-message topic tags
pub const TAGS: &[Family] = &[
    Family { label: "market", keywords: MARKET },
    Family { label: "pricing", keywords: PRICING },
    Family { label: "competitor", keywords: COMPETITOR },
    Family { label: "financial", keywords: FINANCIAL },
    Family { label: "strategy", keywords: STRATEGY },
];

/// Thread-level topic labels emitted by the heuristic summarizer, in output order
pub const SUMMARY_TOPICS: &[Family] = &[
    Family { label: "Market Analysis", keywords: MARKET },
    Family { label: "Pricing Strategy", keywords: PRICING },
    Family { label: "Competitive Landscape", keywords: COMPETITOR },
    Family { label: "Growth Strategy", keywords: GROWTH },
    Family { label: "Financial Planning", keywords: FINANCIAL },
];

pub const KEY_INSIGHT: Family = Family {
    label: "insight",
    keywords: &["insight", "key finding", "key takeaway", "principal descoberta", "conclusão principal"],
};

pub const DECISION: Family = Family {
    label: "decision",
    keywords: &["decided", "we decide", "let's decide", "decision", "recommend", "let's go with", "we'll go with", "decidi", "decisão", "recomend"],
};

/// Opening words that mark a question even without a question mark
///
/// Openers that also start statements or imperatives ("do", "is", "como") only
/// count when the message carries a `?`.
pub const INTERROGATIVES: &[&str] = &[
    "what", "how", "why", "when", "where", "which", "who", "should", "could", "would",
    "qual", "quais", "quando", "onde", "quem", "quanto",
];

pub const POSITIVE: Family = Family {
    label: "positive",
    keywords: &[
        "good", "great", "excellent", "strong", "opportunit", "success", "improve", "benefit",
        "profitable", "positive", "bom", "ótimo", "oportunidade", "sucesso",
    ],
};

pub const NEGATIVE: Family = Family {
    label: "negative",
    keywords: &[
        "bad", "poor", "weak", "risk", "threat", "decline", "loss", "problem", "concern", "fail",
        "negative", "ruim", "risco", "ameaça", "problema",
    ],
};

/// Canonical framework names mentioned anywhere in `lowered`
pub fn frameworks_in(lowered: &str) -> impl Iterator<Item = &'static str> + '_ {
    FRAMEWORKS.iter().filter(move |f| f.matches(lowered)).map(|f| f.label)
}
