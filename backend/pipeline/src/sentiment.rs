//! Keyword-based sentiment tagging.
//!
//! Intentionally simple: counts substring occurrences of fixed word lists.
//! This is not an NLP engine and must stay that way.

use chol_core::Sentiment;

const POSITIVE_WORDS: &[&str] = &[
    "thank",
    "good",
    "great",
    "excellent",
    "appreciate",
    "help",
    "love",
    "like",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "poor",
    "terrible",
    "unhelpful",
    "hate",
    "dislike",
    "worst",
];

/// Classify a query as positive, negative, or neutral.
///
/// Pure function; ties (including zero matches) are neutral.
pub fn analyze_sentiment(query: &str) -> Sentiment {
    let query_lower = query.to_lowercase();

    let positive_score = POSITIVE_WORDS
        .iter()
        .filter(|word| query_lower.contains(**word))
        .count();
    let negative_score = NEGATIVE_WORDS
        .iter()
        .filter(|word| query_lower.contains(**word))
        .count();

    if positive_score > negative_score {
        Sentiment::Positive
    } else if negative_score > positive_score {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
