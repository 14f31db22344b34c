//! Text normalization shared by the join keys and the answer metrics.
//!
//! Question normalization only has to make the predictions file and the reference set
//! agree on keys. Answer normalization follows the SQuAD evaluation script.


/// Whole-token articles dropped before answers are compared.
pub const ARTICLES: [&str; 3] = ["a", "an", "the"];

/// Lowercases, trims, and collapses internal whitespace runs to a single space.
pub fn normalize_question(question: &str) -> String {
    question
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// SQuAD answer normalization: lowercase, strip punctuation, drop articles, fix whitespace.
pub fn normalize_answer(answer: &str) -> String {
    let without_punctuation: String = answer
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    without_punctuation
        .split_whitespace()
        .filter(|token| !ARTICLES.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokens of a normalized answer, used by the F1 metric.
pub fn answer_tokens(answer: &str) -> Vec<String> {
    normalize_answer(answer)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
