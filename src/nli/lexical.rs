//! Token-overlap stand-in for an entailment model.
//!
//! Scores how much of the hypothesis' content vocabulary appears in the premise, squashed
//! through a logistic curve. Deterministic and dependency free; useful for dry runs of the
//! pipeline, never for reported numbers.

use std::collections::HashSet;

use async_trait::async_trait;

use super::error::NliError;
use super::model::EntailmentModel;

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "to", "of",
    "in", "for", "on", "with", "at", "by", "from", "as", "into", "and", "but", "if", "or",
    "what", "which", "who", "whom", "when", "where", "why", "how", "this", "that", "these",
    "those", "it", "its", "answer", "question",
];

#[derive(Debug, Clone, Default)]
pub struct LexicalEntailment;

impl LexicalEntailment {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, premise: &str, hypothesis: &str) -> f32 {
        let premise_words = content_words(premise);
        let hypothesis_words = content_words(hypothesis);

        if hypothesis_words.is_empty() {
            return 0.0;
        }

        let matches = hypothesis_words.intersection(&premise_words).count();
        let recall = matches as f32 / hypothesis_words.len() as f32;

        let squashed = 1.0 / (1.0 + (-8.0 * (recall - 0.5)).exp());
        squashed.clamp(0.0, 1.0)
    }
}

fn content_words(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl EntailmentModel for LexicalEntailment {
    async fn predict(&self, premise: &str, hypothesis: &str) -> Result<f32, NliError> {
        Ok(self.score(premise, hypothesis))
    }

    fn name(&self) -> &str {
        "lexical"
    }
}
