use std::collections::HashSet;

use crate::corpus::CorpusIndex;
use crate::reference::ReferenceSet;

/// One predictions-file row. Duplicate rows are independent records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredictionRecord {
    pub question: String,
    pub answer: String,
    pub attribution_id: String,
}

impl PredictionRecord {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        attribution_id: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            attribution_id: attribution_id.into(),
        }
    }
}

/// Row counters from a predictions load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows: usize,
    pub loaded: usize,
    pub malformed: usize,
    pub unknown_question: usize,
    pub unknown_attribution: usize,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.malformed + self.unknown_question + self.unknown_attribution
    }
}

/// Membership test used to filter predictions against the loaded lookups.
pub trait KnownKeys {
    fn is_known(&self, key: &str) -> bool;
}

/// Keys are normalized questions.
impl KnownKeys for ReferenceSet {
    fn is_known(&self, key: &str) -> bool {
        self.contains_normalized(key)
    }
}

impl KnownKeys for CorpusIndex {
    fn is_known(&self, key: &str) -> bool {
        self.contains(key)
    }
}

impl KnownKeys for HashSet<String> {
    fn is_known(&self, key: &str) -> bool {
        self.contains(key)
    }
}
