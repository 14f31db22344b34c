use tracing::debug;

use crate::corpus::CorpusIndex;
use crate::predictions::PredictionRecord;
use crate::reference::ReferenceSet;

use super::answer::{exact_match, f1};
use super::attribution::AttributionScorer;
use super::error::ScoringError;
use super::types::ScoredRecord;

/// Scores one prediction against the read-only lookups. Pure apart from the model call.
#[derive(Debug, Clone)]
pub struct RecordScorer {
    attribution: AttributionScorer,
}

impl RecordScorer {
    pub fn new(attribution: AttributionScorer) -> Self {
        Self { attribution }
    }

    pub fn attribution(&self) -> &AttributionScorer {
        &self.attribution
    }

    pub async fn score(
        &self,
        record: &PredictionRecord,
        corpus: &CorpusIndex,
        reference: &ReferenceSet,
    ) -> Result<ScoredRecord, ScoringError> {
        let references =
            reference
                .answers_for(&record.question)
                .ok_or_else(|| ScoringError::MissingLookup {
                    what: "reference answers",
                    key: record.question.clone(),
                })?;
        let passage_text =
            corpus
                .get(&record.attribution_id)
                .ok_or_else(|| ScoringError::MissingLookup {
                    what: "passage",
                    key: record.attribution_id.clone(),
                })?;

        let em_score = exact_match(&record.answer, references);
        let f1_score = f1(&record.answer, references);

        let judgment = self
            .attribution
            .score(&record.question, &record.answer, passage_text)
            .await?;

        debug!(
            question = %record.question,
            em = em_score,
            nli_score = judgment.nli_score,
            auto_ais = judgment.auto_ais,
            "Record scored"
        );

        Ok(ScoredRecord {
            record: record.clone(),
            passage_text: passage_text.to_string(),
            em_score,
            f1_score,
            nli_score: judgment.nli_score,
            auto_ais: judgment.auto_ais,
        })
    }
}
