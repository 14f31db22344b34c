use crate::constants::AUTOAIS_THRESHOLD;
use crate::predictions::PredictionRecord;

/// Thresholded entailment result for one `(question, answer, passage)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributionJudgment {
    /// Entailment probability in `[0, 1]`.
    pub nli_score: f32,
    /// `nli_score > AUTOAIS_THRESHOLD`.
    pub auto_ais: bool,
}

impl AttributionJudgment {
    pub fn from_score(nli_score: f32) -> Self {
        Self {
            nli_score,
            auto_ais: nli_score > AUTOAIS_THRESHOLD,
        }
    }

    /// `Y`/`N` label used in the output table and ratings file.
    pub fn label(&self) -> &'static str {
        if self.auto_ais { "Y" } else { "N" }
    }
}

/// A prediction with its passage and all per-example scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: PredictionRecord,
    pub passage_text: String,
    pub em_score: f64,
    pub f1_score: f64,
    pub nli_score: f32,
    pub auto_ais: bool,
}

impl ScoredRecord {
    pub fn judgment(&self) -> AttributionJudgment {
        AttributionJudgment {
            nli_score: self.nli_score,
            auto_ais: self.auto_ais,
        }
    }
}
