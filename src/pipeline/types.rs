use crate::config::RunPaths;
use crate::reference::ReferenceSource;
use crate::report::ScoreSummary;
use crate::scoring::ScoredRecord;

/// Everything one evaluation run reads and writes.
#[derive(Debug, Clone)]
pub struct RunInputs {
    pub paths: RunPaths,
    pub reference: ReferenceSource,
}

/// Result of the concurrent scoring stage, in input order.
#[derive(Debug, Clone, Default)]
pub struct ScoringOutcome {
    pub scored: Vec<ScoredRecord>,
    /// Records dropped because the entailment backend failed for them.
    pub unavailable: usize,
}

impl ScoringOutcome {
    /// Fraction of attempted records that could not be scored.
    pub fn skip_fraction(&self) -> f64 {
        let attempted = self.scored.len() + self.unavailable;
        if attempted == 0 {
            return 0.0;
        }
        self.unavailable as f64 / attempted as f64
    }
}

/// Final state of a run: the summary plus the per-record rows behind it.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub summary: ScoreSummary,
    pub records: Vec<ScoredRecord>,
}
