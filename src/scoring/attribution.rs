use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::corpus::premise_text;
use crate::nli::{EntailmentModel, NliConfig, NliError};

use super::error::ScoringError;
use super::types::AttributionJudgment;

/// Declarative hypothesis checked against the cited passage.
pub fn hypothesis_text(question: &str, answer: &str) -> String {
    format!("The answer to the question '{question}' is '{answer}'")
}

/// Formats premise/hypothesis, calls the entailment model under a deadline, thresholds.
///
/// Backends that serve a bounded number of calls get one permit per call; the deadline
/// only starts once the permit is held, so queueing behind other records never counts
/// against a record's own timeout.
#[derive(Clone)]
pub struct AttributionScorer {
    model: Arc<dyn EntailmentModel>,
    slots: Option<Arc<Semaphore>>,
    timeout: Duration,
}

impl std::fmt::Debug for AttributionScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributionScorer")
            .field("model", &self.model.name())
            .field("max_concurrency", &self.model.max_concurrency())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AttributionScorer {
    pub fn new(model: Arc<dyn EntailmentModel>, config: &NliConfig) -> Self {
        let slots = model
            .max_concurrency()
            .map(|permits| Arc::new(Semaphore::new(permits.max(1))));
        Self {
            model,
            slots,
            timeout: config.timeout,
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub async fn score(
        &self,
        question: &str,
        answer: &str,
        passage_text: &str,
    ) -> Result<AttributionJudgment, ScoringError> {
        let premise = premise_text(passage_text);
        let hypothesis = hypothesis_text(question, answer);

        let _permit = match &self.slots {
            Some(slots) => Some(slots.acquire().await.map_err(|e| NliError::InferenceFailed {
                reason: format!("entailment slots closed: {e}"),
            })?),
            None => None,
        };

        let nli_score = tokio::time::timeout(self.timeout, self.model.predict(&premise, &hypothesis))
            .await
            .map_err(|_| ScoringError::Timeout {
                after: self.timeout,
            })??;

        if !(0.0..=1.0).contains(&nli_score) {
            return Err(ScoringError::InvalidScore { score: nli_score });
        }

        let judgment = AttributionJudgment::from_score(nli_score);
        debug!(nli_score, auto_ais = judgment.auto_ais, "Attribution scored");
        Ok(judgment)
    }
}
