use std::time::Duration;
use thiserror::Error;

use crate::nli::NliError;

/// Record-level scoring failures. The record is skipped and counted; the run continues.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("scoring unavailable: {0}")]
    Unavailable(#[from] NliError),

    #[error("scoring unavailable: entailment call timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("scoring unavailable: entailment model returned invalid score {score}")]
    InvalidScore { score: f32 },

    #[error("no {what} for '{key}'")]
    MissingLookup { what: &'static str, key: String },
}

impl ScoringError {
    /// `true` for the entailment-backend failures counted as "scoring unavailable".
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, ScoringError::MissingLookup { .. })
    }
}
