use thiserror::Error;

use crate::config::ConfigError;
use crate::corpus::CorpusError;
use crate::nli::NliError;
use crate::predictions::PredictionsError;
use crate::reference::ReferenceError;
use crate::report::ReportError;

/// Run-level failures. Each variant aborts the run before or after scoring.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Predictions(#[from] PredictionsError),

    /// The entailment backend could not be brought up at all.
    #[error(transparent)]
    Nli(#[from] NliError),

    #[error(transparent)]
    Report(#[from] ReportError),

    /// A filtered record no longer matches the lookups it was filtered against.
    #[error("record refers to missing {what} '{key}'")]
    Inconsistent { what: &'static str, key: String },
}

impl PipelineError {
    /// Error taxonomy name, printed ahead of the message by the binaries.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Config(_) => "ConfigError",
            PipelineError::Corpus(_) => "CorpusLoadError",
            PipelineError::Reference(_) => "ReferenceLoadError",
            PipelineError::Predictions(_) => "PredictionsParseError",
            PipelineError::Nli(_) => "ScoringUnavailableError",
            PipelineError::Report(_) => "ReportWriteError",
            PipelineError::Inconsistent { .. } => "InternalError",
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
