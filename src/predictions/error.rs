use std::path::PathBuf;
use thiserror::Error;

/// Predictions-file failures.
///
/// [`PredictionsError::MalformedRow`] is row-level: the loader counts and skips it.
/// The other variants abort the run.
#[derive(Debug, Error)]
pub enum PredictionsError {
    #[error("failed to open predictions file {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("failed to read predictions file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("malformed prediction at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
}

pub type PredictionsResult<T> = Result<T, PredictionsError>;
