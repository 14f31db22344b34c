use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NliError {
    #[error("entailment model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load entailment model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("entailment inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid entailment configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("entailment backend at {url} unreachable: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("invalid entailment response: {reason}")]
    InvalidResponse { reason: String },
}

impl From<candle_core::Error> for NliError {
    fn from(err: candle_core::Error) -> Self {
        NliError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for NliError {
    fn from(err: std::io::Error) -> Self {
        NliError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
