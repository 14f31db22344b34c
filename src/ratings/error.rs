use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RatingsError {
    #[error("failed to open ratings file {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("failed reading ratings file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("malformed ratings row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("ratings file {path} has no rows")]
    Empty { path: PathBuf },
}

pub type RatingsResult<T> = Result<T, RatingsError>;
