use std::path::PathBuf;
use thiserror::Error;

/// Corpus loading failures. All of them abort the run before scoring starts.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("invalid corpus glob '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("no corpus files match '{pattern}'")]
    NoFilesMatched { pattern: String },

    #[error("failed to read corpus shard {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed passage in {path} at line {line}: {reason}")]
    MalformedPassage {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("corpus shard {path} contains no passages")]
    EmptyShard { path: PathBuf },

    #[error("duplicate passage identifier '{identifier}' (in {path})")]
    DuplicateIdentifier { identifier: String, path: PathBuf },

    #[error("shard reader failed: {reason}")]
    ReaderFailed { reason: String },
}

pub type CorpusResult<T> = Result<T, CorpusError>;
