use thiserror::Error;

/// Failures while loading the gold question/answer set. Always fatal.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("invalid dataset version '{value}': expected '<name>:<version>'")]
    InvalidVersion { value: String },

    #[error("failed to read reference data from {origin}: {reason}")]
    FetchFailed { origin: String, reason: String },

    #[error("malformed reference example in {origin} at line {line}: {reason}")]
    MalformedExample {
        origin: String,
        line: usize,
        reason: String,
    },

    #[error("reference data from {origin} contains no examples")]
    Empty { origin: String },
}

pub type ReferenceResult<T> = Result<T, ReferenceError>;
