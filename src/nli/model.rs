use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::config::{NliBackend, NliConfig};
use super::error::NliError;
use super::lexical::LexicalEntailment;
use super::remote::HttpEntailment;
use super::t5::T5Entailment;

/// Black-box entailment classifier: probability that `premise` supports `hypothesis`.
#[async_trait]
pub trait EntailmentModel: Send + Sync {
    /// Returns a score in `[0, 1]`.
    async fn predict(&self, premise: &str, hypothesis: &str) -> Result<f32, NliError>;

    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Calls the backend can work on at once. `None` means callers need not queue.
    fn max_concurrency(&self) -> Option<usize> {
        None
    }
}

/// Builds the backend selected by `config`.
pub fn load_model(config: &NliConfig) -> Result<Arc<dyn EntailmentModel>, NliError> {
    config
        .validate()
        .map_err(|reason| NliError::InvalidConfig { reason })?;

    info!(backend = %config.backend, timeout = ?config.timeout, "Loading entailment backend");

    let model: Arc<dyn EntailmentModel> = match config.backend {
        NliBackend::T5 => Arc::new(T5Entailment::load(config)?),
        NliBackend::Http => Arc::new(HttpEntailment::new(config)?),
        NliBackend::Lexical => Arc::new(LexicalEntailment::new()),
    };

    Ok(model)
}
