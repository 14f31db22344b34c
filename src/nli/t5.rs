//! TRUE-style T5 entailment checkpoint.
//!
//! The model is prompted with `premise: ... hypothesis: ...` and generates `1` when the
//! premise entails the hypothesis, `0` otherwise. The score is the probability mass of
//! `1` relative to `0` at the first decoder step.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::t5::{Config, T5ForConditionalGeneration};
use parking_lot::Mutex;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use super::config::{MAX_SEQ_LEN, NliConfig};
use super::device::select_device;
use super::error::NliError;
use super::model::EntailmentModel;
use super::utils::{load_tokenizer_with_truncation, safetensors_files};

const ENTAILED_LABEL: &str = "1";
const NOT_ENTAILED_LABEL: &str = "0";

/// Text fed to the seq2seq model.
pub fn model_input(premise: &str, hypothesis: &str) -> String {
    format!("premise: {premise} hypothesis: {hypothesis}")
}

struct T5Inner {
    model: Mutex<T5ForConditionalGeneration>,
    tokenizer: Tokenizer,
    device: Device,
    decoder_start_token_id: u32,
    entailed_id: u32,
    not_entailed_id: u32,
}

#[derive(Clone)]
pub struct T5Entailment {
    inner: Arc<T5Inner>,
}

impl std::fmt::Debug for T5Entailment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("T5Entailment")
            .field("device", &format!("{:?}", self.inner.device))
            .field("entailed_id", &self.inner.entailed_id)
            .field("not_entailed_id", &self.inner.not_entailed_id)
            .finish()
    }
}

impl T5Entailment {
    pub fn load(config: &NliConfig) -> Result<Self, NliError> {
        let model_path = config
            .model_path
            .as_deref()
            .ok_or_else(|| NliError::InvalidConfig {
                reason: "model_path is required for the t5 backend".to_string(),
            })?;

        if !model_path.exists() {
            return Err(NliError::ModelNotFound {
                path: model_path.to_path_buf(),
            });
        }

        let config_path = model_path.join("config.json");
        if !config_path.exists() {
            return Err(NliError::ModelLoadFailed {
                reason: format!("Missing config.json in {}", model_path.display()),
            });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for entailment model");

        info!(model_path = %model_path.display(), "Loading T5 entailment model");

        let model_config: Config = serde_json::from_str(&std::fs::read_to_string(&config_path)?)
            .map_err(|e| NliError::ModelLoadFailed {
                reason: format!("Failed to parse config: {}", e),
            })?;

        let model = load_weights(model_path, &model_config, &device)?;

        let tokenizer = load_tokenizer_with_truncation(model_path, MAX_SEQ_LEN).map_err(|e| {
            NliError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        let entailed_id = label_token_id(&tokenizer, ENTAILED_LABEL)?;
        let not_entailed_id = label_token_id(&tokenizer, NOT_ENTAILED_LABEL)?;
        let decoder_start_token_id = model_config
            .decoder_start_token_id
            .unwrap_or(model_config.pad_token_id) as u32;

        info!(entailed_id, not_entailed_id, "T5 entailment model loaded successfully");

        Ok(Self {
            inner: Arc::new(T5Inner {
                model: Mutex::new(model),
                tokenizer,
                device,
                decoder_start_token_id,
                entailed_id,
                not_entailed_id,
            }),
        })
    }
}

fn load_weights(
    model_path: &Path,
    config: &Config,
    device: &Device,
) -> Result<T5ForConditionalGeneration, NliError> {
    let weights = safetensors_files(model_path)?;
    debug!(files = weights.len(), "Mapping safetensors weights");

    // SAFETY: weight files are not modified while mapped.
    let vb = unsafe { VarBuilder::from_mmaped_safetensors(&weights, DType::F32, device) }
        .map_err(|e| NliError::ModelLoadFailed {
            reason: format!("Failed to map weights: {}", e),
        })?;

    T5ForConditionalGeneration::load(vb, config).map_err(|e| NliError::ModelLoadFailed {
        reason: format!("Failed to load T5 model: {}", e),
    })
}

fn label_token_id(tokenizer: &Tokenizer, label: &str) -> Result<u32, NliError> {
    let encoding = tokenizer
        .encode(label, false)
        .map_err(|e| NliError::TokenizationFailed {
            reason: e.to_string(),
        })?;

    encoding
        .get_ids()
        .first()
        .copied()
        .ok_or_else(|| NliError::TokenizationFailed {
            reason: format!("label '{label}' has no token id"),
        })
}

impl T5Inner {
    fn score(&self, premise: &str, hypothesis: &str) -> Result<f32, NliError> {
        let input = model_input(premise, hypothesis);
        let tokens = self
            .tokenizer
            .encode(input.as_str(), true)
            .map_err(|e| NliError::TokenizationFailed {
                reason: e.to_string(),
            })?;

        let input_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let decoder_ids = Tensor::new(&[self.decoder_start_token_id], &self.device)?.unsqueeze(0)?;

        let logits = {
            let mut model = self.model.lock();
            model.clear_kv_cache();
            let encoder_output = model.encode(&input_ids)?;
            let logits = model.decode(&decoder_ids, &encoder_output)?;
            model.clear_kv_cache();
            logits
        };

        let logits = logits.flatten_all()?.to_dtype(DType::F32)?.to_vec1::<f32>()?;
        let pick = |id: u32| {
            logits
                .get(id as usize)
                .copied()
                .ok_or_else(|| NliError::InferenceFailed {
                    reason: format!("token id {id} outside vocabulary of {}", logits.len()),
                })
        };

        let entailed = pick(self.entailed_id)?;
        let not_entailed = pick(self.not_entailed_id)?;

        Ok(entailment_probability(entailed, not_entailed))
    }
}

/// Two-way softmax: `p(entailed) = 1 / (1 + exp(not_entailed - entailed))`.
pub fn entailment_probability(entailed_logit: f32, not_entailed_logit: f32) -> f32 {
    1.0 / (1.0 + (not_entailed_logit - entailed_logit).exp())
}

#[async_trait]
impl EntailmentModel for T5Entailment {
    async fn predict(&self, premise: &str, hypothesis: &str) -> Result<f32, NliError> {
        let inner = Arc::clone(&self.inner);
        let premise = premise.to_string();
        let hypothesis = hypothesis.to_string();

        tokio::task::spawn_blocking(move || inner.score(&premise, &hypothesis))
            .await
            .map_err(|e| NliError::InferenceFailed {
                reason: format!("inference task failed: {e}"),
            })?
    }

    fn name(&self) -> &str {
        "t5"
    }

    /// One model instance behind a mutex.
    fn max_concurrency(&self) -> Option<usize> {
        Some(1)
    }
}
