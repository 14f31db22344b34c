use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{AUTOAIS_THRESHOLD, DEFAULT_NLI_TIMEOUT_SECS};

/// Maximum encoder input length for the T5 backend.
pub const MAX_SEQ_LEN: usize = 512;

/// Which entailment implementation answers `predict` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NliBackend {
    /// Local candle T5 seq2seq checkpoint.
    #[default]
    T5,
    /// Remote scoring service.
    Http,
    /// Token-overlap heuristic, for dry runs only.
    Lexical,
}

impl FromStr for NliBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "t5" => Ok(NliBackend::T5),
            "http" => Ok(NliBackend::Http),
            "lexical" => Ok(NliBackend::Lexical),
            other => Err(format!(
                "unknown entailment backend '{other}' (expected t5, http or lexical)"
            )),
        }
    }
}

impl fmt::Display for NliBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NliBackend::T5 => "t5",
            NliBackend::Http => "http",
            NliBackend::Lexical => "lexical",
        })
    }
}

#[derive(Debug, Clone)]
pub struct NliConfig {
    pub backend: NliBackend,

    /// Directory with `config.json`, `tokenizer.json` and `*.safetensors` (T5 backend).
    pub model_path: Option<PathBuf>,

    /// Scoring endpoint (HTTP backend).
    pub url: Option<String>,

    /// Per-call deadline; expiry counts as the backend being unavailable.
    pub timeout: Duration,
}

impl Default for NliConfig {
    fn default() -> Self {
        Self {
            backend: NliBackend::default(),
            model_path: None,
            url: None,
            timeout: Duration::from_secs(DEFAULT_NLI_TIMEOUT_SECS),
        }
    }
}

impl NliConfig {
    const ENV_BACKEND: &'static str = "AQA_NLI_BACKEND";
    const ENV_MODEL_PATH: &'static str = "AQA_NLI_MODEL_PATH";
    const ENV_URL: &'static str = "AQA_NLI_URL";
    /// Rejected: the AutoAIS cut-off is fixed.
    const ENV_THRESHOLD: &'static str = "AQA_NLI_THRESHOLD";
    const ENV_TIMEOUT_SECS: &'static str = "AQA_NLI_TIMEOUT_SECS";

    pub fn t5<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            backend: NliBackend::T5,
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    pub fn http(url: impl Into<String>) -> Self {
        Self {
            backend: NliBackend::Http,
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn lexical() -> Self {
        Self {
            backend: NliBackend::Lexical,
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }

        match self.backend {
            NliBackend::T5 => match &self.model_path {
                None => return Err(format!("{} is required for the t5 backend", Self::ENV_MODEL_PATH)),
                Some(path) if path.as_os_str().is_empty() => {
                    return Err("model_path cannot be empty".to_string());
                }
                Some(_) => {}
            },
            NliBackend::Http => match self.url.as_deref() {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
                Some(url) => return Err(format!("invalid entailment url '{url}'")),
                None => return Err(format!("{} is required for the http backend", Self::ENV_URL)),
            },
            NliBackend::Lexical => {}
        }

        Ok(())
    }

    /// Reads `AQA_NLI_*` overrides on top of the defaults.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let backend = match std::env::var(Self::ENV_BACKEND) {
            Ok(value) => value.parse()?,
            Err(_) => defaults.backend,
        };

        let model_path = std::env::var(Self::ENV_MODEL_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let url = std::env::var(Self::ENV_URL)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        if std::env::var_os(Self::ENV_THRESHOLD).is_some() {
            return Err(format!(
                "{} is not supported: AutoAIS always uses the fixed {AUTOAIS_THRESHOLD} threshold",
                Self::ENV_THRESHOLD
            ));
        }

        let timeout = match std::env::var(Self::ENV_TIMEOUT_SECS) {
            Ok(value) => value
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|e| format!("invalid {} '{value}': {e}", Self::ENV_TIMEOUT_SECS))?,
            Err(_) => defaults.timeout,
        };

        Ok(Self {
            backend,
            model_path,
            url,
            timeout,
        })
    }
}
