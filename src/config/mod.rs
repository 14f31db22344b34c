//! Environment-backed configuration.
//!
//! File locations come from the command line ([`RunPaths`]); tuning and the entailment
//! backend come from `AQA_*` environment variables on top of defaults ([`EvalConfig`]).

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constants::{DEFAULT_MAX_SKIP_FRACTION, DEFAULT_PROCESSES, DEFAULT_SCORING_CONCURRENCY};
use crate::nli::NliConfig;

/// Evaluation settings loaded from environment variables.
///
/// Use [`EvalConfig::from_env`] to read `AQA_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Root of locally cached datasets. Default: `./data`.
    pub data_dir: PathBuf,

    /// Concurrent corpus shard readers. Default: `16`.
    pub processes: usize,

    /// In-flight entailment calls. Default: `4`.
    pub scoring_concurrency: usize,

    /// Fraction of unscorable records above which the run warns. Default: `0.1`.
    pub max_skip_fraction: f64,

    /// Only keep corpus passages cited by the predictions. Default: `true`.
    pub restrict_corpus: bool,

    /// Entailment backend.
    pub nli: NliConfig,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            processes: DEFAULT_PROCESSES,
            scoring_concurrency: DEFAULT_SCORING_CONCURRENCY,
            max_skip_fraction: DEFAULT_MAX_SKIP_FRACTION,
            restrict_corpus: true,
            nli: NliConfig::default(),
        }
    }
}

impl EvalConfig {
    const ENV_DATA_DIR: &'static str = "AQA_DATA_DIR";
    const ENV_PROCESSES: &'static str = "AQA_PROCESSES";
    const ENV_SCORING_CONCURRENCY: &'static str = "AQA_SCORING_CONCURRENCY";
    const ENV_MAX_SKIP_FRACTION: &'static str = "AQA_MAX_SKIP_FRACTION";
    const ENV_RESTRICT_CORPUS: &'static str = "AQA_RESTRICT_CORPUS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = Self::parse_path_from_env(Self::ENV_DATA_DIR, defaults.data_dir);
        let processes = Self::parse_from_env(Self::ENV_PROCESSES, defaults.processes)?;
        let scoring_concurrency =
            Self::parse_from_env(Self::ENV_SCORING_CONCURRENCY, defaults.scoring_concurrency)?;
        let max_skip_fraction =
            Self::parse_from_env(Self::ENV_MAX_SKIP_FRACTION, defaults.max_skip_fraction)?;
        let restrict_corpus =
            Self::parse_from_env(Self::ENV_RESTRICT_CORPUS, defaults.restrict_corpus)?;
        let nli = NliConfig::from_env().map_err(|reason| ConfigError::InvalidNli { reason })?;

        Ok(Self {
            data_dir,
            processes,
            scoring_concurrency,
            max_skip_fraction,
            restrict_corpus,
            nli,
        })
    }

    /// Checks value ranges and the entailment backend settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processes == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_PROCESSES,
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.scoring_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_SCORING_CONCURRENCY,
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.max_skip_fraction) {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MAX_SKIP_FRACTION,
                value: self.max_skip_fraction.to_string(),
                reason: "must be between 0.0 and 1.0".to_string(),
            });
        }

        self.nli
            .validate()
            .map_err(|reason| ConfigError::InvalidNli { reason })
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidValue {
                    name: var_name,
                    value: value.clone(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    }
}

/// Input and output locations of one evaluation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub predictions_file: PathBuf,
    pub wikipedia_glob: String,
    pub scores_file: PathBuf,
    pub ais_output_file: PathBuf,
}

impl RunPaths {
    /// Input file must exist; output files must land in existing directories.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.predictions_file.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.predictions_file.clone(),
            });
        }
        if !self.predictions_file.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.predictions_file.clone(),
            });
        }

        for output in [&self.scores_file, &self.ais_output_file] {
            Self::check_output_parent(output)?;
        }

        Ok(())
    }

    fn check_output_parent(path: &Path) -> Result<(), ConfigError> {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };
        if !parent.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: parent.to_path_buf(),
            });
        }
        Ok(())
    }
}
