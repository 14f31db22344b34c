//! Cross-cutting, shared constants.
//!
//! The dataset identity, split and AutoAIS threshold below must stay in line with the
//! Attributed QA paper so that scores are comparable with published numbers.

/// Reference dataset used for the SQuAD-style answer metrics.
pub const NQ_OPEN: &str = "natural_questions_open:1.0.0";

/// Split of [`NQ_OPEN`] the predictions are evaluated against.
pub const NQ_SPLIT: &str = "validation";

/// Entailment checkpoint the AutoAIS numbers were reported with.
pub const AUTOAIS_MODEL: &str = "google/t5_xxl_true_nli_mixture";

/// `auto_ais = nli_score > AUTOAIS_THRESHOLD`.
pub const AUTOAIS_THRESHOLD: f32 = 0.5;

/// Separator between the parts of a corpus passage identifier.
pub const ID_SEPARATOR: char = '#';

/// Default number of concurrent shard readers.
pub const DEFAULT_PROCESSES: usize = 16;

/// Default number of in-flight entailment calls.
pub const DEFAULT_SCORING_CONCURRENCY: usize = 4;

/// Default per-call entailment timeout.
pub const DEFAULT_NLI_TIMEOUT_SECS: u64 = 120;

/// Skip fraction above which the run warns that metrics cover a reduced set.
pub const DEFAULT_MAX_SKIP_FRACTION: f64 = 0.1;

/// Scores-file metric names.
pub const METRIC_AUTOAIS: &str = "AutoAIS";
pub const METRIC_SQUAD_EM: &str = "SQuAD (em)";
pub const METRIC_SQUAD_F1: &str = "SQuAD (f1)";
