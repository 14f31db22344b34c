//! Attributed QA evaluation library (used by the `aqa-eval` and `aqa-ratings` binaries
//! and integration tests).
//!
//! A system answers each question with a short answer plus the identifier of the corpus
//! passage it attributes the answer to. Evaluation reports:
//! - SQuAD exact match / F1 of the answer against the reference answers, and
//! - AutoAIS: whether an entailment model judges the passage to support the answer.
//!
//! ## Modules
//! - [`corpus`] - passage index built from Wikipedia shards
//! - [`reference`] - gold answers keyed by normalized question
//! - [`predictions`] - system output, filtered against both lookups
//! - [`nli`] - entailment backends ([`EntailmentModel`])
//! - [`scoring`] - per-record EM/F1 and AutoAIS
//! - [`report`] - aggregation, scores file, AIS table
//! - [`pipeline`] - one run end to end
//! - [`ratings`] - summaries of the distributed human ratings
//!
//! ## Test/Mock Support
//! [`MockEntailmentModel`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod corpus;
pub mod nli;
pub mod pipeline;
pub mod predictions;
pub mod ratings;
pub mod reference;
pub mod report;
pub mod scoring;
pub mod text;

pub use config::{ConfigError, EvalConfig, RunPaths};
pub use corpus::{CorpusConfig, CorpusError, CorpusIndex, Passage};
#[cfg(any(test, feature = "mock"))]
pub use nli::MockEntailmentModel;
pub use nli::{EntailmentModel, NliBackend, NliConfig, NliError, load_model};
pub use pipeline::{Evaluation, Pipeline, PipelineError, RunInputs};
pub use predictions::{LoadReport, PredictionRecord, PredictionsError};
pub use ratings::{RatingRow, RatingsError, RatingsSummary, load_ratings, summarize};
pub use reference::{DatasetVersion, ReferenceError, ReferenceSet, ReferenceSource};
pub use report::{ReportError, RunCounts, ScoreSummary};
pub use scoring::{AttributionJudgment, ScoredRecord, ScoringError};
pub use text::{normalize_answer, normalize_question};
