//! Per-example scoring.
//!
//! - [`answer`]: SQuAD exact match / F1 against the reference answers.
//! - [`attribution`]: AutoAIS, i.e. the entailment score of the cited passage
//!   thresholded at [`AUTOAIS_THRESHOLD`](crate::constants::AUTOAIS_THRESHOLD).
//! - [`scorer`]: both, for one [`PredictionRecord`](crate::predictions::PredictionRecord).

pub mod answer;
pub mod attribution;
pub mod error;
pub mod scorer;
pub mod types;


pub use answer::{exact_match, f1};
pub use attribution::{AttributionScorer, hypothesis_text};
pub use error::ScoringError;
pub use scorer::RecordScorer;
pub use types::{AttributionJudgment, ScoredRecord};
