//! End-to-end evaluation run.
//!
//! ```text
//! predictions ──(cited ids)──► corpus index ─┐
//! reference set ─────────────────────────────┼─► filtered predictions ─► scoring ─► summary
//!                                            │                                   └► scores file
//!                                            └──────────────────────────────────────► AIS table
//! ```
//!
//! Loader failures abort the run; row- and record-level problems are counted in
//! [`RunCounts`](crate::report::RunCounts) and surface in the scores file.

pub mod error;
pub mod runner;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{PipelineError, PipelineResult};
pub use runner::{Pipeline, missing_predictions};
pub use types::{Evaluation, RunInputs, ScoringOutcome};
