//! Aggregation and the two output artifacts.
//!
//! The scores file is a handful of `name: value` lines (`AutoAIS`, `SQuAD (em)`, ...,
//! plus skip counters). The AIS table is a CSV of `question,answer,passage,autoais`
//! with passages in `Title:`/`Section:` framing for human raters.

pub mod error;
pub mod summary;
pub mod writer;

#[cfg(test)]
mod tests;

pub use error::{ReportError, ReportResult};
pub use summary::{MetricValue, RunCounts, ScoreSummary, aggregate};
pub use writer::{AIS_TABLE_HEADER, write_ais_table, write_outputs, write_scores};
