//! System predictions: `question,answer,attribution` CSV rows.
//!
//! The header row is optional. Rows are joined against the reference questions and the
//! corpus identifiers; rows that miss either join, or that are malformed, are dropped
//! and counted in [`LoadReport`] rather than failing the run.

pub mod error;
pub mod loader;
pub mod types;


pub use error::{PredictionsError, PredictionsResult};
pub use loader::{LoadedPredictions, collect_attribution_ids, load_predictions};
pub use types::{KnownKeys, LoadReport, PredictionRecord};
