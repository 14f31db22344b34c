//! Summaries of the distributed `ratings.csv`.
//!
//! Each row carries a system's answer and attribution together with the human AIS
//! rating, the AutoAIS label and the raw NLI score. [`summarize`] reports per-system
//! rates and how often AutoAIS agrees with the human raters.

pub mod error;
pub mod loader;
pub mod types;


pub use error::{RatingsError, RatingsResult};
pub use loader::{OVERALL, load_ratings, summarize};
pub use types::{RatingRow, RatingsSummary, SystemSummary};
