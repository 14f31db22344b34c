//! Gold answers for the evaluated question set.
//!
//! Reference data is NQ-open style JSON lines (`{"question": ..., "answer": [...]}`)
//! read from disk or over HTTP. Questions are keyed with
//! [`normalize_question`](crate::text::normalize_question) so predictions join on the
//! same form.

pub mod error;
pub mod loader;


pub use error::{ReferenceError, ReferenceResult};
pub use loader::{DatasetVersion, ReferenceExample, ReferenceSet, ReferenceSource};
