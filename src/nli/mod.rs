//! Entailment (NLI) backends used for AutoAIS.
//!
//! - [`t5`] runs a TRUE-style T5 checkpoint locally with candle.
//! - [`remote`] delegates to an HTTP scoring service.
//! - [`lexical`] is a token-overlap heuristic for dry runs.
//!
//! All of them implement [`EntailmentModel`]; [`load_model`] picks one from [`NliConfig`].

pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
pub mod error;
pub mod lexical;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;
pub mod remote;
pub mod t5;
/// Tokenizer and weight-file helpers.
pub mod utils;


pub use config::{MAX_SEQ_LEN, NliBackend, NliConfig};
pub use error::NliError;
pub use lexical::LexicalEntailment;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEntailmentModel;
pub use model::{EntailmentModel, load_model};
pub use remote::HttpEntailment;
pub use t5::{T5Entailment, entailment_probability, model_input};
