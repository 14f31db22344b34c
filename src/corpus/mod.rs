//! Attribution corpus index.
//!
//! Shards matched by a glob are parsed into paragraph-level [`Passage`]s and collected
//! into a [`CorpusIndex`] keyed by identifier:
//!
//! ```text
//! http://en.wikipedia.org/wiki/Jason_Flemyng#Jason_Flemyng#Television_and_film_work#2
//! <source>                                  #<title>      #<section>               #<ordinal>
//! ```
//!
//! Identifiers are taken verbatim from JSON-lines shards when present and derived from
//! the passage framing otherwise (see [`passage::derive_identifier`]).

pub mod config;
pub mod error;
pub mod index;
pub mod passage;
pub mod shard;


pub use config::CorpusConfig;
pub use error::{CorpusError, CorpusResult};
pub use index::{CorpusIndex, expand_pattern};
pub use passage::{Passage, PassageParts, ais_text, derive_identifier, premise_text};
pub use shard::{ShardContents, ShardFormat, read_shard};
