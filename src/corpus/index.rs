use std::collections::HashMap;
use std::path::PathBuf;

use futures_util::StreamExt;
use futures_util::stream;
use tracing::{debug, info};

use super::config::CorpusConfig;
use super::error::{CorpusError, CorpusResult};
use super::passage::Passage;
use super::shard::{ShardContents, read_shard};

/// Read-only `identifier -> passage text` lookup built once per run.
#[derive(Debug, Default, Clone)]
pub struct CorpusIndex {
    passages: HashMap<String, String>,
}

impl CorpusIndex {
    /// Expands the glob and reads every matching shard.
    pub async fn build(config: &CorpusConfig) -> CorpusResult<Self> {
        let paths = expand_pattern(&config.pattern)?;
        info!(
            pattern = %config.pattern,
            shards = paths.len(),
            processes = config.processes,
            restricted = config.wanted_ids.is_some(),
            "Retrieving passages"
        );

        let shards: Vec<CorpusResult<ShardContents>> = stream::iter(paths)
            .map(|path| {
                let wanted = config.wanted_ids.clone();
                async move {
                    tokio::task::spawn_blocking(move || read_shard(&path, wanted.as_deref()))
                        .await
                        .map_err(|e| CorpusError::ReaderFailed {
                            reason: e.to_string(),
                        })?
                }
            })
            .buffer_unordered(config.processes.max(1))
            .collect()
            .await;

        let mut index = Self::default();
        let mut parsed = 0usize;
        let mut skipped_lines = 0usize;
        for shard in shards {
            let shard = shard?;
            parsed += shard.parsed;
            skipped_lines += shard.skipped_lines;
            debug!(
                path = %shard.path.display(),
                retained = shard.passages.len(),
                parsed = shard.parsed,
                "Shard loaded"
            );
            for passage in shard.passages {
                index.insert(passage, &shard.path)?;
            }
        }

        info!(
            passages = index.len(),
            parsed,
            skipped_lines,
            "Corpus index built"
        );

        Ok(index)
    }

    /// Builds an index from in-memory passages (duplicates are rejected).
    pub fn from_passages<I>(passages: I) -> CorpusResult<Self>
    where
        I: IntoIterator<Item = Passage>,
    {
        let mut index = Self::default();
        for passage in passages {
            index.insert(passage, &PathBuf::from("<memory>"))?;
        }
        Ok(index)
    }

    fn insert(&mut self, passage: Passage, origin: &std::path::Path) -> CorpusResult<()> {
        if self.passages.contains_key(&passage.identifier) {
            return Err(CorpusError::DuplicateIdentifier {
                identifier: passage.identifier,
                path: origin.to_path_buf(),
            });
        }
        self.passages.insert(passage.identifier, passage.text);
        Ok(())
    }

    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.passages.get(identifier).map(String::as_str)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.passages.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.passages.keys().map(String::as_str)
    }
}

/// Resolves the shard glob into a sorted, non-empty list of files.
pub fn expand_pattern(pattern: &str) -> CorpusResult<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| CorpusError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CorpusError::Io {
            path: e.path().to_path_buf(),
            source: std::io::Error::new(e.error().kind(), e.error().to_string()),
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(CorpusError::NoFilesMatched {
            pattern: pattern.to_string(),
        });
    }

    paths.sort();
    Ok(paths)
}
