use std::collections::HashSet;
use std::sync::Arc;

use crate::constants::DEFAULT_PROCESSES;

/// How the corpus index is assembled.
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// Glob matching the shard files.
    pub pattern: String,

    /// Maximum number of shards read concurrently.
    pub processes: usize,

    /// When set, only passages with these identifiers are retained.
    pub wanted_ids: Option<Arc<HashSet<String>>>,
}

impl CorpusConfig {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            processes: DEFAULT_PROCESSES,
            wanted_ids: None,
        }
    }

    pub fn with_processes(mut self, processes: usize) -> Self {
        self.processes = processes.max(1);
        self
    }

    pub fn with_wanted_ids(mut self, ids: HashSet<String>) -> Self {
        self.wanted_ids = Some(Arc::new(ids));
        self
    }
}
