//! Reading a single corpus shard.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::{CorpusError, CorpusResult};
use super::passage::{Passage, PassageParts, derive_identifier};

/// On-disk layout of a shard, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardFormat {
    /// One JSON object per line: `{"id": ..., "contents": ...}` (or `url` instead of `id`).
    JsonLines,
    /// One framed passage per line; the file stem is the identifier source.
    PlainText,
}

impl ShardFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl" | "json" | "ndjson") => ShardFormat::JsonLines,
            _ => ShardFormat::PlainText,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPassage {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    url: Option<String>,
    contents: String,
}

/// Passages retained from one shard.
#[derive(Debug)]
pub struct ShardContents {
    pub path: PathBuf,
    pub passages: Vec<Passage>,
    /// Passages parsed before the wanted-id filter was applied.
    pub parsed: usize,
    /// JSON lines that failed to decode and were skipped.
    pub skipped_lines: usize,
}

/// Tracks paragraph ordinals per `(source, title, section)` within a shard.
#[derive(Default)]
struct OrdinalCounter {
    next: HashMap<String, usize>,
}

impl OrdinalCounter {
    fn identifier_for(&mut self, source: &str, parts: &PassageParts<'_>) -> String {
        let prefix = derive_identifier(source, parts.title, parts.section(), 0);
        let slot = self.next.entry(prefix).or_insert(0);
        let ordinal = *slot;
        *slot += 1;
        derive_identifier(source, parts.title, parts.section(), ordinal)
    }
}

/// Reads and parses `path`, keeping only identifiers in `wanted` when given.
pub fn read_shard(path: &Path, wanted: Option<&HashSet<String>>) -> CorpusResult<ShardContents> {
    let io_err = |source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let len = file.metadata().map_err(io_err)?.len();
    if len == 0 {
        return Err(CorpusError::EmptyShard {
            path: path.to_path_buf(),
        });
    }

    // SAFETY: shards are read-only inputs that are not modified during a run.
    let mmap = unsafe { Mmap::map(&file) }.map_err(io_err)?;
    let data = std::str::from_utf8(&mmap).map_err(|e| CorpusError::MalformedPassage {
        path: path.to_path_buf(),
        line: 0,
        reason: format!("invalid UTF-8: {e}"),
    })?;

    let format = ShardFormat::for_path(path);
    debug!(path = %path.display(), ?format, bytes = len, "Reading corpus shard");

    let mut contents = ShardContents {
        path: path.to_path_buf(),
        passages: Vec::new(),
        parsed: 0,
        skipped_lines: 0,
    };
    let mut ordinals = OrdinalCounter::default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    for (idx, line) in data.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;

        let passage = match format {
            ShardFormat::JsonLines => {
                let raw: RawPassage = match serde_json::from_str(line) {
                    Ok(raw) => raw,
                    Err(e) => {
                        warn!(path = %path.display(), line = line_no, error = %e, "Failed parsing JSON line");
                        contents.skipped_lines += 1;
                        continue;
                    }
                };
                parse_json_passage(raw, &mut ordinals).ok_or_else(|| {
                    CorpusError::MalformedPassage {
                        path: path.to_path_buf(),
                        line: line_no,
                        reason: "passage has neither an id nor a url with « » framing".to_string(),
                    }
                })?
            }
            ShardFormat::PlainText => {
                let parts =
                    PassageParts::parse(line).ok_or_else(|| CorpusError::MalformedPassage {
                        path: path.to_path_buf(),
                        line: line_no,
                        reason: "expected '« Title » « Headings » text'".to_string(),
                    })?;
                Passage::new(ordinals.identifier_for(&stem, &parts), line)
            }
        };

        contents.parsed += 1;
        if wanted.is_none_or(|ids| ids.contains(&passage.identifier)) {
            contents.passages.push(passage);
        }
    }

    if contents.parsed == 0 {
        return Err(CorpusError::EmptyShard {
            path: path.to_path_buf(),
        });
    }

    Ok(contents)
}

fn parse_json_passage(raw: RawPassage, ordinals: &mut OrdinalCounter) -> Option<Passage> {
    if let Some(id) = raw.id.filter(|id| !id.is_empty()) {
        return Some(Passage::new(id, raw.contents));
    }

    let url = raw.url.filter(|u| !u.is_empty())?;
    let identifier = {
        let parts = PassageParts::parse(&raw.contents)?;
        ordinals.identifier_for(&url, &parts)
    };
    Some(Passage::new(identifier, raw.contents))
}
