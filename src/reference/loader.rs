use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use tracing::{debug, info};

use crate::constants::{NQ_OPEN, NQ_SPLIT};
use crate::text::normalize_question;

use super::error::{ReferenceError, ReferenceResult};

/// `<name>:<version>` dataset identifier, e.g. `natural_questions_open:1.0.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetVersion {
    pub name: String,
    pub version: String,
}

impl Default for DatasetVersion {
    fn default() -> Self {
        // NQ_OPEN is a well-formed constant.
        let (name, version) = NQ_OPEN.split_once(':').unwrap_or((NQ_OPEN, ""));
        Self {
            name: name.to_string(),
            version: version.to_string(),
        }
    }
}

impl FromStr for DatasetVersion {
    type Err = ReferenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().split_once(':') {
            Some((name, version)) if !name.is_empty() && !version.is_empty() => Ok(Self {
                name: name.to_string(),
                version: version.to_string(),
            }),
            _ => Err(ReferenceError::InvalidVersion {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for DatasetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.version)
    }
}

impl DatasetVersion {
    /// Local layout: `<data_dir>/<name>/<version>/<split>.jsonl`.
    pub fn resolve(&self, data_dir: &Path, split: &str) -> PathBuf {
        data_dir
            .join(&self.name)
            .join(&self.version)
            .join(format!("{split}.jsonl"))
    }

    pub fn resolve_default_split(&self, data_dir: &Path) -> PathBuf {
        self.resolve(data_dir, NQ_SPLIT)
    }
}

/// Where the reference JSONL comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSource {
    File(PathBuf),
    Url(String),
}

impl ReferenceSource {
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            ReferenceSource::Url(value.to_string())
        } else {
            ReferenceSource::File(PathBuf::from(value))
        }
    }

    fn origin(&self) -> String {
        match self {
            ReferenceSource::File(path) => path.display().to_string(),
            ReferenceSource::Url(url) => url.clone(),
        }
    }

    async fn read(&self) -> ReferenceResult<String> {
        let fetch_failed = |reason: String| ReferenceError::FetchFailed {
            origin: self.origin(),
            reason,
        };

        match self {
            ReferenceSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| fetch_failed(e.to_string())),
            ReferenceSource::Url(url) => {
                let response = reqwest::get(url)
                    .await
                    .map_err(|e| fetch_failed(e.to_string()))?;
                if !response.status().is_success() {
                    return Err(fetch_failed(format!("HTTP {}", response.status())));
                }
                response.text().await.map_err(|e| fetch_failed(e.to_string()))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAnswers {
    Many(Vec<String>),
    One(String),
}

#[derive(Debug, Deserialize)]
struct RawExample {
    question: String,
    answer: RawAnswers,
}

/// A gold question with its acceptable short answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceExample {
    pub question: String,
    pub reference_answers: BTreeSet<String>,
}

/// Read-only `normalized question -> reference answers` lookup.
#[derive(Debug, Default, Clone)]
pub struct ReferenceSet {
    answers: HashMap<String, BTreeSet<String>>,
}

impl ReferenceSet {
    /// Fetches and parses the reference JSONL.
    pub async fn load(source: &ReferenceSource) -> ReferenceResult<Self> {
        let origin = source.origin();
        info!(origin = %origin, "Loading reference answers");
        let content = source.read().await?;
        let set = Self::parse_jsonl(&content, &origin)?;
        info!(questions = set.len(), origin = %origin, "Loaded reference answers");
        Ok(set)
    }

    /// Parses `{"question": ..., "answer": [...]}` lines.
    pub fn parse_jsonl(content: &str, origin: &str) -> ReferenceResult<Self> {
        let mut examples = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let malformed = |reason: String| ReferenceError::MalformedExample {
                origin: origin.to_string(),
                line: idx + 1,
                reason,
            };

            let raw: RawExample =
                serde_json::from_str(line).map_err(|e| malformed(e.to_string()))?;
            let reference_answers: BTreeSet<String> = match raw.answer {
                RawAnswers::Many(answers) => answers.into_iter().collect(),
                RawAnswers::One(answer) => BTreeSet::from([answer]),
            };
            if raw.question.trim().is_empty() {
                return Err(malformed("empty question".to_string()));
            }
            if reference_answers.is_empty() {
                return Err(malformed("no reference answers".to_string()));
            }

            examples.push(ReferenceExample {
                question: raw.question,
                reference_answers,
            });
        }

        if examples.is_empty() {
            return Err(ReferenceError::Empty {
                origin: origin.to_string(),
            });
        }

        Ok(Self::from_examples(examples))
    }

    /// Builds the lookup; examples sharing a normalized question merge their answers.
    pub fn from_examples<I>(examples: I) -> Self
    where
        I: IntoIterator<Item = ReferenceExample>,
    {
        let mut answers: HashMap<String, BTreeSet<String>> = HashMap::new();
        for example in examples {
            let key = normalize_question(&example.question);
            let entry = answers.entry(key).or_default();
            if !entry.is_empty() {
                debug!(question = %example.question, "Merging duplicate reference question");
            }
            entry.extend(example.reference_answers);
        }
        Self { answers }
    }

    /// Looks up answers by raw (un-normalized) question text.
    pub fn answers_for(&self, question: &str) -> Option<&BTreeSet<String>> {
        self.answers.get(&normalize_question(question))
    }

    pub fn contains_normalized(&self, normalized_question: &str) -> bool {
        self.answers.contains_key(normalized_question)
    }

    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.answers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}
