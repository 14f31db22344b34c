//! Passage text framing and identifier derivation.
//!
//! Corpus passages are stored as `« Title » « Title, Section » paragraph`. The headings
//! group repeats the title, followed by `, ` and the section path when there is one.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::ID_SEPARATOR;

// The body capture stops at the first newline; later lines are not part of the passage.
static PASSAGE_FORMAT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^« ([^»]*) » « ([^»]*) » (.*)").ok());

/// A single paragraph-level unit of the attribution corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    pub identifier: String,
    pub text: String,
}

impl Passage {
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: text.into(),
        }
    }
}

/// The `« Title » « Headings » body` structure of a passage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageParts<'a> {
    pub title: &'a str,
    pub headings: &'a str,
    pub body: &'a str,
}

impl<'a> PassageParts<'a> {
    /// Splits `text` into its framing, or `None` for unstructured text.
    pub fn parse(text: &'a str) -> Option<Self> {
        let captures = PASSAGE_FORMAT.as_ref()?.captures(text)?;
        Some(Self {
            title: captures.get(1)?.as_str(),
            headings: captures.get(2)?.as_str(),
            body: captures.get(3)?.as_str(),
        })
    }

    /// Section path with the leading title removed.
    ///
    /// Headings that do not start with the title are returned whole. `None` when the
    /// passage belongs to the lead section.
    pub fn section(&self) -> Option<&'a str> {
        match self.headings.strip_prefix(self.title) {
            Some("") => None,
            Some(rest) => Some(rest.strip_prefix(", ").unwrap_or(rest)),
            None => Some(self.headings),
        }
    }
}

/// Premise text handed to the entailment model: `"{headings}. {body}"`.
pub fn premise_text(passage: &str) -> String {
    match PassageParts::parse(passage) {
        Some(parts) => format!("{}. {}", parts.headings, parts.body),
        None => passage.to_string(),
    }
}

/// Human-rater framing used in the AIS output table.
///
/// ```text
/// Title: Luke Cage (season 2)
/// Section: Release
///
/// The second season of Luke Cage was released on June 22, 2018, ...
/// ```
pub fn ais_text(passage: &str) -> String {
    let Some(parts) = PassageParts::parse(passage) else {
        return passage.to_string();
    };

    let mut lines = vec![format!("Title: {}", parts.title)];
    if let Some(section) = parts.section() {
        lines.push(format!("Section: {section}"));
    }
    lines.push(String::new());
    lines.push(parts.body.to_string());
    lines.join("\n")
}

/// Builds `<source>#<title>#<section>#<ordinal>` with spaces replaced by underscores.
pub fn derive_identifier(source: &str, title: &str, section: Option<&str>, ordinal: usize) -> String {
    format!(
        "{source}{sep}{}{sep}{}{sep}{ordinal}",
        id_component(title),
        id_component(section.unwrap_or_default()),
        sep = ID_SEPARATOR,
    )
}

fn id_component(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(ID_SEPARATOR, "%23")
}
