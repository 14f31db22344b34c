use std::collections::BTreeMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use super::error::{RatingsError, RatingsResult};
use super::types::{RatingRow, RatingsSummary, SystemSummary};

/// Name of the row aggregating every system.
pub const OVERALL: &str = "overall";

const COLUMN_COUNT: usize = 8;

/// Reads `ratings.csv` (header row required). Any malformed row fails the load.
pub fn load_ratings(path: &Path) -> RatingsResult<Vec<RatingRow>> {
    info!(path = %path.display(), "Reading ratings");

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| RatingsError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| match e.position() {
            Some(position) if !e.is_io_error() => RatingsError::MalformedRow {
                line: position.line(),
                reason: e.to_string(),
            },
            _ => RatingsError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(parse_rating(&record, line)?);
    }

    if rows.is_empty() {
        return Err(RatingsError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!(rows = rows.len(), "Ratings loaded");
    Ok(rows)
}

fn parse_rating(record: &StringRecord, line: u64) -> RatingsResult<RatingRow> {
    let malformed = |reason: String| RatingsError::MalformedRow { line, reason };

    if record.len() != COLUMN_COUNT {
        return Err(malformed(format!(
            "expected {COLUMN_COUNT} fields, found {}",
            record.len()
        )));
    }

    let field = |idx: usize| record.get(idx).unwrap_or_default();
    let system_name = field(0).trim();
    if system_name.is_empty() {
        return Err(malformed("empty system_name".to_string()));
    }

    let nli_score: f32 = field(7)
        .trim()
        .parse()
        .map_err(|e| malformed(format!("invalid nli_score '{}': {e}", field(7))))?;

    Ok(RatingRow {
        system_name: system_name.to_string(),
        question: field(1).to_string(),
        answer: field(2).to_string(),
        attribution: field(3).to_string(),
        passage: field(4).to_string(),
        human_ais: parse_label(field(5)).ok_or_else(|| {
            malformed(format!("human_rating must be Y or N, found '{}'", field(5)))
        })?,
        auto_ais: parse_label(field(6))
            .ok_or_else(|| malformed(format!("auto_ais must be Y or N, found '{}'", field(6))))?,
        nli_score,
    })
}

fn parse_label(value: &str) -> Option<bool> {
    match value.trim() {
        "Y" | "y" => Some(true),
        "N" | "n" => Some(false),
        _ => None,
    }
}

/// Groups rows by `system_name`. `rows` must be non-empty for the overall row to be meaningful.
pub fn summarize(rows: &[RatingRow]) -> RatingsSummary {
    let mut groups: BTreeMap<&str, Vec<&RatingRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.system_name.as_str()).or_default().push(row);
    }

    let systems = groups
        .into_iter()
        .map(|(name, group)| summarize_group(name, &group))
        .collect();
    let overall = summarize_group(OVERALL, &rows.iter().collect::<Vec<_>>());

    RatingsSummary { systems, overall }
}

fn summarize_group(name: &str, rows: &[&RatingRow]) -> SystemSummary {
    let count = rows.len();
    let rate = |hit: fn(&RatingRow) -> bool| -> f64 {
        if count == 0 {
            return 0.0;
        }
        rows.iter().filter(|r| hit(r)).count() as f64 / count as f64
    };
    let mean_nli_score = if count == 0 {
        0.0
    } else {
        rows.iter().map(|r| f64::from(r.nli_score)).sum::<f64>() / count as f64
    };

    SystemSummary {
        system_name: name.to_string(),
        count,
        human_ais_rate: rate(|r| r.human_ais),
        auto_ais_rate: rate(|r| r.auto_ais),
        mean_nli_score,
        agreement: rate(RatingRow::agrees),
    }
}
