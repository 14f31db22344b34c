use std::collections::HashSet;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use crate::text::normalize_question;

use super::error::{PredictionsError, PredictionsResult};
use super::types::{KnownKeys, LoadReport, PredictionRecord};

const HEADER: [&str; 3] = ["question", "answer", "attribution"];

/// Loaded predictions plus the counters describing what was dropped.
#[derive(Debug, Clone, Default)]
pub struct LoadedPredictions {
    pub records: Vec<PredictionRecord>,
    pub report: LoadReport,
}

/// Reads `question,answer,attribution` rows, keeping those whose normalized question is a
/// known reference question and whose attribution is a known passage. Row order is kept.
pub fn load_predictions<Q, A>(
    path: &Path,
    known_questions: &Q,
    known_attribution_ids: &A,
) -> PredictionsResult<LoadedPredictions>
where
    Q: KnownKeys + ?Sized,
    A: KnownKeys + ?Sized,
{
    info!(path = %path.display(), "Reading predictions");

    let mut loaded = LoadedPredictions::default();
    for row in read_rows(path)? {
        loaded.report.rows += 1;

        let record = match row {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Skipping malformed prediction row");
                loaded.report.malformed += 1;
                continue;
            }
        };

        if !known_questions.is_known(&normalize_question(&record.question)) {
            warn!(question = %record.question, "Skipping prediction - question not in reference set");
            loaded.report.unknown_question += 1;
            continue;
        }

        if !known_attribution_ids.is_known(&record.attribution_id) {
            warn!(
                question = %record.question,
                attribution = %record.attribution_id,
                "Skipping prediction - attribution not in corpus"
            );
            loaded.report.unknown_attribution += 1;
            continue;
        }

        loaded.records.push(record);
    }

    loaded.report.loaded = loaded.records.len();
    info!(
        rows = loaded.report.rows,
        loaded = loaded.report.loaded,
        malformed = loaded.report.malformed,
        unknown_question = loaded.report.unknown_question,
        unknown_attribution = loaded.report.unknown_attribution,
        "Predictions loaded"
    );

    Ok(loaded)
}

/// Attribution identifiers cited by well-formed rows, used to restrict the corpus read.
pub fn collect_attribution_ids(path: &Path) -> PredictionsResult<HashSet<String>> {
    let ids: HashSet<String> = read_rows(path)?
        .into_iter()
        .filter_map(Result::ok)
        .map(|record| record.attribution_id)
        .collect();
    debug!(ids = ids.len(), path = %path.display(), "Collected cited attributions");
    Ok(ids)
}

/// Parses every data row; row-level problems come back as `Err` entries.
fn read_rows(path: &Path) -> PredictionsResult<Vec<PredictionsResult<PredictionRecord>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| PredictionsError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(PredictionsError::Read {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(idx as u64 + 1);
                rows.push(Err(PredictionsError::MalformedRow {
                    line,
                    reason: e.to_string(),
                }));
                continue;
            }
        };

        if idx == 0 && is_header(&record) {
            continue;
        }

        rows.push(parse_row(&record, idx as u64 + 1));
    }

    Ok(rows)
}

fn is_header(record: &StringRecord) -> bool {
    record.len() == HEADER.len()
        && record
            .iter()
            .zip(HEADER)
            .all(|(field, name)| field.trim().eq_ignore_ascii_case(name))
}

fn parse_row(record: &StringRecord, fallback_line: u64) -> PredictionsResult<PredictionRecord> {
    let line = record
        .position()
        .map(|p| p.line())
        .unwrap_or(fallback_line);

    if record.len() != HEADER.len() {
        return Err(PredictionsError::MalformedRow {
            line,
            reason: format!("expected {} fields, found {}", HEADER.len(), record.len()),
        });
    }

    let question = &record[0];
    if question.trim().is_empty() {
        return Err(PredictionsError::MalformedRow {
            line,
            reason: "empty question".to_string(),
        });
    }

    Ok(PredictionRecord::new(question, &record[1], record[2].trim()))
}
