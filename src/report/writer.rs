use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::corpus::ais_text;
use crate::scoring::ScoredRecord;

use super::error::{ReportError, ReportResult};
use super::summary::ScoreSummary;

/// Column layout of the AIS output table.
pub const AIS_TABLE_HEADER: [&str; 4] = ["question", "answer", "passage", "autoais"];

/// Writes `name: value` lines.
pub fn write_scores(summary: &ScoreSummary, path: &Path) -> ReportResult<()> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    for (name, value) in summary.metrics() {
        info!("{}: {}", name, value);
        writeln!(out, "{name}: {value}").map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

/// Writes the per-example table for human AIS review.
pub fn write_ais_table(records: &[ScoredRecord], path: &Path) -> ReportResult<()> {
    let csv_err = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(AIS_TABLE_HEADER).map_err(csv_err)?;
    for scored in records {
        let passage = ais_text(&scored.passage_text);
        writer
            .write_record([
                scored.record.question.as_str(),
                scored.record.answer.as_str(),
                passage.as_str(),
                scored.judgment().label(),
            ])
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes both artifacts, scores first.
pub fn write_outputs(
    summary: &ScoreSummary,
    records: &[ScoredRecord],
    scores_path: &Path,
    ais_table_path: &Path,
) -> ReportResult<()> {
    info!("Writing outputs");
    write_scores(summary, scores_path)?;
    write_ais_table(records, ais_table_path)?;
    info!(
        scores = %scores_path.display(),
        ais_table = %ais_table_path.display(),
        rows = records.len(),
        "Outputs written"
    );
    Ok(())
}
