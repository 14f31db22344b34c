use super::*;
use crate::predictions::PredictionRecord;
use crate::scoring::ScoredRecord;

const PASSAGE: &str = "« Jason Flemyng » « Jason Flemyng, Television and film work » \
Flemyng played Edward Hyde.";

fn scored(em: f64, auto_ais: bool) -> ScoredRecord {
    ScoredRecord {
        record: PredictionRecord::new("who played hyde", "Jason Flemyng", "http://x#Y#Z#0"),
        passage_text: PASSAGE.to_string(),
        em_score: em,
        f1_score: em,
        nli_score: if auto_ais { 0.9 } else { 0.1 },
        auto_ais,
    }
}

#[test]
fn test_aggregate_means() {
    let summary = aggregate(&[scored(1.0, true), scored(0.0, false), scored(1.0, true)]);

    assert_eq!(summary.count, 3);
    assert!((summary.mean_em.unwrap() - 0.6667).abs() < 1e-4);
    assert!((summary.mean_auto_ais.unwrap() - 0.6667).abs() < 1e-4);
}

#[test]
fn test_aggregate_empty_is_undefined() {
    let summary = aggregate(&[]);

    assert_eq!(summary.count, 0);
    assert_eq!(summary.mean_em, None);
    assert_eq!(summary.mean_f1, None);
    assert_eq!(summary.mean_auto_ais, None);
}

#[test]
fn test_metric_value_display() {
    assert_eq!(MetricValue::Mean(Some(0.5)).to_string(), "0.5");
    assert_eq!(MetricValue::Mean(Some(1.0)).to_string(), "1.0");
    assert_eq!(MetricValue::Mean(Some(0.0)).to_string(), "0.0");
    assert_eq!(MetricValue::Mean(None).to_string(), "undefined");
    assert_eq!(MetricValue::Count(7).to_string(), "7");
}

#[test]
fn test_summary_display_lists_skip_counts() {
    let summary = aggregate(&[scored(1.0, true)]).with_counts(RunCounts {
        unknown_question: 2,
        scoring_unavailable: 1,
        ..Default::default()
    });

    let text = summary.to_string();
    assert!(text.starts_with("AutoAIS: 1.0\nSQuAD (em): 1.0\n"));
    assert!(text.contains("skipped (unknown question): 2\n"));
    assert!(text.contains("skipped (scoring unavailable): 1\n"));
    assert_eq!(summary.counts.skipped(), 3);
}

#[test]
fn test_write_scores_undefined() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.txt");

    write_scores(&aggregate(&[]), &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("AutoAIS: undefined\n"));
    assert!(text.contains("SQuAD (em): undefined\n"));
    assert!(text.contains("count: 0\n"));
}

#[test]
fn test_write_ais_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ais.csv");

    write_ais_table(&[scored(1.0, true), scored(0.0, false)], &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), AIS_TABLE_HEADER.to_vec());

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "who played hyde");
    assert_eq!(
        &rows[0][2],
        "Title: Jason Flemyng\nSection: Television and film work\n\nFlemyng played Edward Hyde."
    );
    assert_eq!(&rows[0][3], "Y");
    assert_eq!(&rows[1][3], "N");
}

#[test]
fn test_write_outputs_to_missing_dir_fails() {
    let result = write_outputs(
        &aggregate(&[]),
        &[],
        std::path::Path::new("/nonexistent/dir/scores.txt"),
        std::path::Path::new("/nonexistent/dir/ais.csv"),
    );
    assert!(matches!(result, Err(ReportError::Io { .. })));
}
