use super::*;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{EvalConfig, RunPaths};
use crate::corpus::{CorpusIndex, Passage};
use crate::nli::{EntailmentModel, MockEntailmentModel, NliConfig, NliError};
use crate::predictions::PredictionRecord;
use crate::reference::{ReferenceExample, ReferenceSet, ReferenceSource};

const HYDE: &str = "who played hyde in league of extraordinary gentlemen";
const HYDE_ID: &str = "http://en.wikipedia.org/wiki/Jason_Flemyng#Jason_Flemyng#Television_and_film_work#2";
const HYDE_PASSAGE: &str = "« Jason Flemyng » « Jason Flemyng, Television and film work » Flemyng played Edward Hyde in The League of Extraordinary Gentlemen.";
const CAPITAL: &str = "what is the capital of france";
const CAPITAL_ID: &str = "http://en.wikipedia.org/wiki/Paris#Paris##0";
const CAPITAL_PASSAGE: &str = "« Paris » « Paris » Paris is the capital of France.";

fn lexical_config() -> EvalConfig {
    EvalConfig {
        nli: NliConfig::lexical(),
        scoring_concurrency: 2,
        ..Default::default()
    }
}

/// One model instance behind a lock, inference on the blocking pool.
struct SingleSlotModel {
    lock: Arc<parking_lot::Mutex<()>>,
    inference: Duration,
}

#[async_trait]
impl EntailmentModel for SingleSlotModel {
    async fn predict(&self, _premise: &str, _hypothesis: &str) -> Result<f32, NliError> {
        let lock = Arc::clone(&self.lock);
        let inference = self.inference;
        tokio::task::spawn_blocking(move || {
            let _guard = lock.lock();
            std::thread::sleep(inference);
            0.9
        })
        .await
        .map_err(|e| NliError::InferenceFailed {
            reason: e.to_string(),
        })
    }

    fn name(&self) -> &str {
        "single-slot"
    }

    fn max_concurrency(&self) -> Option<usize> {
        Some(1)
    }
}

fn pipeline(model: MockEntailmentModel) -> Pipeline {
    Pipeline::new(lexical_config(), Arc::new(model))
}

fn reference() -> ReferenceSet {
    ReferenceSet::from_examples([
        ReferenceExample {
            question: HYDE.to_string(),
            reference_answers: ["Jason Flemyng".to_string()].into_iter().collect(),
        },
        ReferenceExample {
            question: CAPITAL.to_string(),
            reference_answers: ["Paris".to_string()].into_iter().collect(),
        },
    ])
}

fn corpus() -> CorpusIndex {
    CorpusIndex::from_passages([
        Passage::new(HYDE_ID, HYDE_PASSAGE),
        Passage::new(CAPITAL_ID, CAPITAL_PASSAGE),
    ])
    .unwrap()
}

struct Fixture {
    _dir: tempfile::TempDir,
    inputs: RunInputs,
}

fn write_fixture(predictions: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let wiki = root.join("wiki");
    std::fs::create_dir(&wiki).unwrap();
    std::fs::write(
        wiki.join("shard-00.jsonl"),
        format!(
            "{}\n{}\n",
            serde_json::json!({"id": HYDE_ID, "contents": HYDE_PASSAGE}),
            serde_json::json!({"id": CAPITAL_ID, "contents": CAPITAL_PASSAGE}),
        ),
    )
    .unwrap();

    let reference = root.join("validation.jsonl");
    std::fs::write(
        &reference,
        format!(
            "{}\n{}\n",
            serde_json::json!({"question": HYDE, "answer": ["Jason Flemyng"]}),
            serde_json::json!({"question": CAPITAL, "answer": ["Paris"]}),
        ),
    )
    .unwrap();

    let predictions_file = root.join("predictions.csv");
    std::fs::write(&predictions_file, predictions).unwrap();

    Fixture {
        inputs: RunInputs {
            paths: RunPaths {
                predictions_file,
                wikipedia_glob: format!("{}/*.jsonl", wiki.display()),
                scores_file: root.join("scores.txt"),
                ais_output_file: root.join("ais.csv"),
            },
            reference: ReferenceSource::File(reference),
        },
        _dir: dir,
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

fn path_of(fixture: &Fixture, name: &str) -> PathBuf {
    fixture.inputs.paths.predictions_file.with_file_name(name)
}

#[test]
fn test_error_kinds() {
    let err = PipelineError::from(crate::corpus::CorpusError::NoFilesMatched {
        pattern: "*.jsonl".to_string(),
    });
    assert_eq!(err.kind(), "CorpusLoadError");

    let err = PipelineError::from(crate::reference::ReferenceError::Empty {
        origin: "x".to_string(),
    });
    assert_eq!(err.kind(), "ReferenceLoadError");

    let err = PipelineError::from(crate::nli::NliError::InvalidConfig {
        reason: "x".to_string(),
    });
    assert_eq!(err.kind(), "ScoringUnavailableError");
}

#[test]
fn test_from_config_rejects_invalid() {
    let config = EvalConfig {
        scoring_concurrency: 0,
        ..lexical_config()
    };
    let err = Pipeline::from_config(config).err().unwrap();
    assert_eq!(err.kind(), "ConfigError");
}

#[test]
fn test_from_config_lexical() {
    let pipeline = Pipeline::from_config(lexical_config()).unwrap();
    assert_eq!(pipeline.config().scoring_concurrency, 2);
}

#[tokio::test]
async fn test_score_records_preserves_order() {
    let model = MockEntailmentModel::fixed(0.9)
        .with_score_for("Jason", 0.2)
        .with_delay(std::time::Duration::from_millis(5));
    let pipeline = pipeline(model);
    let records = vec![
        PredictionRecord::new(HYDE, "Jason Flemyng", HYDE_ID),
        PredictionRecord::new(CAPITAL, "Paris", CAPITAL_ID),
        PredictionRecord::new(HYDE, "Peter Stormare", HYDE_ID),
    ];

    let outcome = pipeline
        .score_records(&records, &corpus(), &reference())
        .await
        .unwrap();

    assert_eq!(outcome.unavailable, 0);
    let answers: Vec<&str> = outcome
        .scored
        .iter()
        .map(|s| s.record.answer.as_str())
        .collect();
    assert_eq!(answers, vec!["Jason Flemyng", "Paris", "Peter Stormare"]);
    assert!(!outcome.scored[0].auto_ais);
    assert!(outcome.scored[1].auto_ais);
    assert_eq!(outcome.scored[2].em_score, 0.0);
}

#[tokio::test]
async fn test_score_records_counts_unavailable() {
    let model = MockEntailmentModel::fixed(0.9).failing_on("Paris");
    let pipeline = pipeline(model);
    let records = vec![
        PredictionRecord::new(HYDE, "Jason Flemyng", HYDE_ID),
        PredictionRecord::new(CAPITAL, "Paris", CAPITAL_ID),
    ];

    let outcome = pipeline
        .score_records(&records, &corpus(), &reference())
        .await
        .unwrap();

    assert_eq!(outcome.scored.len(), 1);
    assert_eq!(outcome.unavailable, 1);
    assert_eq!(outcome.skip_fraction(), 0.5);
}

#[tokio::test]
async fn test_score_records_missing_lookup_is_internal_error() {
    let pipeline = pipeline(MockEntailmentModel::fixed(0.9));
    let records = vec![PredictionRecord::new(HYDE, "Jason Flemyng", "nowhere#0")];

    let err = pipeline
        .score_records(&records, &corpus(), &reference())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "InternalError");
}

#[test]
fn test_missing_predictions() {
    let records = vec![PredictionRecord::new(
        "Who played  HYDE in League of Extraordinary Gentlemen",
        "Jason Flemyng",
        HYDE_ID,
    )];
    assert_eq!(missing_predictions(&reference(), &records), 1);
    assert_eq!(missing_predictions(&reference(), &[]), 2);
}

#[test]
fn test_skip_fraction_empty() {
    assert_eq!(ScoringOutcome::default().skip_fraction(), 0.0);
}

#[tokio::test]
async fn test_run_end_to_end() {
    let fixture = write_fixture(&format!(
        "question,answer,attribution\n\
         {HYDE},Jason Flemyng,{HYDE_ID}\n\
         {CAPITAL},Lyon,{CAPITAL_ID}\n\
         {CAPITAL},Paris,http://en.wikipedia.org/wiki/Nowhere#Nowhere##0\n\
         an unknown question,x,{CAPITAL_ID}\n\
         only two,fields\n"
    ));
    let pipeline = pipeline(MockEntailmentModel::fixed(0.9).with_score_for("Lyon", 0.1));

    let evaluation = pipeline.run(&fixture.inputs).await.unwrap();

    let summary = &evaluation.summary;
    assert_eq!(summary.count, 2);
    assert_eq!(summary.mean_em, Some(0.5));
    assert_eq!(summary.mean_auto_ais, Some(0.5));
    assert_eq!(summary.counts.malformed_rows, 1);
    assert_eq!(summary.counts.unknown_question, 1);
    assert_eq!(summary.counts.unknown_attribution, 1);
    assert_eq!(summary.counts.missing_predictions, 0);
    assert_eq!(evaluation.records[0].passage_text, HYDE_PASSAGE);

    let scores = read(&fixture.inputs.paths.scores_file);
    assert!(scores.starts_with("AutoAIS: 0.5\nSQuAD (em): 0.5\n"));
    assert!(scores.contains("skipped (unknown attribution): 1"));

    let table = read(&fixture.inputs.paths.ais_output_file);
    let mut lines = table.lines();
    assert_eq!(lines.next(), Some("question,answer,passage,autoais"));
    assert_eq!(table.matches(",Y\n").count() + table.matches(",N\n").count(), 2);
}

#[tokio::test]
async fn test_run_empty_predictions() {
    let fixture = write_fixture("");
    let pipeline = pipeline(MockEntailmentModel::fixed(0.9));

    let evaluation = pipeline.evaluate(&fixture.inputs).await.unwrap();

    assert_eq!(evaluation.summary.count, 0);
    assert_eq!(evaluation.summary.mean_em, None);
    assert_eq!(evaluation.summary.mean_auto_ais, None);
    assert_eq!(evaluation.summary.counts.missing_predictions, 2);
}

#[tokio::test]
async fn test_run_corpus_failure_aborts_before_scoring() {
    let mut fixture = write_fixture(&format!("{HYDE},Jason Flemyng,{HYDE_ID}\n"));
    fixture.inputs.paths.wikipedia_glob = path_of(&fixture, "nothing-*.jsonl").display().to_string();
    let model = Arc::new(MockEntailmentModel::fixed(0.9));
    let pipeline = Pipeline::new(lexical_config(), model.clone());

    let err = pipeline.run(&fixture.inputs).await.unwrap_err();

    assert_eq!(err.kind(), "CorpusLoadError");
    assert_eq!(model.calls(), 0);
    assert!(!fixture.inputs.paths.scores_file.exists());
}

#[tokio::test]
async fn test_run_unrestricted_corpus() {
    let fixture = write_fixture(&format!("{CAPITAL},Paris,{CAPITAL_ID}\n"));
    let config = EvalConfig {
        restrict_corpus: false,
        ..lexical_config()
    };
    let pipeline = Pipeline::new(config, Arc::new(MockEntailmentModel::fixed(0.9)));

    let evaluation = pipeline.evaluate(&fixture.inputs).await.unwrap();

    assert_eq!(evaluation.summary.count, 1);
    assert_eq!(evaluation.summary.mean_em, Some(1.0));
    assert_eq!(evaluation.summary.counts.missing_predictions, 1);
}

#[tokio::test]
async fn test_minimal_passage_identifier() {
    let corpus = CorpusIndex::from_passages([Passage::new("http://x#Y#Z#0", "Jason Flemyng played Hyde.")])
        .unwrap();
    let reference = ReferenceSet::from_examples([ReferenceExample {
        question: "who played hyde...".to_string(),
        reference_answers: ["Jason Flemyng".to_string()].into_iter().collect(),
    }]);
    let records = vec![PredictionRecord::new(
        "who played hyde...",
        "Jason Flemyng",
        "http://x#Y#Z#0",
    )];

    let outcome = pipeline(MockEntailmentModel::fixed(0.7))
        .score_records(&records, &corpus, &reference)
        .await
        .unwrap();

    assert_eq!(outcome.scored.len(), 1);
    assert_eq!(outcome.scored[0].em_score, 1.0);
    assert_eq!(outcome.scored[0].passage_text, "Jason Flemyng played Hyde.");
}

#[tokio::test]
async fn test_queueing_for_single_slot_model_does_not_count_against_timeout() {
    let config = EvalConfig {
        nli: NliConfig::lexical().with_timeout(Duration::from_millis(150)),
        scoring_concurrency: 4,
        ..Default::default()
    };
    let model = SingleSlotModel {
        lock: Arc::new(parking_lot::Mutex::new(())),
        inference: Duration::from_millis(60),
    };
    let pipeline = Pipeline::new(config, Arc::new(model));
    let records = vec![PredictionRecord::new(HYDE, "Jason Flemyng", HYDE_ID); 4];

    let outcome = pipeline
        .score_records(&records, &corpus(), &reference())
        .await
        .unwrap();

    assert_eq!(outcome.unavailable, 0);
    assert_eq!(outcome.scored.len(), 4);
}
