//! On-disk inputs for end-to-end runs.

use std::path::{Path, PathBuf};

use aqa::{ReferenceSource, RunInputs, RunPaths};
use tempfile::TempDir;

pub const HYDE_Q: &str = "who played hyde in league of extraordinary gentlemen";
pub const HYDE_ID: &str =
    "http://en.wikipedia.org/wiki/Jason_Flemyng#Jason_Flemyng#Television_and_film_work#2";
pub const HYDE_PASSAGE: &str = "« Jason Flemyng » « Jason Flemyng, Television and film work » Flemyng played Dr. Henry Jekyll and Mr. Edward Hyde in the film The League of Extraordinary Gentlemen.";

pub const EVEREST_Q: &str = "what is the highest mountain in the world";
pub const EVEREST_ID: &str = "http://en.wikipedia.org/wiki/Mount_Everest#Mount_Everest##0";
pub const EVEREST_PASSAGE: &str =
    "« Mount Everest » « Mount Everest » Mount Everest is Earth's highest mountain above sea level.";

pub const UNANSWERED_Q: &str = "when was the eiffel tower built";

/// A temp directory holding one corpus shard, a reference file and a predictions file.
pub struct EvalFixture {
    pub dir: TempDir,
    pub inputs: RunInputs,
}

impl EvalFixture {
    pub fn new(predictions_csv: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();

        let wiki = root.join("wiki");
        std::fs::create_dir(&wiki).expect("wiki dir");
        write_lines(
            &wiki.join("wiki-00.jsonl"),
            &[
                serde_json::json!({"id": HYDE_ID, "contents": HYDE_PASSAGE}).to_string(),
                serde_json::json!({"id": EVEREST_ID, "contents": EVEREST_PASSAGE}).to_string(),
            ],
        );

        let reference = root.join("validation.jsonl");
        write_lines(
            &reference,
            &[
                serde_json::json!({"question": HYDE_Q, "answer": ["Jason Flemyng"]}).to_string(),
                serde_json::json!({"question": EVEREST_Q, "answer": ["Mount Everest", "Everest"]})
                    .to_string(),
                serde_json::json!({"question": UNANSWERED_Q, "answer": ["1889"]}).to_string(),
            ],
        );

        let predictions_file = root.join("predictions.csv");
        std::fs::write(&predictions_file, predictions_csv).expect("predictions");

        let inputs = RunInputs {
            paths: RunPaths {
                predictions_file,
                wikipedia_glob: format!("{}/wiki-*.jsonl", wiki.display()),
                scores_file: root.join("scores.txt"),
                ais_output_file: root.join("ais.csv"),
            },
            reference: ReferenceSource::File(reference),
        };

        Self { dir, inputs }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn scores(&self) -> String {
        std::fs::read_to_string(&self.inputs.paths.scores_file).expect("scores file")
    }

    pub fn ais_rows(&self) -> Vec<Vec<String>> {
        let mut reader = csv::Reader::from_path(&self.inputs.paths.ais_output_file)
            .expect("ais table");
        reader
            .records()
            .map(|r| r.expect("ais row").iter().map(str::to_string).collect())
            .collect()
    }
}

pub fn prediction(question: &str, answer: &str, attribution: &str) -> String {
    format!("{question},{answer},{attribution}\n")
}

fn write_lines(path: &Path, lines: &[String]) {
    std::fs::write(path, lines.join("\n") + "\n").expect("write fixture");
}
