//! Runs the `aqa-eval` binary with the lexical backend.

mod common;

use std::process::Command;

use common::fixtures::{EvalFixture, HYDE_ID, HYDE_Q, prediction};

fn aqa_eval(fixture: &EvalFixture) -> Command {
    let paths = &fixture.inputs.paths;
    let reference = match &fixture.inputs.reference {
        aqa::ReferenceSource::File(path) => path.display().to_string(),
        aqa::ReferenceSource::Url(url) => url.clone(),
    };

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_aqa-eval"));
    cmd.arg("--predictions_file")
        .arg(&paths.predictions_file)
        .arg("--wikipedia_glob")
        .arg(&paths.wikipedia_glob)
        .arg("--scores_file")
        .arg(&paths.scores_file)
        .arg("--ais_output_file")
        .arg(&paths.ais_output_file)
        .arg("--reference_file")
        .arg(reference)
        .env("AQA_NLI_BACKEND", "lexical")
        .env_remove("AQA_NLI_MODEL_PATH")
        .env_remove("AQA_NLI_URL")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_cli_writes_outputs_and_prints_summary() {
    let fixture = EvalFixture::new(&prediction(HYDE_Q, "Jason Flemyng", HYDE_ID));

    let output = aqa_eval(&fixture).output().expect("binary should run");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("SQuAD (em): 1.0\n"));
    assert!(stdout.contains("count: 1"));
    assert!(fixture.inputs.paths.scores_file.exists());
    assert_eq!(fixture.ais_rows().len(), 1);
}

#[test]
fn test_cli_reports_error_kind() {
    let mut fixture = EvalFixture::new(&prediction(HYDE_Q, "Jason Flemyng", HYDE_ID));
    fixture.inputs.paths.wikipedia_glob = fixture.path("nothing-*.jsonl").display().to_string();

    let output = aqa_eval(&fixture).output().expect("binary should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("CorpusLoadError: "), "stderr: {stderr}");
}

#[test]
fn test_cli_requires_model_path_for_t5() {
    let fixture = EvalFixture::new(&prediction(HYDE_Q, "Jason Flemyng", HYDE_ID));

    let output = aqa_eval(&fixture)
        .env("AQA_NLI_BACKEND", "t5")
        .output()
        .expect("binary should run");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("ConfigError: "));
}
