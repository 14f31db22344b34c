//! `aqa-eval`: scores a predictions file for answer accuracy and AutoAIS attribution.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mimalloc::MiMalloc;

use aqa::constants::NQ_OPEN;
use aqa::{
    DatasetVersion, EvalConfig, Evaluation, Pipeline, PipelineError, ReferenceSource, RunInputs,
    RunPaths,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Evaluate attributed QA predictions (SQuAD EM/F1 and AutoAIS).
///
/// Entailment backend and tuning are read from `AQA_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "aqa-eval", version)]
struct Args {
    /// CSV of `question,answer,attribution` rows.
    #[arg(long = "predictions_file")]
    predictions_file: PathBuf,

    /// Glob matching the Wikipedia passage shards.
    #[arg(long = "wikipedia_glob")]
    wikipedia_glob: String,

    /// Where to write the `name: value` metrics.
    #[arg(long = "scores_file")]
    scores_file: PathBuf,

    /// Where to write the per-example AIS table.
    #[arg(long = "ais_output_file")]
    ais_output_file: PathBuf,

    /// Reference dataset as `name:version`, resolved under `AQA_DATA_DIR`.
    #[arg(long = "dataset_version", default_value = NQ_OPEN)]
    dataset_version: String,

    /// Reference JSONL path or http(s) URL; overrides `--dataset_version`.
    #[arg(long = "reference_file")]
    reference_file: Option<String>,

    /// Concurrent shard readers (default: `AQA_PROCESSES` or 16).
    #[arg(long)]
    processes: Option<usize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(evaluation) => {
            print!("{}", evaluation.summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "Evaluation failed");
            eprintln!("{}: {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<Evaluation, PipelineError> {
    let mut config = EvalConfig::from_env()?;
    if let Some(processes) = args.processes {
        config.processes = processes;
    }

    let reference = match &args.reference_file {
        Some(value) => ReferenceSource::parse(value),
        None => {
            let version: DatasetVersion = args.dataset_version.parse()?;
            ReferenceSource::File(version.resolve_default_split(&config.data_dir))
        }
    };

    let paths = RunPaths {
        predictions_file: args.predictions_file,
        wikipedia_glob: args.wikipedia_glob,
        scores_file: args.scores_file,
        ais_output_file: args.ais_output_file,
    };
    paths.validate()?;

    tracing::info!(
        predictions = %paths.predictions_file.display(),
        wikipedia_glob = %paths.wikipedia_glob,
        reference = ?reference,
        backend = %config.nli.backend,
        "aqa-eval starting"
    );

    let pipeline = Pipeline::from_config(config)?;
    pipeline.run(&RunInputs { paths, reference }).await
}
