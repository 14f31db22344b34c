//! `aqa-ratings`: per-system summary of the distributed human and automatic ratings.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use aqa::ratings::{load_ratings, summarize};

/// Summarize `ratings.csv` by system: human AIS, AutoAIS, mean NLI score, agreement.
#[derive(Parser, Debug)]
#[command(name = "aqa-ratings", version)]
struct Args {
    /// Path to `ratings.csv`.
    #[arg(long = "ratings_file", default_value = "ratings.csv")]
    ratings_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let rows = load_ratings(&args.ratings_file)
        .with_context(|| format!("RatingsError: {}", args.ratings_file.display()))?;
    let summary = summarize(&rows);

    tracing::info!(
        systems = summary.systems.len(),
        rows = summary.overall.count,
        "Ratings summarized"
    );
    print!("{summary}");
    Ok(())
}
