use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use futures_util::{StreamExt, stream};
use tracing::{debug, info, warn};

use crate::config::EvalConfig;
use crate::corpus::{CorpusConfig, CorpusIndex};
use crate::nli::{EntailmentModel, load_model};
use crate::predictions::{self, LoadedPredictions, PredictionRecord};
use crate::reference::{ReferenceSet, ReferenceSource};
use crate::report::{RunCounts, aggregate, write_outputs};
use crate::scoring::{AttributionScorer, RecordScorer, ScoringError};
use crate::text::normalize_question;

use super::error::{PipelineError, PipelineResult};
use super::types::{Evaluation, RunInputs, ScoringOutcome};

/// Drives one evaluation: load lookups, filter predictions, score, aggregate, report.
///
/// Lookups are built once and only read afterwards; scoring runs up to
/// `scoring_concurrency` records at a time while keeping input order.
pub struct Pipeline {
    config: EvalConfig,
    scorer: RecordScorer,
}

impl Pipeline {
    /// Builds a pipeline around an explicit entailment model.
    pub fn new(config: EvalConfig, model: Arc<dyn EntailmentModel>) -> Self {
        let scorer = RecordScorer::new(AttributionScorer::new(model, &config.nli));
        Self { config, scorer }
    }

    /// Validates `config` and loads the configured entailment backend.
    pub fn from_config(config: EvalConfig) -> PipelineResult<Self> {
        config.validate()?;
        let model = load_model(&config.nli)?;
        info!(backend = %config.nli.backend, model = model.name(), "Entailment model ready");
        Ok(Self::new(config, model))
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Builds the corpus index, optionally restricted to `wanted` identifiers.
    pub async fn load_corpus(
        &self,
        pattern: &str,
        wanted: Option<HashSet<String>>,
    ) -> PipelineResult<CorpusIndex> {
        let mut corpus_config = CorpusConfig::new(pattern).with_processes(self.config.processes);
        if let Some(ids) = wanted {
            corpus_config = corpus_config.with_wanted_ids(ids);
        }
        Ok(CorpusIndex::build(&corpus_config).await?)
    }

    pub async fn load_reference(&self, source: &ReferenceSource) -> PipelineResult<ReferenceSet> {
        Ok(ReferenceSet::load(source).await?)
    }

    pub fn load_predictions(
        &self,
        path: &Path,
        reference: &ReferenceSet,
        corpus: &CorpusIndex,
    ) -> PipelineResult<LoadedPredictions> {
        Ok(predictions::load_predictions(path, reference, corpus)?)
    }

    /// Scores `records` concurrently; results keep the input order.
    ///
    /// Backend failures drop the record and bump `unavailable`. A record missing from
    /// the lookups is an error since loading already filtered against them.
    pub async fn score_records(
        &self,
        records: &[PredictionRecord],
        corpus: &CorpusIndex,
        reference: &ReferenceSet,
    ) -> PipelineResult<ScoringOutcome> {
        info!(
            records = records.len(),
            concurrency = self.config.scoring_concurrency,
            model = self.scorer.attribution().model_name(),
            "Scoring predictions"
        );

        let results: Vec<Result<_, ScoringError>> = stream::iter(records)
            .map(|record| self.scorer.score(record, corpus, reference))
            .buffered(self.config.scoring_concurrency.max(1))
            .collect()
            .await;

        let mut outcome = ScoringOutcome::default();
        for (record, result) in records.iter().zip(results) {
            match result {
                Ok(scored) => outcome.scored.push(scored),
                Err(ScoringError::MissingLookup { what, key }) => {
                    return Err(PipelineError::Inconsistent { what, key });
                }
                Err(e) => {
                    warn!(
                        question = %record.question,
                        attribution = %record.attribution_id,
                        error = %e,
                        "Skipping record - scoring unavailable"
                    );
                    outcome.unavailable += 1;
                }
            }
        }

        let skip_fraction = outcome.skip_fraction();
        if skip_fraction > self.config.max_skip_fraction {
            warn!(
                unavailable = outcome.unavailable,
                skip_fraction,
                max_skip_fraction = self.config.max_skip_fraction,
                "Scoring skipped more records than expected; metrics cover a reduced set"
            );
        }

        info!(
            scored = outcome.scored.len(),
            unavailable = outcome.unavailable,
            "Scoring finished"
        );
        Ok(outcome)
    }

    /// Runs every stage except writing the output files.
    pub async fn evaluate(&self, inputs: &RunInputs) -> PipelineResult<Evaluation> {
        let paths = &inputs.paths;

        let wanted = if self.config.restrict_corpus {
            Some(predictions::collect_attribution_ids(&paths.predictions_file)?)
        } else {
            None
        };
        let corpus = self.load_corpus(&paths.wikipedia_glob, wanted).await?;
        let reference = self.load_reference(&inputs.reference).await?;
        let loaded = self.load_predictions(&paths.predictions_file, &reference, &corpus)?;

        let outcome = self
            .score_records(&loaded.records, &corpus, &reference)
            .await?;

        let counts = RunCounts {
            malformed_rows: loaded.report.malformed,
            unknown_question: loaded.report.unknown_question,
            unknown_attribution: loaded.report.unknown_attribution,
            scoring_unavailable: outcome.unavailable,
            missing_predictions: missing_predictions(&reference, &loaded.records),
        };
        let summary = aggregate(&outcome.scored).with_counts(counts);
        debug!(?summary, "Aggregated");

        Ok(Evaluation {
            summary,
            records: outcome.scored,
        })
    }

    /// Full run: [`evaluate`](Self::evaluate) then write the scores file and AIS table.
    pub async fn run(&self, inputs: &RunInputs) -> PipelineResult<Evaluation> {
        let evaluation = self.evaluate(inputs).await?;
        write_outputs(
            &evaluation.summary,
            &evaluation.records,
            &inputs.paths.scores_file,
            &inputs.paths.ais_output_file,
        )?;
        info!(summary = %evaluation.summary, "Evaluation complete");
        Ok(evaluation)
    }
}

/// Reference questions that no loaded prediction answers.
pub fn missing_predictions(reference: &ReferenceSet, records: &[PredictionRecord]) -> usize {
    let answered: HashSet<String> = records
        .iter()
        .map(|record| normalize_question(&record.question))
        .collect();
    reference
        .questions()
        .filter(|question| !answered.contains(*question))
        .count()
}
