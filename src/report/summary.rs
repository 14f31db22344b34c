use std::fmt;

use crate::constants::{METRIC_AUTOAIS, METRIC_SQUAD_EM, METRIC_SQUAD_F1};
use crate::scoring::ScoredRecord;

/// Everything that did not make it into the means, surfaced next to them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounts {
    pub malformed_rows: usize,
    pub unknown_question: usize,
    pub unknown_attribution: usize,
    pub scoring_unavailable: usize,
    /// Reference questions without any surviving prediction.
    pub missing_predictions: usize,
}

impl RunCounts {
    pub fn skipped(&self) -> usize {
        self.malformed_rows + self.unknown_question + self.unknown_attribution + self.scoring_unavailable
    }
}

/// A metric value; `None` means undefined (no records), never zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Mean(Option<f64>),
    Count(usize),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Mean(Some(value)) => write!(f, "{value:?}"),
            MetricValue::Mean(None) => f.write_str("undefined"),
            MetricValue::Count(count) => write!(f, "{count}"),
        }
    }
}

/// Corpus-level metrics over the scored records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreSummary {
    pub count: usize,
    pub mean_em: Option<f64>,
    pub mean_f1: Option<f64>,
    pub mean_auto_ais: Option<f64>,
    pub counts: RunCounts,
}

/// Arithmetic means over `records`; an empty input leaves every mean undefined.
pub fn aggregate(records: &[ScoredRecord]) -> ScoreSummary {
    let mean = |value: fn(&ScoredRecord) -> f64| -> Option<f64> {
        if records.is_empty() {
            return None;
        }
        Some(records.iter().map(value).sum::<f64>() / records.len() as f64)
    };

    ScoreSummary {
        count: records.len(),
        mean_em: mean(|r| r.em_score),
        mean_f1: mean(|r| r.f1_score),
        mean_auto_ais: mean(|r| if r.auto_ais { 1.0 } else { 0.0 }),
        counts: RunCounts::default(),
    }
}

impl ScoreSummary {
    pub fn with_counts(mut self, counts: RunCounts) -> Self {
        self.counts = counts;
        self
    }

    /// Metrics in scores-file order.
    pub fn metrics(&self) -> Vec<(&'static str, MetricValue)> {
        vec![
            (METRIC_AUTOAIS, MetricValue::Mean(self.mean_auto_ais)),
            (METRIC_SQUAD_EM, MetricValue::Mean(self.mean_em)),
            (METRIC_SQUAD_F1, MetricValue::Mean(self.mean_f1)),
            ("count", MetricValue::Count(self.count)),
            (
                "skipped (malformed rows)",
                MetricValue::Count(self.counts.malformed_rows),
            ),
            (
                "skipped (unknown question)",
                MetricValue::Count(self.counts.unknown_question),
            ),
            (
                "skipped (unknown attribution)",
                MetricValue::Count(self.counts.unknown_attribution),
            ),
            (
                "skipped (scoring unavailable)",
                MetricValue::Count(self.counts.scoring_unavailable),
            ),
            (
                "missing predictions",
                MetricValue::Count(self.counts.missing_predictions),
            ),
        ]
    }
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.metrics() {
            writeln!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}
