//! Scriptable entailment model for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::error::NliError;
use super::model::EntailmentModel;

#[derive(Debug, Clone)]
enum Rule {
    Score { needle: String, score: f32 },
    Fail { needle: String },
}

/// Returns a default score, overridden by substring rules on the hypothesis.
#[derive(Debug, Default)]
pub struct MockEntailmentModel {
    default_score: f32,
    rules: Vec<Rule>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockEntailmentModel {
    pub fn fixed(score: f32) -> Self {
        Self {
            default_score: score,
            ..Default::default()
        }
    }

    /// Hypotheses containing `needle` score `score`.
    pub fn with_score_for(mut self, needle: impl Into<String>, score: f32) -> Self {
        self.rules.push(Rule::Score {
            needle: needle.into(),
            score,
        });
        self
    }

    /// Hypotheses containing `needle` fail as if the backend were down.
    pub fn failing_on(mut self, needle: impl Into<String>) -> Self {
        self.rules.push(Rule::Fail {
            needle: needle.into(),
        });
        self
    }

    /// Sleeps before every answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntailmentModel for MockEntailmentModel {
    async fn predict(&self, _premise: &str, hypothesis: &str) -> Result<f32, NliError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        for rule in &self.rules {
            match rule {
                Rule::Score { needle, score } if hypothesis.contains(needle.as_str()) => {
                    return Ok(*score);
                }
                Rule::Fail { needle } if hypothesis.contains(needle.as_str()) => {
                    return Err(NliError::Unreachable {
                        url: "mock://entailment".to_string(),
                        reason: "scripted failure".to_string(),
                    });
                }
                _ => {}
            }
        }

        Ok(self.default_score)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
