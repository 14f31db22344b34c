//! Entailment scoring served over HTTP.
//!
//! Request: `POST {url}` with `{"premise": ..., "hypothesis": ...}`.
//! Response: `{"score": <float in [0, 1]>}`.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::NliConfig;
use super::error::NliError;
use super::model::EntailmentModel;

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    premise: &'a str,
    hypothesis: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    score: f32,
}

#[derive(Debug, Clone)]
pub struct HttpEntailment {
    url: String,
    http: HttpClient,
}

impl HttpEntailment {
    pub fn new(config: &NliConfig) -> Result<Self, NliError> {
        let url = config.url.clone().ok_or_else(|| NliError::InvalidConfig {
            reason: "url is required for the http backend".to_string(),
        })?;

        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NliError::InvalidConfig {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { url, http })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl EntailmentModel for HttpEntailment {
    async fn predict(&self, premise: &str, hypothesis: &str) -> Result<f32, NliError> {
        let unreachable = |reason: String| NliError::Unreachable {
            url: self.url.clone(),
            reason,
        };

        let response = self
            .http
            .post(&self.url)
            .json(&PredictRequest {
                premise,
                hypothesis,
            })
            .send()
            .await
            .map_err(|e| unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unreachable(format!("HTTP {status}")));
        }

        let body: PredictResponse =
            response
                .json()
                .await
                .map_err(|e| NliError::InvalidResponse {
                    reason: e.to_string(),
                })?;

        debug!(score = body.score, "Remote entailment score");
        Ok(body.score)
    }

    fn name(&self) -> &str {
        "http"
    }
}
