use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize, Deserialize};
use tokio::time::Duration;
use crate::circuit_breaker::CircuitBreaker;
use crate::config::engine::BackendConfig;
use crate::difficulty::DifficultyTier;
use crate::error::ProgressError;
use crate::ledger::AnswerEvent;
use crate::state::learner::ScoreSummary;
use super::{ProgressSink, STAGE_CIRCUIT_OPEN};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressBody<'a> {
    session_id: &'a str,
    level: DifficultyTier,
    question_number: usize,
    concept: &'a str,
    is_correct: bool,
    timestamp: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BadgeBody<'a> {
    session_id: &'a str,
    badge_name: &'a str,
    badge_type: &'a str,
}

/// `{ "success": bool, "error"?: string }` returned by every endpoint
#[derive(Deserialize)]
struct Ack {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Sends progress to the HTTP backend
/// (`/api/save-progress`, `/api/update-score`, `/api/award-badge`).
#[derive(Clone, Debug)]
pub struct RestSink {
    client: Client,
    base_url: String,
    breaker: CircuitBreaker,
}

impl RestSink {
    pub fn new(config: &BackendConfig) -> Result<Self, ProgressError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(RestSink {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            breaker: CircuitBreaker::new(config.cooldown_secs, config.failure_threshold),
        })
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<()> {
        let url = self.endpoint(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("{} returned HTTP {}", url, status);
        }

        let ack: Ack = response
            .json()
            .await
            .with_context(|| format!("Invalid response body from {}", url))?;
        if !ack.success {
            anyhow::bail!(
                "{} rejected the write: {}",
                url,
                ack.error.unwrap_or_else(|| "no reason given".to_string())
            );
        }
        Ok(())
    }

    /// POST guarded by the circuit breaker
    async fn send<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<(), ProgressError> {
        if self.breaker.is_open() {
            return Err(ProgressError::new(
                "Persistence backend unavailable",
                STAGE_CIRCUIT_OPEN
            ).with_context(format!("endpoint: {}", path)));
        }

        match self.post_json(path, body).await {
            Ok(()) => {
                self.breaker.record_success();
                Ok(())
            }
            Err(e) => {
                self.breaker.record_failure();
                Err(ProgressError::new(format!("{:#}", e), "http")
                    .with_source("reqwest")
                    .with_context(format!("endpoint: {}", path)))
            }
        }
    }
}

#[async_trait]
impl ProgressSink for RestSink {
    async fn save_progress(
        &self,
        session_id: &str,
        question_number: usize,
        tier: DifficultyTier,
        event: &AnswerEvent,
    ) -> Result<(), ProgressError> {
        let body = ProgressBody {
            session_id,
            level: tier,
            question_number,
            concept: &event.concept,
            is_correct: event.correct,
            timestamp: event.timestamp,
        };
        self.send("/api/save-progress", &body).await
    }

    async fn save_score(&self, score: &ScoreSummary) -> Result<(), ProgressError> {
        self.send("/api/update-score", score).await
    }

    async fn save_badge(&self, session_id: &str, name: &str, kind: &str) -> Result<(), ProgressError> {
        let body = BadgeBody {
            session_id,
            badge_name: name,
            badge_type: kind,
        };
        self.send("/api/award-badge", &body).await
    }
}
