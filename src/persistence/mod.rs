pub mod rest;
pub mod store;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde::{Serialize, Deserialize};
use crate::difficulty::DifficultyTier;
use crate::error::ProgressError;
use crate::ledger::AnswerEvent;
use crate::metrics::EngineMetrics;
use crate::state::learner::ScoreSummary;

/// Stage tag a sink uses when it refuses a write without trying
pub const STAGE_CIRCUIT_OPEN: &str = "circuit_open";

/// A write queued by the engine for the persistence backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PersistEvent {
    Progress {
        session_id: String,
        question_number: usize,
        tier: DifficultyTier,
        event: AnswerEvent,
    },
    Score(ScoreSummary),
    Badge {
        session_id: String,
        name: String,
        kind: String,
    },
}

/// Backend that stores answers, score snapshots and badges.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn save_progress(
        &self,
        session_id: &str,
        question_number: usize,
        tier: DifficultyTier,
        event: &AnswerEvent,
    ) -> Result<(), ProgressError>;

    async fn save_score(&self, score: &ScoreSummary) -> Result<(), ProgressError>;

    async fn save_badge(&self, session_id: &str, name: &str, kind: &str) -> Result<(), ProgressError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub saved: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Send queued events to a sink. Fire-and-forget: failures are logged
/// and counted, never returned, and nothing is retried here.
pub async fn flush(
    sink: &dyn ProgressSink,
    events: Vec<PersistEvent>,
    metrics: &EngineMetrics,
) -> FlushReport {
    let mut report = FlushReport::default();

    for event in events {
        let result = match &event {
            PersistEvent::Progress { session_id, question_number, tier, event } => {
                sink.save_progress(session_id, *question_number, *tier, event).await
            }
            PersistEvent::Score(score) => sink.save_score(score).await,
            PersistEvent::Badge { session_id, name, kind } => {
                sink.save_badge(session_id, name, kind).await
            }
        };

        match result {
            Ok(()) => {
                report.saved += 1;
                metrics.record_persist_ok();
            }
            Err(e) if e.stage == STAGE_CIRCUIT_OPEN => {
                report.skipped += 1;
                metrics.record_persist_skipped();
                tracing::debug!(error = %e, "Persistence skipped");
            }
            Err(e) => {
                report.failed += 1;
                metrics.record_persist_failed();
                tracing::warn!(error = %e, "Background save failed");
            }
        }
    }

    if report.failed > 0 || report.skipped > 0 {
        tracing::info!(
            saved = report.saved,
            failed = report.failed,
            skipped = report.skipped,
            "Persistence flush finished with dropped writes"
        );
    }
    report
}

/// `session_<unix ms>_<9 base36 chars>`
pub fn new_session_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("session_{}_{}", Utc::now().timestamp_millis(), suffix)
}
