use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Progression and persistence counters.
/// Clones share the same atomics, so a flush task can hold its own handle.
#[derive(Clone, Default, Debug)]
pub struct EngineMetrics {
    pub answers_recorded: Arc<AtomicU64>,
    pub level_ups: Arc<AtomicU64>,
    pub chapters_unlocked: Arc<AtomicU64>,
    pub persist_ok: Arc<AtomicU64>,
    pub persist_failed: Arc<AtomicU64>,
    /// Writes dropped because the backend circuit was open
    pub persist_skipped: Arc<AtomicU64>,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_answer(&self) {
        self.answers_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_level_up(&self) {
        self.level_ups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unlock(&self) {
        self.chapters_unlocked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persist_ok(&self) {
        self.persist_ok.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persist_failed(&self) {
        self.persist_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persist_skipped(&self) {
        self.persist_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            answers_recorded: self.answers_recorded.load(Ordering::Relaxed),
            level_ups: self.level_ups.load(Ordering::Relaxed),
            chapters_unlocked: self.chapters_unlocked.load(Ordering::Relaxed),
            persist_ok: self.persist_ok.load(Ordering::Relaxed),
            persist_failed: self.persist_failed.load(Ordering::Relaxed),
            persist_skipped: self.persist_skipped.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub answers_recorded: u64,
    pub level_ups: u64,
    pub chapters_unlocked: u64,
    pub persist_ok: u64,
    pub persist_failed: u64,
    pub persist_skipped: u64,
}
