use std::sync::Arc;
use std::time::{Duration, Instant};
use parking_lot::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    /// Writes go through
    Closed,
    /// Backend considered down; writes are refused
    Open,
    /// Cooldown elapsed; the next write is a trial
    HalfOpen,
}

#[derive(Debug, Default)]
struct Tally {
    consecutive_failures: u64,
    opened_at: Option<Instant>,
}

/// Guards the persistence backend.
/// Opens after `failure_threshold` consecutive failures and refuses writes
/// for `cooldown`; a failed trial while half-open reopens it at once.
#[derive(Clone, Debug)]
pub struct CircuitBreaker {
    tally: Arc<RwLock<Tally>>,
    cooldown: Duration,
    failure_threshold: u64,
}

impl CircuitBreaker {
    pub fn new(cooldown_secs: u64, failure_threshold: u64) -> Self {
        CircuitBreaker {
            tally: Arc::new(RwLock::new(Tally::default())),
            cooldown: Duration::from_secs(cooldown_secs),
            failure_threshold: failure_threshold.max(1),
        }
    }

    pub fn state(&self) -> BreakerState {
        match self.tally.read().opened_at {
            None => BreakerState::Closed,
            Some(at) if at.elapsed() < self.cooldown => BreakerState::Open,
            Some(_) => BreakerState::HalfOpen,
        }
    }

    /// True while writes should be skipped without trying
    pub fn is_open(&self) -> bool {
        self.state() == BreakerState::Open
    }

    pub fn record_success(&self) {
        let mut tally = self.tally.write();
        if tally.opened_at.take().is_some() {
            tracing::info!("Persistence circuit closed");
        }
        tally.consecutive_failures = 0;
    }

    pub fn record_failure(&self) {
        let mut tally = self.tally.write();
        tally.consecutive_failures += 1;

        let trial_failed = tally.opened_at.is_some();
        if trial_failed || tally.consecutive_failures >= self.failure_threshold {
            if !trial_failed {
                tracing::warn!(
                    failures = tally.consecutive_failures,
                    cooldown_secs = self.cooldown.as_secs(),
                    "Persistence circuit opened"
                );
            }
            tally.opened_at = Some(Instant::now());
        }
    }

    pub fn failure_count(&self) -> u64 {
        self.tally.read().consecutive_failures
    }
}
