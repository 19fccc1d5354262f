pub mod grading;

use serde::{Serialize, Deserialize};
use chrono::Utc;
use crate::error::ProgressError;

/// One recorded response. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvent {
    pub concept: String,
    pub correct: bool,
    /// Milliseconds, never smaller than the previous event's
    pub timestamp: i64,
}

/// Append-only log of answer events. The ledger is the sole writer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerLedger {
    events: Vec<AnswerEvent>,
}

impl AnswerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an answer stamped with the current wall clock
    pub fn record(&mut self, concept: &str, correct: bool) -> Result<AnswerEvent, ProgressError> {
        self.record_at(concept, correct, Utc::now().timestamp_millis())
    }

    /// Append an answer with an explicit timestamp.
    /// A timestamp behind the last event is clamped forward to keep the log monotonic.
    pub fn record_at(
        &mut self,
        concept: &str,
        correct: bool,
        timestamp: i64,
    ) -> Result<AnswerEvent, ProgressError> {
        if concept.trim().is_empty() {
            return Err(ProgressError::new("Answer concept must not be empty", "ledger"));
        }

        let timestamp = match self.events.last() {
            Some(last) if last.timestamp > timestamp => last.timestamp,
            _ => timestamp,
        };

        let event = AnswerEvent {
            concept: concept.to_string(),
            correct,
            timestamp,
        };
        self.events.push(event.clone());

        tracing::debug!(
            concept = %event.concept,
            correct = event.correct,
            total = self.events.len(),
            "Answer recorded"
        );
        Ok(event)
    }

    /// Events for one concept, in insertion order.
    /// The iterator is `Clone`, so callers can restart it.
    pub fn events_for<'a>(&'a self, concept: &'a str) -> EventsFor<'a> {
        EventsFor {
            inner: self.events.iter(),
            concept,
        }
    }

    pub fn events(&self) -> &[AnswerEvent] {
        &self.events
    }

    /// The last `n` events across all concepts (all when fewer exist)
    pub fn recent(&self, n: usize) -> &[AnswerEvent] {
        let start = self.events.len().saturating_sub(n);
        &self.events[start..]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct EventsFor<'a> {
    inner: std::slice::Iter<'a, AnswerEvent>,
    concept: &'a str,
}

impl<'a> Iterator for EventsFor<'a> {
    type Item = &'a AnswerEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let concept = self.concept;
        self.inner.by_ref().find(|e| e.concept == concept)
    }
}
