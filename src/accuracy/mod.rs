use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use crate::ledger::AnswerEvent;

/// Correct/total tally for one concept. Invariant: `correct <= total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptAccuracy {
    pub concept: String,
    pub correct: u32,
    pub total: u32,
}

impl ConceptAccuracy {
    fn new(concept: &str) -> Self {
        ConceptAccuracy {
            concept: concept.to_string(),
            correct: 0,
            total: 0,
        }
    }

    fn push(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    pub fn accuracy_pct(&self) -> f64 {
        percentage(self.correct as usize, self.total as usize)
    }

    pub fn mistakes(&self) -> u32 {
        self.total - self.correct
    }
}

/// `100 * correct / total`, with an empty sample counted as perfect
fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    100.0 * correct as f64 / total as f64
}

/// Accuracy over every event given; 100 when there are none.
pub fn overall_accuracy<'a, I>(events: I) -> f64
where
    I: IntoIterator<Item = &'a AnswerEvent>,
{
    let (correct, total) = events
        .into_iter()
        .fold((0usize, 0usize), |(c, t), e| (c + e.correct as usize, t + 1));
    percentage(correct, total)
}

/// Accuracy over the last `window` events, or all of them when fewer exist.
pub fn windowed_accuracy<'a, I>(events: I, window: usize) -> f64
where
    I: IntoIterator<Item = &'a AnswerEvent>,
{
    let all: Vec<&AnswerEvent> = events.into_iter().collect();
    let start = all.len().saturating_sub(window);
    overall_accuracy(all[start..].iter().copied())
}

/// Per-concept tallies keyed by concept name
pub fn per_concept_breakdown<'a, I>(events: I) -> BTreeMap<String, ConceptAccuracy>
where
    I: IntoIterator<Item = &'a AnswerEvent>,
{
    let mut breakdown: BTreeMap<String, ConceptAccuracy> = BTreeMap::new();
    for event in events {
        breakdown
            .entry(event.concept.clone())
            .or_insert_with(|| ConceptAccuracy::new(&event.concept))
            .push(event.correct);
    }
    breakdown
}

/// Concepts most in need of practice: those with at least one mistake,
/// by mistake count descending. On equal counts a concept with no correct
/// answer at all comes first, then lower accuracy, then name.
pub fn practice_priorities<'a, I>(events: I) -> Vec<ConceptAccuracy>
where
    I: IntoIterator<Item = &'a AnswerEvent>,
{
    let mut ranked: Vec<ConceptAccuracy> = per_concept_breakdown(events)
        .into_values()
        .filter(|c| c.mistakes() > 0)
        .collect();

    ranked.sort_by(|a, b| {
        b.mistakes()
            .cmp(&a.mistakes())
            .then_with(|| (a.correct > 0).cmp(&(b.correct > 0)))
            .then_with(|| {
                a.accuracy_pct()
                    .partial_cmp(&b.accuracy_pct())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.concept.cmp(&b.concept))
    });
    ranked
}
