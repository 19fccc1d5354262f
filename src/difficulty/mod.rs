use serde::{Serialize, Deserialize};
use std::fmt;
use crate::accuracy::windowed_accuracy;
use crate::config::engine::DifficultyRules;
use crate::ledger::AnswerEvent;

/// Difficulty tier. Lesson content calls the same tiers
/// beginner / intermediate / advanced, which deserialize here too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    #[serde(alias = "beginner")]
    Easy,
    #[serde(alias = "intermediate")]
    Medium,
    #[serde(alias = "advanced")]
    Hard,
}

impl DifficultyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Medium => "medium",
            DifficultyTier::Hard => "hard",
        }
    }

    /// Name used by lesson content for the same tier
    pub fn learning_level(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "beginner",
            DifficultyTier::Medium => "intermediate",
            DifficultyTier::Hard => "advanced",
        }
    }
}

impl Default for DifficultyTier {
    fn default() -> Self {
        DifficultyTier::Medium
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a difficulty check. The caller applies `new_level` itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub should_change: bool,
    pub new_level: DifficultyTier,
    pub message: Option<String>,
    /// Windowed accuracy the decision was based on
    pub accuracy: f64,
}

impl Adjustment {
    fn stay(current: DifficultyTier, accuracy: f64) -> Self {
        Adjustment {
            should_change: false,
            new_level: current,
            message: None,
            accuracy,
        }
    }

    fn change(new_level: DifficultyTier, message: &str, accuracy: f64) -> Self {
        Adjustment {
            should_change: true,
            new_level,
            message: Some(message.to_string()),
            accuracy,
        }
    }
}

/// Decide a tier change from an accuracy figure and its sample size.
/// Promotions fire at the threshold (`>=`), demotions strictly below it.
pub fn adjust_for_accuracy(
    current: DifficultyTier,
    accuracy: f64,
    samples: usize,
    rules: &DifficultyRules,
) -> Adjustment {
    if samples < rules.min_samples {
        return Adjustment::stay(current, accuracy);
    }

    match current {
        DifficultyTier::Easy if accuracy >= rules.easy_to_medium => Adjustment::change(
            DifficultyTier::Medium,
            "Great progress! Moving to Intermediate level!",
            accuracy,
        ),
        DifficultyTier::Medium if accuracy >= rules.medium_to_hard => Adjustment::change(
            DifficultyTier::Hard,
            "Outstanding! You're ready for Advanced content!",
            accuracy,
        ),
        DifficultyTier::Medium if accuracy < rules.medium_to_easy => Adjustment::change(
            DifficultyTier::Easy,
            "Let's build a stronger foundation with simpler examples!",
            accuracy,
        ),
        DifficultyTier::Hard if accuracy < rules.hard_to_medium => Adjustment::change(
            DifficultyTier::Medium,
            "Let's review some concepts with guided examples.",
            accuracy,
        ),
        _ => Adjustment::stay(current, accuracy),
    }
}

/// Decide a tier change from the answers given at the current tier.
pub fn adjust<'a, I>(current: DifficultyTier, events: I, rules: &DifficultyRules) -> Adjustment
where
    I: IntoIterator<Item = &'a AnswerEvent>,
{
    let events: Vec<&AnswerEvent> = events.into_iter().collect();
    let accuracy = windowed_accuracy(events.iter().copied(), rules.window);
    adjust_for_accuracy(current, accuracy, events.len(), rules)
}

/// Starting tier from a placement assessment percentage
pub fn placement_tier(percentage: f64) -> DifficultyTier {
    if percentage >= 80.0 {
        DifficultyTier::Hard
    } else if percentage >= 40.0 {
        DifficultyTier::Medium
    } else {
        DifficultyTier::Easy
    }
}
