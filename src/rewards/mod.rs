pub mod badges;
pub mod goals;
pub mod streak;

use serde::{Serialize, Deserialize};
use crate::config::engine::{LevelCurve, RewardValues};

/// Discrete events that earn XP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    Lesson,
    Activity,
    PerfectScore,
    Mastery,
    MasteryAttempt,
    DailyGoal,
    Assessment,
}

impl RewardKind {
    pub fn xp(&self, values: &RewardValues) -> u32 {
        match self {
            RewardKind::Lesson => values.lesson,
            RewardKind::Activity => values.activity,
            RewardKind::PerfectScore => values.perfect_score,
            RewardKind::Mastery => values.mastery,
            RewardKind::MasteryAttempt => values.mastery_attempt,
            RewardKind::DailyGoal => values.daily_goal,
            RewardKind::Assessment => values.assessment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub new_level: u32,
    pub previous_threshold: u32,
    pub next_threshold: u32,
}

/// Cumulative XP with a multiplicative level curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XpLedger {
    pub xp: u32,
    pub level: u32,
    pub xp_to_next_level: u32,
    growth_factor: f64,
}

impl XpLedger {
    pub fn new(curve: &LevelCurve) -> Self {
        XpLedger {
            xp: 0,
            level: 1,
            xp_to_next_level: curve.initial_threshold.max(1),
            growth_factor: curve.growth_factor,
        }
    }

    /// Add XP. Crossing the threshold raises the level by exactly one, even
    /// when the new total also clears the next threshold.
    pub fn add_xp(&mut self, amount: u32, reason: &str) -> Option<LevelUp> {
        self.xp = self.xp.saturating_add(amount);
        tracing::debug!(amount, reason, xp = self.xp, "XP added");

        if self.xp < self.xp_to_next_level {
            return None;
        }

        let previous_threshold = self.xp_to_next_level;
        let grown = (previous_threshold as f64 * self.growth_factor).floor();
        // Clamp keeps the curve strictly increasing for tiny thresholds
        let next_threshold = (grown.min(u32::MAX as f64) as u32).max(previous_threshold.saturating_add(1));

        self.level += 1;
        self.xp_to_next_level = next_threshold;

        tracing::info!(level = self.level, xp = self.xp, next_threshold, "Level up");
        Some(LevelUp {
            new_level: self.level,
            previous_threshold,
            next_threshold,
        })
    }
}

impl Default for XpLedger {
    fn default() -> Self {
        XpLedger::new(&LevelCurve::default())
    }
}
