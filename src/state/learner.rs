use std::collections::{BTreeMap, VecDeque};
use serde::{Serialize, Deserialize};
use crate::config::engine::EngineConfig;
use crate::curriculum::Curriculum;
use crate::difficulty::DifficultyTier;
use crate::ledger::AnswerLedger;
use crate::rewards::XpLedger;
use crate::rewards::badges::BadgeCase;
use crate::rewards::goals::DailyGoals;
use crate::rewards::streak::Streak;

const ACTIVITY_LOG_LIMIT: usize = 100;

/// Running answer counters plus per-concept mistake tallies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    pub total_questions: u32,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    pub mistake_patterns: BTreeMap<String, u32>,
}

impl Performance {
    pub fn record(&mut self, concept: &str, correct: bool) {
        self.total_questions += 1;
        if correct {
            self.correct_answers += 1;
        } else {
            self.wrong_answers += 1;
            *self.mistake_patterns.entry(concept.to_string()).or_insert(0) += 1;
        }
    }
}

/// One XP gain, kept for the dashboard history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpGain {
    pub amount: u32,
    pub reason: String,
    pub timestamp: i64,
}

/// A hint shown during an activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintUse {
    pub level: u8,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierChange {
    pub from: DifficultyTier,
    pub to: DifficultyTier,
    pub accuracy: Option<f64>,
    pub timestamp: i64,
}

/// Aggregate root of one learner's progression.
/// Mutated only through `ProgressionEngine`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerState {
    pub xp: XpLedger,
    pub difficulty_tier: DifficultyTier,
    pub streak: Streak,
    pub curriculum: Curriculum,
    pub daily_goals: DailyGoals,
    pub badges: BadgeCase,
    pub performance: Performance,
    pub difficulty_history: Vec<TierChange>,
    pub xp_log: VecDeque<XpGain>,
    /// Ledger length when the current tier began
    pub tier_started_at: usize,
    /// Hints taken, keyed by activity id
    #[serde(default)]
    pub hints_used: BTreeMap<String, Vec<HintUse>>,
    /// Seconds spent practising this session
    #[serde(default)]
    pub time_spent_secs: u64,
}

impl LearnerState {
    pub fn new(config: &EngineConfig) -> Self {
        LearnerState {
            xp: XpLedger::new(&config.leveling),
            difficulty_tier: DifficultyTier::default(),
            streak: Streak::default(),
            curriculum: Curriculum::default(),
            daily_goals: DailyGoals::new(config.daily_goals.clone()),
            badges: BadgeCase::default(),
            performance: Performance::default(),
            difficulty_history: Vec::new(),
            xp_log: VecDeque::new(),
            tier_started_at: 0,
            hints_used: BTreeMap::new(),
            time_spent_secs: 0,
        }
    }

    pub(crate) fn log_xp(&mut self, gain: XpGain) {
        self.xp_log.push_back(gain);
        while self.xp_log.len() > ACTIVITY_LOG_LIMIT {
            self.xp_log.pop_front();
        }
    }
}

impl Default for LearnerState {
    fn default() -> Self {
        LearnerState::new(&EngineConfig::default())
    }
}

/// Everything needed to resume a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerSnapshot {
    pub session_id: String,
    pub state: LearnerState,
    pub answers: AnswerLedger,
    pub saved_at: i64,
}

/// Score figures sent to the persistence backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub session_id: String,
    pub total_points: u32,
    pub level: u32,
    pub xp_to_next_level: u32,
    pub difficulty: DifficultyTier,
    pub streak_days: u32,
    pub longest_streak_days: u32,
    pub accuracy: f64,
    pub mastery: BTreeMap<String, u8>,
    /// Seconds, sent as `timeSpent`
    pub time_spent: u64,
}
