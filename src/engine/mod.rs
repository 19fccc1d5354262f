//! Progression engine: the single writer of a learner's state.
//!
//! Every operation is synchronous. Side effects the UI or the backend care
//! about are queued instead of performed: notifications go to a bounded
//! queue the host drains, and persistence writes go to an outbox the host
//! flushes with [`crate::persistence::flush`] at its own cadence.

use std::time::Duration;
use chrono::{Local, NaiveDate, Utc};
use serde::{Serialize, Deserialize};
use crate::accuracy::{overall_accuracy, practice_priorities, ConceptAccuracy};
use crate::config::engine::{get_engine_config, EngineConfig};
use crate::curriculum::{Curriculum, MasteryOutcome};
use crate::curriculum::catalog::ChapterDef;
use crate::difficulty::{adjust, placement_tier, Adjustment, DifficultyTier};
use crate::error::ProgressError;
use crate::ledger::{AnswerEvent, AnswerLedger};
use crate::ledger::grading::answers_match;
use crate::metrics::EngineMetrics;
use crate::notifications::{Notification, NotificationKind, NotificationQueue};
use crate::persistence::{new_session_id, PersistEvent};
use crate::rewards::{LevelUp, RewardKind};
use crate::rewards::badges::Badge;
use crate::rewards::goals::GoalEvent;
use crate::rewards::streak::StreakChange;
use crate::state::learner::{HintUse, LearnerSnapshot, LearnerState, ScoreSummary, TierChange, XpGain};

/// XP granted by one operation, possibly across several reward events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub xp: u32,
    pub level_ups: Vec<LevelUp>,
}

impl Award {
    fn absorb(&mut self, amount: u32, level_up: Option<LevelUp>) {
        self.xp += amount;
        self.level_ups.extend(level_up);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityOutcome {
    /// false when the activity was already in the completed set
    pub newly_completed: bool,
    pub award: Award,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryReport {
    pub outcome: MasteryOutcome,
    pub award: Award,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub struct ProgressionEngine {
    session_id: String,
    config: EngineConfig,
    state: LearnerState,
    ledger: AnswerLedger,
    notifications: NotificationQueue,
    outbox: Vec<PersistEvent>,
    metrics: EngineMetrics,
}

impl ProgressionEngine {
    /// Fresh learner: level 1, only the first chapter unlocked
    pub fn new(config: EngineConfig) -> Self {
        Self::with_session(new_session_id(), config)
    }

    pub fn with_session<S: Into<String>>(session_id: S, config: EngineConfig) -> Self {
        let session_id = session_id.into();
        tracing::info!(session = %session_id, "Progression session started");
        ProgressionEngine {
            session_id,
            state: LearnerState::new(&config),
            config,
            ledger: AnswerLedger::new(),
            notifications: NotificationQueue::default(),
            outbox: Vec::new(),
            metrics: EngineMetrics::new(),
        }
    }

    /// Engine with a custom chapter catalog
    pub fn with_catalog(mut self, chapters: Vec<ChapterDef>) -> Self {
        self.state.curriculum = Curriculum::new(chapters);
        self
    }

    /// Resume from a saved snapshot
    pub fn from_snapshot(snapshot: LearnerSnapshot, config: EngineConfig) -> Self {
        tracing::info!(
            session = %snapshot.session_id,
            answers = snapshot.answers.len(),
            "Progression session restored"
        );
        ProgressionEngine {
            session_id: snapshot.session_id,
            config,
            state: snapshot.state,
            ledger: snapshot.answers,
            notifications: NotificationQueue::default(),
            outbox: Vec::new(),
            metrics: EngineMetrics::new(),
        }
    }

    pub fn snapshot(&self) -> LearnerSnapshot {
        LearnerSnapshot {
            session_id: self.session_id.clone(),
            state: self.state.clone(),
            answers: self.ledger.clone(),
            saved_at: now_millis(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &LearnerState {
        &self.state
    }

    pub fn ledger(&self) -> &AnswerLedger {
        &self.ledger
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.state.curriculum
    }

    pub fn difficulty_tier(&self) -> DifficultyTier {
        self.state.difficulty_tier
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Take every queued persistence write
    pub fn take_outbox(&mut self) -> Vec<PersistEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn notify(&mut self, kind: NotificationKind, message: String) {
        self.notifications.push(kind, message, now_millis());
    }

    // ----- answers -----

    /// Append an answer to the ledger and the performance counters
    pub fn record_answer(&mut self, concept: &str, correct: bool) -> Result<AnswerEvent, ProgressError> {
        let event = self.ledger.record(concept, correct)?;
        self.state.performance.record(concept, correct);
        self.metrics.record_answer();
        self.outbox.push(PersistEvent::Progress {
            session_id: self.session_id.clone(),
            question_number: self.ledger.len(),
            tier: self.state.difficulty_tier,
            event: event.clone(),
        });
        Ok(event)
    }

    /// Grade a typed answer and record the result. Returns whether it was correct.
    pub fn submit_answer(
        &mut self,
        concept: &str,
        answer: &str,
        correct_answer: &str,
    ) -> Result<bool, ProgressError> {
        let correct = answers_match(answer, correct_answer);
        self.record_answer(concept, correct)?;
        Ok(correct)
    }

    pub fn overall_accuracy(&self) -> f64 {
        overall_accuracy(self.ledger.events())
    }

    /// Concepts ranked by how much practice they need
    pub fn practice_priorities(&self) -> Vec<ConceptAccuracy> {
        practice_priorities(self.ledger.events())
    }

    // ----- difficulty -----

    /// Check the answers given at the current tier. Does not change state.
    pub fn evaluate_difficulty(&self) -> Adjustment {
        let start = self.state.tier_started_at.min(self.ledger.len());
        adjust(
            self.state.difficulty_tier,
            &self.ledger.events()[start..],
            &self.config.difficulty,
        )
    }

    /// Apply an adjustment returned by `evaluate_difficulty`. Returns true if the tier changed.
    pub fn apply_difficulty(&mut self, adjustment: &Adjustment) -> bool {
        if !adjustment.should_change || adjustment.new_level == self.state.difficulty_tier {
            return false;
        }
        self.set_tier(adjustment.new_level, Some(adjustment.accuracy));
        if let Some(message) = &adjustment.message {
            self.notify(NotificationKind::Difficulty, message.clone());
        }
        true
    }

    fn set_tier(&mut self, tier: DifficultyTier, accuracy: Option<f64>) {
        let from = self.state.difficulty_tier;
        self.state.difficulty_tier = tier;
        self.state.tier_started_at = self.ledger.len();
        self.state.difficulty_history.push(TierChange {
            from,
            to: tier,
            accuracy,
            timestamp: now_millis(),
        });
        tracing::info!(from = %from, to = %tier, accuracy = ?accuracy, "Difficulty tier changed");
    }

    /// Place the learner after a pre-assessment and grant the assessment XP
    pub fn place_from_assessment(&mut self, percentage: f64) -> (DifficultyTier, Award) {
        let tier = placement_tier(percentage);
        if tier != self.state.difficulty_tier {
            self.set_tier(tier, Some(percentage));
        }
        let mut award = Award::default();
        self.reward(RewardKind::Assessment, "Pre-Assessment Complete", &mut award);
        self.queue_score();
        (tier, award)
    }

    // ----- XP -----

    /// Add XP directly. At most one level-up per call.
    pub fn add_xp(&mut self, amount: u32, reason: &str) -> Option<LevelUp> {
        let level_up = self.state.xp.add_xp(amount, reason);
        self.state.daily_goals.add_xp(amount);
        self.state.log_xp(XpGain {
            amount,
            reason: reason.to_string(),
            timestamp: now_millis(),
        });

        if let Some(up) = level_up {
            self.metrics.record_level_up();
            self.notify(
                NotificationKind::LevelUp,
                format!("Level Up! You're now level {}!", up.new_level),
            );
        }
        level_up
    }

    fn reward(&mut self, kind: RewardKind, reason: &str, award: &mut Award) {
        let amount = kind.xp(&self.config.rewards);
        let level_up = self.add_xp(amount, reason);
        award.absorb(amount, level_up);
    }

    fn record_goal(&mut self, event: GoalEvent, award: &mut Award) {
        self.state.daily_goals.record(event);
        self.check_daily_goal(award);
    }

    fn check_daily_goal(&mut self, award: &mut Award) {
        if self.state.daily_goals.claim() {
            let amount = RewardKind::DailyGoal.xp(&self.config.rewards);
            self.reward(RewardKind::DailyGoal, "Daily Goal Complete", award);
            self.notify(
                NotificationKind::Goal,
                format!("Daily Goal Complete! +{} XP", amount),
            );
        }
    }

    /// Start a new day of goals
    pub fn reset_daily_goals(&mut self) {
        self.state.daily_goals.reset();
    }

    fn queue_score(&mut self) {
        let summary = self.score_summary();
        self.outbox.push(PersistEvent::Score(summary));
    }

    pub fn score_summary(&self) -> ScoreSummary {
        ScoreSummary {
            session_id: self.session_id.clone(),
            total_points: self.state.xp.xp,
            level: self.state.xp.level,
            xp_to_next_level: self.state.xp.xp_to_next_level,
            difficulty: self.state.difficulty_tier,
            streak_days: self.state.streak.current,
            longest_streak_days: self.state.streak.longest,
            accuracy: self.overall_accuracy(),
            mastery: self
                .state
                .curriculum
                .all_progress()
                .map(|p| (p.chapter_id.clone(), p.mastery_score))
                .collect(),
            time_spent: self.state.time_spent_secs,
        }
    }

    // ----- curriculum -----

    pub fn complete_lesson(&mut self, chapter_id: &str) -> Result<Award, ProgressError> {
        self.state.curriculum.complete_lesson(chapter_id)?;

        let mut award = Award::default();
        self.reward(RewardKind::Lesson, &format!("Completed {} lesson", chapter_id), &mut award);
        self.record_goal(GoalEvent::Lesson, &mut award);
        self.queue_score();

        tracing::info!(chapter = %chapter_id, xp = award.xp, "Lesson completed");
        Ok(award)
    }

    /// Mark an activity done. The completed set ignores repeats, but XP is
    /// granted on every call; a score of 100 or more adds the perfect-score bonus.
    pub fn complete_activity(
        &mut self,
        chapter_id: &str,
        activity_id: &str,
        score: u32,
    ) -> Result<ActivityOutcome, ProgressError> {
        let newly_completed = self.state.curriculum.complete_activity(chapter_id, activity_id)?;

        let mut award = Award::default();
        self.reward(RewardKind::Activity, &format!("Completed {}", activity_id), &mut award);
        self.record_goal(GoalEvent::Activity, &mut award);
        if score >= 100 {
            self.reward(RewardKind::PerfectScore, "Perfect Score Bonus", &mut award);
        }
        self.queue_score();

        tracing::info!(
            chapter = %chapter_id,
            activity = %activity_id,
            score,
            newly_completed,
            xp = award.xp,
            "Activity completed"
        );
        Ok(ActivityOutcome { newly_completed, award })
    }

    /// Record a mastery quiz percentage. A pass grants mastery XP and unlocks
    /// the next chapter; a fail grants attempt XP. Retries are unlimited.
    pub fn record_mastery_quiz(
        &mut self,
        chapter_id: &str,
        percentage: u8,
    ) -> Result<MasteryReport, ProgressError> {
        let pass_mark = self.config.mastery.pass_mark;
        let outcome = self.state.curriculum.record_mastery(chapter_id, percentage, pass_mark)?;

        let mut award = Award::default();
        if outcome.passed {
            self.reward(RewardKind::Mastery, &format!("Mastered {}", chapter_id), &mut award);
        } else {
            self.reward(RewardKind::MasteryAttempt, "Mastery Quiz Attempted", &mut award);
        }

        if let Some(next) = &outcome.unlocked {
            self.metrics.record_unlock();
            self.notify(NotificationKind::Unlock, format!("{} chapter unlocked!", next.name));
        }
        self.queue_score();

        tracing::info!(
            chapter = %chapter_id,
            score = outcome.score,
            passed = outcome.passed,
            unlocked = ?outcome.unlocked.as_ref().map(|c| c.id.as_str()),
            "Mastery quiz recorded"
        );
        Ok(MasteryReport { outcome, award })
    }

    /// Note a hint taken during an activity. Returns the hint count for it.
    pub fn use_hint(&mut self, activity_id: &str, level: u8) -> Result<usize, ProgressError> {
        if self.state.curriculum.chapter_of_activity(activity_id).is_none() {
            return Err(ProgressError::new(
                format!("Unknown activity '{}'", activity_id),
                "curriculum"
            ));
        }

        let hints = self.state.hints_used.entry(activity_id.to_string()).or_default();
        hints.push(HintUse { level, timestamp: now_millis() });
        let count = hints.len();
        tracing::debug!(activity = %activity_id, level, count, "Hint used");
        Ok(count)
    }

    pub fn hints_for(&self, activity_id: &str) -> &[HintUse] {
        self.state
            .hints_used
            .get(activity_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Add practice time; whole seconds are kept
    pub fn add_time_spent(&mut self, elapsed: Duration) -> u64 {
        self.state.time_spent_secs = self.state.time_spent_secs.saturating_add(elapsed.as_secs());
        self.state.time_spent_secs
    }

    // ----- streaks & badges -----

    /// Count activity on the given calendar day
    pub fn update_streak(&mut self, today: NaiveDate) -> StreakChange {
        let change = self.state.streak.update(today);
        let current = self.state.streak.current;
        if change != StreakChange::Unchanged && current > 1 {
            self.notify(NotificationKind::Streak, format!("{} day streak!", current));
        }
        change
    }

    /// Count activity today in local time
    pub fn update_streak_today(&mut self) -> StreakChange {
        self.update_streak(Local::now().date_naive())
    }

    /// Award a badge once per name. Returns the badge when it is new.
    pub fn award_badge(&mut self, name: &str, kind: &str) -> Option<Badge> {
        let badge = self.state.badges.award(name, kind, now_millis())?;
        self.notify(NotificationKind::Badge, format!("New Badge: {}!", badge.name));
        self.outbox.push(PersistEvent::Badge {
            session_id: self.session_id.clone(),
            name: badge.name.clone(),
            kind: badge.kind.clone(),
        });
        Some(badge)
    }
}

impl Default for ProgressionEngine {
    fn default() -> Self {
        ProgressionEngine::new(get_engine_config().clone())
    }
}
