use serde::{Serialize, Deserialize};
use crate::config::engine::GoalTargets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalEvent {
    Lesson,
    Activity,
}

/// Today's lesson/activity/XP counters against the daily targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoals {
    pub lessons_completed: u32,
    pub activities_completed: u32,
    pub xp_earned: u32,
    pub target: GoalTargets,
    /// Set once the daily goal reward was granted
    pub awarded: bool,
}

impl DailyGoals {
    pub fn new(target: GoalTargets) -> Self {
        DailyGoals {
            lessons_completed: 0,
            activities_completed: 0,
            xp_earned: 0,
            target,
            awarded: false,
        }
    }

    pub fn record(&mut self, event: GoalEvent) {
        match event {
            GoalEvent::Lesson => self.lessons_completed += 1,
            GoalEvent::Activity => self.activities_completed += 1,
        }
    }

    pub fn add_xp(&mut self, amount: u32) {
        self.xp_earned = self.xp_earned.saturating_add(amount);
    }

    pub fn is_met(&self) -> bool {
        self.lessons_completed >= self.target.lessons
            && self.activities_completed >= self.target.activities
            && self.xp_earned >= self.target.xp
    }

    /// True exactly once per day, the first time every target is met.
    pub fn claim(&mut self) -> bool {
        if self.awarded || !self.is_met() {
            return false;
        }
        self.awarded = true;
        true
    }

    /// Start a new day with the same targets
    pub fn reset(&mut self) {
        *self = DailyGoals::new(self.target.clone());
    }
}

impl Default for DailyGoals {
    fn default() -> Self {
        DailyGoals::new(GoalTargets::default())
    }
}
