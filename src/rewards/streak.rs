use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

/// Consecutive-day activity streak
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
    pub last_activity: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Already counted today
    Unchanged,
    Extended(u32),
    /// First activity, or the chain was broken
    Started,
}

impl Streak {
    /// Count activity on `today`.
    pub fn update(&mut self, today: NaiveDate) -> StreakChange {
        let change = match self.last_activity {
            Some(last) if last == today => return StreakChange::Unchanged,
            Some(last) if today.signed_duration_since(last).num_days() == 1 => {
                self.current += 1;
                StreakChange::Extended(self.current)
            }
            _ => {
                self.current = 1;
                StreakChange::Started
            }
        };

        self.longest = self.longest.max(self.current);
        self.last_activity = Some(today);
        change
    }
}
