use std::collections::VecDeque;
use serde::{Serialize, Deserialize};

const MAX_PENDING: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    LevelUp,
    Streak,
    Badge,
    Unlock,
    Goal,
    Difficulty,
}

/// Human-readable message for the UI layer; presentation is up to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: i64,
}

/// Pending notifications; only the most recent ten are kept.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, kind: NotificationKind, message: String, timestamp: i64) {
        tracing::debug!(kind = ?kind, message = %message, "Notification");
        self.pending.push_back(Notification { kind, message, timestamp });
        while self.pending.len() > MAX_PENDING {
            self.pending.pop_front();
        }
    }

    /// Hand every pending notification to the caller, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
