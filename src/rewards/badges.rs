use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
    /// Free-form tier such as "gold" or "silver"
    pub kind: String,
    pub earned_at: i64,
}

/// Earned badges, unique by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeCase {
    badges: Vec<Badge>,
}

impl BadgeCase {
    /// Add a badge unless one with the same name exists. Returns the new badge.
    pub fn award(&mut self, name: &str, kind: &str, earned_at: i64) -> Option<Badge> {
        if self.contains(name) {
            return None;
        }
        let badge = Badge {
            name: name.to_string(),
            kind: kind.to_string(),
            earned_at,
        };
        self.badges.push(badge.clone());
        Some(badge)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.badges.iter().any(|b| b.name == name)
    }

    pub fn all(&self) -> &[Badge] {
        &self.badges
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }
}
