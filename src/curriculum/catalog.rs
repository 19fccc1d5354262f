use serde::{Serialize, Deserialize};
use crate::difficulty::DifficultyTier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDef {
    pub id: String,
    pub name: String,
    pub difficulty: DifficultyTier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterDef {
    pub id: String,
    pub name: String,
    /// Sort key for curriculum position; unique per catalog, gaps allowed
    pub order: u32,
    pub activities: Vec<ActivityDef>,
}

impl ChapterDef {
    pub fn has_activity(&self, activity_id: &str) -> bool {
        self.activities.iter().any(|a| a.id == activity_id)
    }
}

fn activity(id: &str, name: &str, difficulty: DifficultyTier) -> ActivityDef {
    ActivityDef {
        id: id.to_string(),
        name: name.to_string(),
        difficulty,
    }
}

fn chapter(id: &str, name: &str, order: u32, activities: Vec<ActivityDef>) -> ChapterDef {
    ChapterDef {
        id: id.to_string(),
        name: name.to_string(),
        order,
        activities,
    }
}

/// The built-in four-chapter number curriculum
pub fn default_catalog() -> Vec<ChapterDef> {
    use DifficultyTier::{Easy, Hard, Medium};

    vec![
        chapter("fractions", "Fractions", 1, vec![
            activity("equivalent-matcher", "Equivalent Fractions", Easy),
            activity("fraction-comparison", "Compare Fractions", Medium),
            activity("adding-fractions", "Adding Fractions", Hard),
            activity("number-line", "Number Line", Medium),
            activity("word-problems", "Word Problems", Hard),
        ]),
        chapter("decimals", "Decimals", 2, vec![
            activity("decimal-place-value", "Decimal Place Value", Easy),
            activity("decimal-comparison", "Compare Decimals", Medium),
            activity("decimal-operations", "Add & Subtract Decimals", Hard),
            activity("fraction-to-decimal", "Fraction to Decimal", Medium),
            activity("decimal-word-problems", "Decimal Word Problems", Hard),
        ]),
        chapter("percentages", "Percentages", 3, vec![
            activity("percent-basics", "Percentage Basics", Easy),
            activity("percent-conversions", "Convert Percentages", Medium),
            activity("find-percentage", "Find Percentages", Hard),
            activity("percent-increase-decrease", "Percent Change", Hard),
            activity("percent-word-problems", "Percentage Word Problems", Hard),
        ]),
        chapter("number-sense", "Number Sense", 4, vec![
            activity("place-value", "Place Value", Easy),
            activity("rounding", "Rounding Numbers", Medium),
            activity("estimation", "Estimation", Medium),
            activity("number-patterns", "Number Patterns", Medium),
            activity("mental-math", "Mental Math", Hard),
        ]),
    ]
}
