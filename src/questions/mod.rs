use serde::{Serialize, Deserialize};
use rand::seq::SliceRandom;
use rand::thread_rng;
use crate::difficulty::DifficultyTier;
use crate::ledger::AnswerEvent;
use crate::ledger::grading::answers_match;

/// How many trailing answers the fallback bank looks at
const RECENT_LOOKBACK: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
    pub hint: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Question {
    pub fn is_correct(&self, answer: &str) -> bool {
        answers_match(answer, &self.correct_answer)
    }
}

/// Supplies the next question for a tier given the learner's recent answers.
pub trait QuestionSource {
    fn next_question(&self, tier: DifficultyTier, recent: &[AnswerEvent]) -> Option<Question>;
}

/// Built-in question bank used when no generator is available.
#[derive(Debug, Clone)]
pub struct FallbackBank {
    basic: Vec<Question>,
    intermediate: Vec<Question>,
}

fn question(text: &str, kind: &str, answer: &str, hint: &str) -> Question {
    Question {
        question: text.to_string(),
        kind: kind.to_string(),
        correct_answer: answer.to_string(),
        hint: hint.to_string(),
        options: Vec::new(),
    }
}

impl FallbackBank {
    pub fn new(basic: Vec<Question>, intermediate: Vec<Question>) -> Self {
        FallbackBank { basic, intermediate }
    }

    fn pool(&self, tier: DifficultyTier, recent: &[AnswerEvent]) -> &[Question] {
        let start = recent.len().saturating_sub(RECENT_LOOKBACK);
        let tail = &recent[start..];
        let struggling = tail.len() == RECENT_LOOKBACK && tail.iter().all(|e| !e.correct);

        match tier {
            DifficultyTier::Easy => &self.basic,
            _ if struggling => &self.basic,
            _ => &self.intermediate,
        }
    }
}

impl QuestionSource for FallbackBank {
    /// Random pick from the tier's pool; a run of wrong answers drops to the basic pool.
    fn next_question(&self, tier: DifficultyTier, recent: &[AnswerEvent]) -> Option<Question> {
        let pool = self.pool(tier, recent);
        let mut rng = thread_rng();
        pool.choose(&mut rng).cloned()
    }
}

impl Default for FallbackBank {
    fn default() -> Self {
        let basic = vec![
            question(
                "Select 3/4 of the pizza slices. Click on the slices to choose them.",
                "visual",
                "6/8",
                "3/4 means 3 out of every 4 pieces. With 8 slices total, you need 6 slices.",
            ),
            question(
                "Pick 2/3 of the cookies from the jar. Click to select them.",
                "visual",
                "8/12",
                "2/3 means 2 out of every 3 cookies. With 12 cookies, you need 8 cookies.",
            ),
            question(
                "Choose 1/2 of the books on the shelf. Select the books.",
                "visual",
                "5/10",
                "1/2 means half of the total. With 10 books, you need 5 books.",
            ),
            question(
                "Select 5/6 of the balloons. Click to pick them.",
                "visual",
                "5/6",
                "5/6 means 5 out of 6 balloons. Select 5 balloons.",
            ),
        ];
        let intermediate = vec![
            question(
                "Is 2/4 equal to 1/2?",
                "equivalent",
                "yes",
                "Simplify 2/4 by dividing both numbers by 2.",
            ),
            question(
                "Add 1/3 + 1/6",
                "operation",
                "1/2",
                "Find a common denominator. 6 is a common denominator for both.",
            ),
            question(
                "If the school gives 5/8 of playground time to sports, how much is left for recess?",
                "word_problem",
                "3/8",
                "The whole playground time is 8/8. Subtract 5/8 from 8/8.",
            ),
        ];
        FallbackBank::new(basic, intermediate)
    }
}
