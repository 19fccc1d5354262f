/// Compare a typed answer against the expected one.
/// Case-insensitive after trimming surrounding whitespace; no other normalisation.
pub fn answers_match(answer: &str, correct_answer: &str) -> bool {
    answer.trim().to_lowercase() == correct_answer.trim().to_lowercase()
}
