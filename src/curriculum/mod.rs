pub mod catalog;

use std::collections::{BTreeMap, BTreeSet};
use serde::{Serialize, Deserialize};
use crate::error::ProgressError;
use catalog::ChapterDef;

/// Per-chapter progress within one learner session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterProgress {
    pub chapter_id: String,
    pub lesson_completed: bool,
    pub activities_completed: BTreeSet<String>,
    /// Latest mastery quiz percentage, 0..=100
    pub mastery_score: u8,
    /// Highest percentage over all attempts
    pub best_score: u8,
    pub attempts: u32,
    pub unlocked: bool,
}

impl ChapterProgress {
    fn new(chapter_id: &str, unlocked: bool) -> Self {
        ChapterProgress {
            chapter_id: chapter_id.to_string(),
            lesson_completed: false,
            activities_completed: BTreeSet::new(),
            mastery_score: 0,
            best_score: 0,
            attempts: 0,
            unlocked,
        }
    }

    /// True once any attempt reached the pass mark
    pub fn is_mastered(&self, pass_mark: u8) -> bool {
        self.best_score >= pass_mark
    }
}

/// Result of a mastery quiz submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryOutcome {
    pub chapter_id: String,
    pub score: u8,
    pub passed: bool,
    /// Chapter that became unlocked by this submission
    pub unlocked: Option<ChapterDef>,
}

/// Ordered chapter catalog plus the learner's progress through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curriculum {
    chapters: Vec<ChapterDef>,
    progress: BTreeMap<String, ChapterProgress>,
}

impl Curriculum {
    /// Create progress for every chapter; only the lowest `order` starts unlocked.
    pub fn new(mut chapters: Vec<ChapterDef>) -> Self {
        chapters.sort_by_key(|c| c.order);
        let first = chapters.first().map(|c| c.id.clone());
        let progress = chapters
            .iter()
            .map(|c| {
                let unlocked = first.as_deref() == Some(c.id.as_str());
                (c.id.clone(), ChapterProgress::new(&c.id, unlocked))
            })
            .collect();
        Curriculum { chapters, progress }
    }

    /// Chapters in curriculum order
    pub fn chapters(&self) -> &[ChapterDef] {
        &self.chapters
    }

    pub fn chapter(&self, chapter_id: &str) -> Option<&ChapterDef> {
        self.chapters.iter().find(|c| c.id == chapter_id)
    }

    pub fn progress(&self, chapter_id: &str) -> Option<&ChapterProgress> {
        self.progress.get(chapter_id)
    }

    /// Progress entries in curriculum order
    pub fn all_progress(&self) -> impl Iterator<Item = &ChapterProgress> {
        self.chapters.iter().filter_map(move |c| self.progress.get(&c.id))
    }

    pub fn is_unlocked(&self, chapter_id: &str) -> bool {
        self.progress.get(chapter_id).map(|p| p.unlocked).unwrap_or(false)
    }

    /// The chapter after the given one in curriculum order
    pub fn next_chapter(&self, chapter_id: &str) -> Option<&ChapterDef> {
        let index = self.chapters.iter().position(|c| c.id == chapter_id)?;
        self.chapters.get(index + 1)
    }

    /// Chapter that owns the activity, if any
    pub fn chapter_of_activity(&self, activity_id: &str) -> Option<&ChapterDef> {
        self.chapters.iter().find(|c| c.has_activity(activity_id))
    }

    fn progress_mut(&mut self, chapter_id: &str) -> Result<&mut ChapterProgress, ProgressError> {
        self.progress
            .get_mut(chapter_id)
            .ok_or_else(|| ProgressError::unknown_chapter(chapter_id))
    }

    /// Mark the chapter lesson done. Returns true the first time.
    pub fn complete_lesson(&mut self, chapter_id: &str) -> Result<bool, ProgressError> {
        let progress = self.progress_mut(chapter_id)?;
        let first_time = !progress.lesson_completed;
        progress.lesson_completed = true;
        Ok(first_time)
    }

    /// Add an activity to the chapter's completed set.
    /// Returns false when it was already there (the set is unchanged).
    pub fn complete_activity(
        &mut self,
        chapter_id: &str,
        activity_id: &str,
    ) -> Result<bool, ProgressError> {
        let chapter = self
            .chapter(chapter_id)
            .ok_or_else(|| ProgressError::unknown_chapter(chapter_id))?;
        if !chapter.has_activity(activity_id) {
            return Err(ProgressError::new(
                format!("Unknown activity '{}'", activity_id),
                "curriculum"
            ).with_context(format!("chapter: {}", chapter_id)));
        }

        let progress = self.progress_mut(chapter_id)?;
        Ok(progress.activities_completed.insert(activity_id.to_string()))
    }

    /// Store a mastery quiz score and unlock the next chapter on a pass.
    /// Scores above 100 are clamped. Unlocks are never revoked: a lower retake
    /// replaces `mastery_score` but leaves the successor open.
    pub fn record_mastery(
        &mut self,
        chapter_id: &str,
        score: u8,
        pass_mark: u8,
    ) -> Result<MasteryOutcome, ProgressError> {
        let score = score.min(100);
        let progress = self.progress_mut(chapter_id)?;
        progress.attempts += 1;
        progress.mastery_score = score;
        progress.best_score = progress.best_score.max(score);

        let passed = score >= pass_mark;
        let unlocked = if passed { self.unlock_next(chapter_id) } else { None };

        Ok(MasteryOutcome {
            chapter_id: chapter_id.to_string(),
            score,
            passed,
            unlocked,
        })
    }

    /// Unlock the successor of a chapter; None if it is the last one or already open.
    fn unlock_next(&mut self, chapter_id: &str) -> Option<ChapterDef> {
        let next = self.next_chapter(chapter_id)?.clone();
        let progress = self.progress.get_mut(&next.id)?;
        if progress.unlocked {
            return None;
        }
        progress.unlocked = true;
        tracing::info!(from = %chapter_id, chapter = %next.id, "Chapter unlocked");
        Some(next)
    }
}

impl Default for Curriculum {
    fn default() -> Self {
        Curriculum::new(catalog::default_catalog())
    }
}
