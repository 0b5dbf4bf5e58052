//! Lesson evaluation and progress scoring shared by the backend.
//!
//! Provides:
//! - Answer evaluation with typo tolerance (Levenshtein distance)
//! - Lesson scoring (percentage, stars, XP)
//! - Progress folding, streak tracking and lesson unlocking
//! - Shared types (Lesson, Question, UserProgress, etc.)

pub mod error;
pub mod matching;
pub mod progress;
pub mod scoring;
pub mod stats;
pub mod streak;
pub mod types;
pub mod unlock;

pub use error::{EvaluationError, Result, ScoringError};
pub use matching::{check_question, evaluate, levenshtein_distance, typo_tolerance, within_typo_tolerance};
pub use progress::{apply_result, record_completion, ProgressUpdate};
pub use scoring::{finalize_lesson, judge_attempt, score, validate_lesson, LessonScore};
pub use stats::{ProgressStats, DailyGoal, DEFAULT_DAILY_GOAL};
pub use streak::{days_between, update_streak, StreakUpdate};
pub use types::{
    AcceptedAnswers, Answer, Difficulty, Lesson, LessonProgress, LessonResult, LessonStatus,
    Question, QuestionType, Unit, UserProgress, Verdict, VocabularyWord,
};
pub use unlock::{is_unlocked, lesson_status};
