//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

// Re-export shared types from lesson-core
pub use lesson_core::types::{
    Answer, Lesson, LessonProgress, LessonResult, LessonStatus, Unit, UserProgress, Verdict,
};
pub use lesson_core::{ProgressStats, StreakUpdate};

// === Database Entity Types ===

/// Unit row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbUnit {
    pub id: String,
    pub title: String,
    pub description: String,
    pub sort_order: i32,
    pub color: String,
}

impl DbUnit {
    pub fn from_unit(unit: &Unit) -> Self {
        Self {
            id: unit.id.clone(),
            title: unit.title.clone(),
            description: unit.description.clone(),
            sort_order: unit.order as i32,
            color: unit.color.clone(),
        }
    }

    /// Convert to a core unit with its lessons attached
    pub fn into_unit(self, lessons: Vec<Lesson>) -> Unit {
        Unit {
            id: self.id,
            title: self.title,
            description: self.description,
            order: self.sort_order.max(0) as u32,
            color: self.color,
            lessons,
        }
    }
}

/// Lesson row; the lesson itself is stored as JSONB
#[derive(Debug, Clone, FromRow)]
pub struct DbLesson {
    pub unit_id: String,
    pub body: Json<Lesson>,
}

/// User progress row
#[derive(Debug, Clone, FromRow)]
pub struct DbUserProgress {
    pub user_id: String,
    pub current_lesson_id: Option<String>,
    pub completed_lesson_ids: Json<Vec<String>>,
    pub xp: i64,
    pub streak: i32,
    pub last_activity_at: Option<DateTime<Utc>>,
    pub lesson_progress: Json<HashMap<String, LessonProgress>>,
}

impl DbUserProgress {
    pub fn from_core(progress: &UserProgress) -> Self {
        Self {
            user_id: progress.user_id.clone(),
            current_lesson_id: progress.current_lesson_id.clone(),
            completed_lesson_ids: Json(progress.completed_lesson_ids.clone()),
            xp: i64::try_from(progress.xp).unwrap_or(i64::MAX),
            streak: i32::try_from(progress.streak).unwrap_or(i32::MAX),
            last_activity_at: progress.last_activity_date,
            lesson_progress: Json(progress.lesson_progress.clone()),
        }
    }

    pub fn into_core(self) -> UserProgress {
        UserProgress {
            user_id: self.user_id,
            current_lesson_id: self.current_lesson_id,
            completed_lesson_ids: self.completed_lesson_ids.0,
            xp: self.xp.max(0) as u64,
            streak: self.streak.max(0) as u32,
            last_activity_date: self.last_activity_at,
            lesson_progress: self.lesson_progress.0,
        }
    }
}

/// Lesson result row (append-only)
#[derive(Debug, Clone, FromRow)]
pub struct DbLessonResult {
    pub id: Uuid,
    pub user_id: String,
    pub lesson_id: String,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub xp_earned: i32,
    pub stars: i16,
    pub score: f64,
    pub completed_at: DateTime<Utc>,
    pub time_spent_ms: i64,
}

impl DbLessonResult {
    pub fn from_core(result: &LessonResult) -> Self {
        Self {
            id: result.id,
            user_id: result.user_id.clone(),
            lesson_id: result.lesson_id.clone(),
            total_questions: result.total_questions as i32,
            correct_answers: result.correct_answers as i32,
            xp_earned: result.xp_earned as i32,
            stars: i16::from(result.stars),
            score: result.score,
            completed_at: result.completed_at,
            time_spent_ms: i64::try_from(result.time_spent_ms).unwrap_or(i64::MAX),
        }
    }

    pub fn into_core(self) -> LessonResult {
        LessonResult {
            id: self.id,
            lesson_id: self.lesson_id,
            user_id: self.user_id,
            total_questions: self.total_questions.max(0) as u32,
            correct_answers: self.correct_answers.max(0) as u32,
            xp_earned: self.xp_earned.max(0) as u32,
            stars: self.stars.clamp(0, 3) as u8,
            score: self.score,
            completed_at: self.completed_at,
            time_spent_ms: self.time_spent_ms.max(0) as u64,
        }
    }
}

// === API Request/Response Types ===

/// A lesson as listed in the catalogue, with the caller's status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub order: u32,
    pub xp_reward: u32,
    pub question_count: usize,
    pub status: LessonStatus,
    /// Stars from the latest attempt, if any
    pub stars: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub order: u32,
    pub color: String,
    pub lessons: Vec<LessonSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitsResponse {
    pub units: Vec<UnitSummary>,
}

/// POST /api/lessons/:id/evaluate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateAnswerRequest {
    pub question_id: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateAnswerResponse {
    pub question_id: String,
    pub correct: bool,
    pub is_fuzzy_match: bool,
}

/// One submitted answer in a completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub time_spent_ms: u64,
}

/// POST /api/lessons/:id/complete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteLessonRequest {
    pub answers: Vec<SubmittedAnswer>,
    #[serde(default)]
    pub time_spent_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteLessonResponse {
    pub result: LessonResult,
    pub answers: Vec<Answer>,
    pub progress: UserProgress,
    pub streak: StreakUpdate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub results: Vec<LessonResult>,
}

/// GET /api/progress; `progress` is null before the first completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub progress: Option<UserProgress>,
}
