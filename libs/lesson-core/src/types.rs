//! Core types for the lesson engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Question kind.
///
/// Only `MultipleChoice`, `TrueFalse`, `FillBlank` and `Explanation` are
/// evaluated. The remaining declared kinds are carried through but cannot be
/// graded, and anything unrecognised deserializes to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    FillBlank,
    MatchPairs,
    Translate,
    Speak,
    Listen,
    Explanation,
    #[serde(other)]
    Unknown,
}

impl QuestionType {
    /// Whether answers to this kind count towards a lesson score.
    pub fn is_gradable(self) -> bool {
        matches!(self, Self::MultipleChoice | Self::TrueFalse | Self::FillBlank)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple-choice",
            Self::TrueFalse => "true-false",
            Self::FillBlank => "fill-blank",
            Self::MatchPairs => "match-pairs",
            Self::Translate => "translate",
            Self::Speak => "speak",
            Self::Listen => "listen",
            Self::Explanation => "explanation",
            Self::Unknown => "unknown",
        }
    }
}

/// Accepted answers, stored either as a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AcceptedAnswers {
    One(String),
    Many(Vec<String>),
}

impl AcceptedAnswers {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::One(answer) => std::slice::from_ref(answer),
            Self::Many(answers) => answers,
        };
        slice.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(_) => false,
            Self::Many(answers) => answers.is_empty(),
        }
    }
}

impl Default for AcceptedAnswers {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

/// Vocabulary entry shown on explanation screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyWord {
    pub kannada: String,
    pub english: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
}

/// A single question inside a lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// Prompt text.
    pub question: String,
    /// Romanised readings of Kannada words in the prompt.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub question_transliteration: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<AcceptedAnswers>,
    /// Romanised form accepted for fill-blank questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer_transliteration: Option<String>,
    #[serde(default)]
    pub xp: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options_transliteration: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<VocabularyWord>,
}

impl Question {
    /// Canonical accepted answers, without the transliteration.
    pub fn accepted_answers(&self) -> impl Iterator<Item = &str> {
        self.correct_answer.iter().flat_map(AcceptedAnswers::iter)
    }
}

/// Lesson difficulty label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}

/// An ordered set of questions with a declared XP reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub unit_id: String,
    /// Position within the unit; `0` is the entry lesson.
    pub order: u32,
    pub xp_reward: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub required_previous_lessons: Vec<String>,
    pub questions: Vec<Question>,
}

impl Lesson {
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

/// A group of lessons shown together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub order: u32,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// Outcome of evaluating one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub correct: bool,
    pub is_fuzzy_match: bool,
}

impl Verdict {
    pub const CORRECT: Self = Self {
        correct: true,
        is_fuzzy_match: false,
    };
    pub const INCORRECT: Self = Self {
        correct: false,
        is_fuzzy_match: false,
    };
    pub const TYPO: Self = Self {
        correct: true,
        is_fuzzy_match: true,
    };
}

/// A judged answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub user_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub is_fuzzy_match: bool,
    pub time_spent_ms: u64,
}

/// Append-only record of one finished lesson attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonResult {
    pub id: Uuid,
    pub lesson_id: String,
    pub user_id: String,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub xp_earned: u32,
    pub stars: u8,
    /// Percentage of correct answers, 0.0 to 100.0.
    pub score: f64,
    pub completed_at: DateTime<Utc>,
    pub time_spent_ms: u64,
}

/// Latest known outcome for one lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonProgress {
    pub lesson_id: String,
    pub completed: bool,
    pub score: f64,
    pub attempts: u32,
    pub stars: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Cumulative per-user progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_lesson_id: Option<String>,
    /// Completed lesson ids in first-completion order, without duplicates.
    pub completed_lesson_ids: Vec<String>,
    pub xp: u64,
    pub streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lesson_progress: HashMap<String, LessonProgress>,
}

impl UserProgress {
    /// Empty progress for a user who has not completed anything yet.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            current_lesson_id: None,
            completed_lesson_ids: Vec::new(),
            xp: 0,
            streak: 0,
            last_activity_date: None,
            lesson_progress: HashMap::new(),
        }
    }

    pub fn has_completed(&self, lesson_id: &str) -> bool {
        self.completed_lesson_ids.iter().any(|id| id == lesson_id)
    }
}

/// Availability of a lesson for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
    Locked,
    Available,
    Completed,
}
