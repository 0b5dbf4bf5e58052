//! Error types for lesson-core.
//!
//! These are configuration errors in lesson content. They are distinct from
//! an incorrect answer and must not be graded as one.

use thiserror::Error;

/// Errors raised while evaluating a single answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("question {question_id} has an unknown type")]
    UnknownQuestionType { question_id: String },

    #[error("question {question_id} of type {kind} cannot be graded")]
    UngradedQuestionType {
        question_id: String,
        kind: &'static str,
    },

    #[error("question {question_id} has no accepted answers")]
    NoAcceptedAnswers { question_id: String },
}

/// Errors raised while scoring a finished lesson.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("lesson {lesson_id} has no questions")]
    EmptyLesson { lesson_id: String },

    #[error("lesson {lesson_id} has no gradable questions")]
    NoGradableQuestions { lesson_id: String },

    #[error("answer for question {question_id} is not part of lesson {lesson_id}")]
    UnknownQuestion {
        lesson_id: String,
        question_id: String,
    },

    #[error("lesson {lesson_id} expects {expected} answers, got {actual}")]
    IncompleteAttempt {
        lesson_id: String,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// Result type alias using ScoringError.
pub type Result<T> = std::result::Result<T, ScoringError>;
