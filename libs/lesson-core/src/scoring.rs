//! Lesson scoring: percentage, stars and XP.
//!
//! Stars and XP are computed from the exact ratio `correct / total` in integer
//! arithmetic, which matches `floor(xp_reward * score_percent / 100)` without
//! floating point drift at the thresholds.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use uuid::Uuid;

use crate::error::{Result, ScoringError};
use crate::matching::{check_question, evaluate};
use crate::types::{Answer, Lesson, LessonResult};

/// Star thresholds in percent, highest first.
const STAR_THRESHOLDS: [(u64, u8); 3] = [(90, 3), (70, 2), (50, 1)];

/// Score of a finished attempt, before it becomes a [`LessonResult`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LessonScore {
    pub total_questions: u32,
    pub correct_answers: u32,
    pub score_percent: f64,
    pub stars: u8,
    pub xp_earned: u32,
}

/// Score `correct` out of `total` for a lesson worth `xp_reward`.
///
/// Callers must guarantee `total > 0`.
pub fn score(correct: u32, total: u32, xp_reward: u32) -> LessonScore {
    debug_assert!(total > 0);
    LessonScore {
        total_questions: total,
        correct_answers: correct,
        score_percent: score_percent(correct, total),
        stars: stars_for(correct, total),
        xp_earned: xp_for(correct, total, xp_reward),
    }
}

pub fn score_percent(correct: u32, total: u32) -> f64 {
    100.0 * f64::from(correct) / f64::from(total)
}

/// Star rating for `correct / total`.
pub fn stars_for(correct: u32, total: u32) -> u8 {
    let scaled = 100 * u64::from(correct);
    STAR_THRESHOLDS
        .iter()
        .find(|(threshold, _)| scaled >= threshold * u64::from(total))
        .map(|(_, stars)| *stars)
        .unwrap_or(0)
}

/// XP earned, truncated towards zero.
pub fn xp_for(correct: u32, total: u32, xp_reward: u32) -> u32 {
    let earned = u64::from(xp_reward) * u64::from(correct) / u64::from(total);
    // correct <= total keeps this within xp_reward
    u32::try_from(earned).unwrap_or(xp_reward)
}

/// Check that a lesson can be scored at all and that every question in it
/// can be judged.
pub fn validate_lesson(lesson: &Lesson) -> Result<()> {
    if lesson.questions.is_empty() {
        return Err(ScoringError::EmptyLesson {
            lesson_id: lesson.id.clone(),
        });
    }
    for question in &lesson.questions {
        check_question(question)?;
    }
    if !lesson.questions.iter().any(|q| q.kind.is_gradable()) {
        return Err(ScoringError::NoGradableQuestions {
            lesson_id: lesson.id.clone(),
        });
    }
    Ok(())
}

/// Judge every submitted answer of an attempt.
///
/// Each question of the lesson must be answered exactly once; a partial
/// attempt is rejected so that it never reaches the progress fold.
pub fn judge_attempt<'a, I>(lesson: &Lesson, submissions: I) -> Result<Vec<Answer>>
where
    I: IntoIterator<Item = (&'a str, &'a str, u64)>,
{
    validate_lesson(lesson)?;

    let mut seen = HashSet::new();
    let mut answers = Vec::with_capacity(lesson.questions.len());
    for (question_id, user_answer, time_spent_ms) in submissions {
        let question = lesson
            .question(question_id)
            .ok_or_else(|| ScoringError::UnknownQuestion {
                lesson_id: lesson.id.clone(),
                question_id: question_id.to_string(),
            })?;
        if !seen.insert(question_id) {
            continue;
        }
        let verdict = evaluate(question, user_answer)?;
        answers.push(Answer {
            question_id: question_id.to_string(),
            user_answer: user_answer.to_string(),
            is_correct: verdict.correct,
            is_fuzzy_match: verdict.is_fuzzy_match,
            time_spent_ms,
        });
    }

    if answers.len() != lesson.questions.len() {
        return Err(ScoringError::IncompleteAttempt {
            lesson_id: lesson.id.clone(),
            expected: lesson.questions.len(),
            actual: answers.len(),
        });
    }
    Ok(answers)
}

/// Reduce judged answers of a finished attempt into a write-once result.
///
/// `answers` must hold exactly one answer per question of `lesson`; the total
/// is always the lesson's question count.
pub fn finalize_lesson(
    lesson: &Lesson,
    user_id: &str,
    answers: &[Answer],
    completed_at: DateTime<Utc>,
    time_spent_ms: u64,
) -> Result<LessonResult> {
    validate_lesson(lesson)?;

    let mut answered = HashSet::new();
    for answer in answers {
        if lesson.question(&answer.question_id).is_none() {
            return Err(ScoringError::UnknownQuestion {
                lesson_id: lesson.id.clone(),
                question_id: answer.question_id.clone(),
            });
        }
        answered.insert(answer.question_id.as_str());
    }
    if answers.len() != lesson.questions.len() || answered.len() != answers.len() {
        return Err(ScoringError::IncompleteAttempt {
            lesson_id: lesson.id.clone(),
            expected: lesson.questions.len(),
            actual: answered.len(),
        });
    }

    let total = u32::try_from(lesson.questions.len()).unwrap_or(u32::MAX);
    let correct = u32::try_from(answers.iter().filter(|a| a.is_correct).count()).unwrap_or(total);
    let outcome = score(correct, total, lesson.xp_reward);

    Ok(LessonResult {
        id: Uuid::new_v4(),
        lesson_id: lesson.id.clone(),
        user_id: user_id.to_string(),
        total_questions: outcome.total_questions,
        correct_answers: outcome.correct_answers,
        xp_earned: outcome.xp_earned,
        stars: outcome.stars,
        score: outcome.score_percent,
        completed_at,
        time_spent_ms,
    })
}
