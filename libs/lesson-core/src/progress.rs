//! Folding lesson results into cumulative user progress.

use chrono::{DateTime, Utc};

use crate::streak::{update_streak, StreakUpdate};
use crate::types::{LessonProgress, LessonResult, UserProgress};

/// New progress after recording a result, plus what happened to the streak.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub progress: UserProgress,
    pub streak: StreakUpdate,
}

/// Fold one lesson result into a user's progress.
///
/// Every call counts as an attempt and adds its XP, including retakes of a
/// lesson that is already completed. The per-lesson summary always reflects
/// the most recent attempt.
pub fn apply_result(prior: Option<UserProgress>, result: &LessonResult) -> UserProgress {
    let mut progress = prior.unwrap_or_else(|| UserProgress::new(result.user_id.clone()));

    let attempts = progress
        .lesson_progress
        .get(&result.lesson_id)
        .map_or(0, |p| p.attempts)
        .saturating_add(1);

    progress.lesson_progress.insert(
        result.lesson_id.clone(),
        LessonProgress {
            lesson_id: result.lesson_id.clone(),
            completed: true,
            score: result.score,
            attempts,
            stars: result.stars,
            completed_at: Some(result.completed_at),
        },
    );

    if !progress.has_completed(&result.lesson_id) {
        progress.completed_lesson_ids.push(result.lesson_id.clone());
    }

    progress.xp = progress.xp.saturating_add(u64::from(result.xp_earned));
    progress.current_lesson_id = Some(result.lesson_id.clone());
    progress
}

/// Record a completed lesson: fold the result, then advance the streak once.
///
/// The streak is evaluated against the activity date held before this
/// completion.
pub fn record_completion(
    prior: Option<UserProgress>,
    result: &LessonResult,
    now: DateTime<Utc>,
) -> ProgressUpdate {
    let mut progress = apply_result(prior, result);
    let streak = update_streak(&mut progress, now);
    ProgressUpdate { progress, streak }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn result(lesson_id: &str, correct: u32, total: u32, xp: u32, stars: u8) -> LessonResult {
        LessonResult {
            id: Uuid::new_v4(),
            lesson_id: lesson_id.to_string(),
            user_id: "user-1".to_string(),
            total_questions: total,
            correct_answers: correct,
            xp_earned: xp,
            stars,
            score: 100.0 * f64::from(correct) / f64::from(total),
            completed_at: Utc::now(),
            time_spent_ms: 60_000,
        }
    }

    #[test]
    fn first_completion_creates_progress() {
        let progress = apply_result(None, &result("lesson_001", 4, 4, 15, 3));

        assert_eq!(progress.user_id, "user-1");
        assert_eq!(progress.completed_lesson_ids, vec!["lesson_001".to_string()]);
        assert_eq!(progress.xp, 15);
        assert_eq!(progress.current_lesson_id.as_deref(), Some("lesson_001"));
        let summary = &progress.lesson_progress["lesson_001"];
        assert!(summary.completed);
        assert_eq!(summary.attempts, 1);
        assert_eq!(summary.stars, 3);
        assert_eq!(summary.score, 100.0);
    }

    #[test]
    fn repeat_completion_keeps_set_but_adds_xp() {
        let first = apply_result(None, &result("lesson_001", 4, 4, 20, 3));
        let second = apply_result(Some(first.clone()), &result("lesson_001", 3, 4, 15, 2));

        assert_eq!(second.completed_lesson_ids.len(), first.completed_lesson_ids.len());
        assert_eq!(second.lesson_progress["lesson_001"].attempts, 2);
        // Retakes are not deduplicated: the second attempt's XP is added too.
        assert_eq!(second.xp, 35);
    }

    #[test]
    fn lesson_summary_is_last_write_wins() {
        let first = apply_result(None, &result("lesson_001", 4, 4, 20, 3));
        let second = apply_result(Some(first), &result("lesson_001", 1, 4, 5, 0));

        let summary = &second.lesson_progress["lesson_001"];
        assert_eq!(summary.stars, 0);
        assert_eq!(summary.score, 25.0);
        assert!(summary.completed);
    }

    #[test]
    fn failed_attempt_still_counts() {
        let progress = apply_result(None, &result("lesson_001", 0, 4, 0, 0));
        assert_eq!(progress.lesson_progress["lesson_001"].attempts, 1);
        assert!(progress.has_completed("lesson_001"));
        assert_eq!(progress.xp, 0);
    }

    #[test]
    fn completed_ids_keep_first_seen_order() {
        let mut progress = apply_result(None, &result("lesson_002", 4, 4, 10, 3));
        progress = apply_result(Some(progress), &result("lesson_001", 4, 4, 10, 3));
        progress = apply_result(Some(progress), &result("lesson_002", 4, 4, 10, 3));

        assert_eq!(
            progress.completed_lesson_ids,
            vec!["lesson_002".to_string(), "lesson_001".to_string()]
        );
        assert_eq!(progress.current_lesson_id.as_deref(), Some("lesson_002"));
    }

    #[test]
    fn xp_never_decreases() {
        let mut progress = None;
        let mut last_xp = 0;
        for xp in [10, 0, 3, 0, 20] {
            let next = apply_result(progress, &result("lesson_001", 1, 4, xp, 0));
            assert!(next.xp >= last_xp);
            assert_eq!(next.xp, last_xp + u64::from(xp));
            last_xp = next.xp;
            progress = Some(next);
        }
    }

    #[test]
    fn record_completion_uses_prior_activity_for_streak() {
        let now = Utc::now();
        let mut prior = apply_result(None, &result("lesson_001", 4, 4, 10, 3));
        prior.streak = 5;
        prior.last_activity_date = Some(now - Duration::days(1));

        let update = record_completion(Some(prior), &result("lesson_002", 4, 4, 10, 3), now);
        assert_eq!(update.streak, StreakUpdate::Extended);
        assert_eq!(update.progress.streak, 6);
        assert_eq!(update.progress.last_activity_date, Some(now));
    }

    #[test]
    fn record_first_completion_starts_streak() {
        let now = Utc::now();
        let update = record_completion(None, &result("lesson_001", 4, 4, 10, 3), now);
        assert_eq!(update.streak, StreakUpdate::Started);
        assert_eq!(update.progress.streak, 1);
    }
}
