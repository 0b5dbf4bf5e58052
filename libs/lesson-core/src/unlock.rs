//! Lesson availability derived from progress.

use crate::types::{Lesson, LessonStatus, UserProgress};

/// Whether a lesson may be started.
///
/// The entry lesson of a unit is always open; any other lesson opens once all
/// of its prerequisites are completed.
pub fn is_unlocked(lesson: &Lesson, progress: Option<&UserProgress>) -> bool {
    if lesson.order == 0 {
        return true;
    }
    lesson
        .required_previous_lessons
        .iter()
        .all(|required| progress.is_some_and(|p| p.has_completed(required)))
}

/// Status of a lesson for a user. Completion is sticky.
pub fn lesson_status(lesson: &Lesson, progress: Option<&UserProgress>) -> LessonStatus {
    if progress.is_some_and(|p| p.has_completed(&lesson.id)) {
        LessonStatus::Completed
    } else if is_unlocked(lesson, progress) {
        LessonStatus::Available
    } else {
        LessonStatus::Locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;

    fn lesson(id: &str, order: u32, required: &[&str]) -> Lesson {
        Lesson {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            unit_id: "unit_001".to_string(),
            order,
            xp_reward: 15,
            difficulty: Difficulty::Beginner,
            required_previous_lessons: required.iter().map(|r| r.to_string()).collect(),
            questions: vec![],
        }
    }

    fn completed(ids: &[&str]) -> UserProgress {
        let mut progress = UserProgress::new("user-1");
        progress.completed_lesson_ids = ids.iter().map(|id| id.to_string()).collect();
        progress
    }

    #[test]
    fn first_lesson_is_available_without_progress() {
        assert_eq!(
            lesson_status(&lesson("lesson_001", 0, &[]), None),
            LessonStatus::Available
        );
    }

    #[test]
    fn later_lesson_is_locked_until_prerequisites_done() {
        let second = lesson("lesson_002", 1, &["lesson_001"]);
        assert_eq!(lesson_status(&second, None), LessonStatus::Locked);
        assert_eq!(
            lesson_status(&second, Some(&completed(&[]))),
            LessonStatus::Locked
        );
        assert_eq!(
            lesson_status(&second, Some(&completed(&["lesson_001"]))),
            LessonStatus::Available
        );
    }

    #[test]
    fn all_prerequisites_are_required() {
        let third = lesson("lesson_003", 2, &["lesson_001", "lesson_002"]);
        assert!(!is_unlocked(&third, Some(&completed(&["lesson_001"]))));
        assert!(is_unlocked(
            &third,
            Some(&completed(&["lesson_002", "lesson_001"]))
        ));
    }

    #[test]
    fn lesson_without_prerequisites_is_available() {
        let free = lesson("lesson_009", 4, &[]);
        assert_eq!(lesson_status(&free, None), LessonStatus::Available);
    }

    #[test]
    fn completion_is_sticky() {
        // Completed even though its prerequisite is missing.
        let second = lesson("lesson_002", 1, &["lesson_001"]);
        assert_eq!(
            lesson_status(&second, Some(&completed(&["lesson_002"]))),
            LessonStatus::Completed
        );
    }
}
