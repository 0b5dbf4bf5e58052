//! Summary statistics over a user's progress.

use serde::{Deserialize, Serialize};

use crate::types::UserProgress;

/// Default daily XP goal.
pub const DEFAULT_DAILY_GOAL: u64 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub xp: u64,
    pub streak: u32,
    pub total_stars: u32,
    pub completed_lessons: usize,
    pub total_lessons: usize,
    /// Fraction of the catalogue completed, 0.0 to 1.0.
    pub progress_fraction: f64,
    /// Mean score over completed lessons, in percent.
    pub average_score: f64,
    pub total_attempts: u32,
    pub perfect_lessons: usize,
    pub daily_goal: DailyGoal,
}

/// Progress towards the rolling XP goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoal {
    pub goal: u64,
    pub earned: u64,
    pub remaining: u64,
}

impl DailyGoal {
    pub fn new(xp: u64, goal: u64) -> Self {
        let goal = goal.max(1);
        let earned = xp % goal;
        Self {
            goal,
            earned,
            remaining: goal - earned,
        }
    }
}

/// Compute statistics for `progress` against a catalogue of `total_lessons`.
pub fn compute(progress: Option<&UserProgress>, total_lessons: usize, daily_goal: u64) -> ProgressStats {
    let Some(progress) = progress else {
        return ProgressStats {
            xp: 0,
            streak: 0,
            total_stars: 0,
            completed_lessons: 0,
            total_lessons,
            progress_fraction: 0.0,
            average_score: 0.0,
            total_attempts: 0,
            perfect_lessons: 0,
            daily_goal: DailyGoal::new(0, daily_goal),
        };
    };

    let summaries = progress.lesson_progress.values();
    let completed_lessons = progress.completed_lesson_ids.len();
    let progress_fraction = if total_lessons > 0 {
        completed_lessons as f64 / total_lessons as f64
    } else {
        0.0
    };

    let completed_scores: Vec<f64> = summaries
        .clone()
        .filter(|p| p.completed)
        .map(|p| p.score)
        .collect();
    let average_score = if completed_scores.is_empty() {
        0.0
    } else {
        completed_scores.iter().sum::<f64>() / completed_scores.len() as f64
    };

    ProgressStats {
        xp: progress.xp,
        streak: progress.streak,
        total_stars: summaries.clone().map(|p| u32::from(p.stars)).sum(),
        completed_lessons,
        total_lessons,
        progress_fraction,
        average_score,
        total_attempts: summaries.clone().map(|p| p.attempts).sum(),
        perfect_lessons: summaries.filter(|p| p.stars == 3).count(),
        daily_goal: DailyGoal::new(progress.xp, daily_goal),
    }
}
