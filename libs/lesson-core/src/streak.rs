//! Consecutive-day activity streak.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::UserProgress;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// What a streak update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakUpdate {
    /// No earlier activity; the streak starts at 1.
    Started,
    /// Activity within the same day; the streak is unchanged.
    SameDay,
    /// Activity on the following day; the streak grew by one.
    Extended,
    /// A gap of more than a day; the streak restarted at 1.
    Reset,
    /// The last activity lies in the future. Nothing was changed.
    ClockSkew { days: i64 },
}

/// Whole days elapsed from `last` to `now`, rounded down.
pub fn days_between(last: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// Advance the streak for an activity at `now`.
pub fn update_streak(progress: &mut UserProgress, now: DateTime<Utc>) -> StreakUpdate {
    let outcome = match progress.last_activity_date {
        None => {
            progress.streak = 1;
            StreakUpdate::Started
        }
        Some(last) => match days_between(last, now) {
            days if days < 0 => return StreakUpdate::ClockSkew { days },
            0 => StreakUpdate::SameDay,
            1 => {
                progress.streak = progress.streak.saturating_add(1);
                StreakUpdate::Extended
            }
            _ => {
                progress.streak = 1;
                StreakUpdate::Reset
            }
        },
    };
    progress.last_activity_date = Some(now);
    outcome
}
