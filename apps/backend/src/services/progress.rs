//! Lesson completion: judge, score, fold into progress and persist.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lesson_core::{finalize_lesson, judge_attempt, record_completion, StreakUpdate};
use tokio::sync::Mutex;

use crate::db::Store;
use crate::error::{ApiError, Result};
use crate::models::{CompleteLessonRequest, CompleteLessonResponse};

/// Serialises progress read-modify-write cycles per user.
///
/// An entry lives only while some request holds or waits for that user's lock.
#[derive(Default)]
pub struct UserLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `work` while holding the lock for `user_id`.
    pub async fn with_lock<F, T>(&self, user_id: &str, work: F) -> T
    where
        F: Future<Output = T>,
    {
        let user_lock = self.acquire(user_id).await;
        let output = {
            let _guard = user_lock.lock().await;
            work.await
        };
        self.release(user_id, user_lock).await;
        output
    }

    /// Number of users that currently have a lock entry.
    pub async fn active_users(&self) -> usize {
        self.locks.lock().await.len()
    }

    async fn acquire(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(user_id.to_string()).or_default().clone()
    }

    async fn release(&self, user_id: &str, user_lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        drop(user_lock);
        if locks
            .get(user_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(user_id);
        }
    }
}

/// Complete a lesson attempt for `user_id`.
///
/// The lesson is loaded fresh, every answer is re-judged server side, and the
/// result record and the new progress are written together.
pub async fn complete_lesson(
    store: &dyn Store,
    locks: &UserLocks,
    user_id: &str,
    lesson_id: &str,
    request: &CompleteLessonRequest,
    now: DateTime<Utc>,
) -> Result<CompleteLessonResponse> {
    let lesson = store
        .get_lesson(lesson_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Lesson {}", lesson_id)))?;

    let answers = judge_attempt(
        &lesson,
        request
            .answers
            .iter()
            .map(|a| (a.question_id.as_str(), a.answer.as_str(), a.time_spent_ms)),
    )?;
    let result = finalize_lesson(&lesson, user_id, &answers, now, request.time_spent_ms)?;

    let update = locks
        .with_lock(user_id, async {
            let prior = store.load_progress(user_id).await?;
            let update = record_completion(prior, &result, now);

            if let StreakUpdate::ClockSkew { days } = update.streak {
                tracing::warn!(
                    user_id,
                    days,
                    "Last activity is in the future; streak left unchanged"
                );
            }

            store.save_completion(&result, &update.progress).await?;
            Ok::<_, ApiError>(update)
        })
        .await?;

    tracing::info!(
        user_id,
        lesson_id,
        correct = result.correct_answers,
        total = result.total_questions,
        stars = result.stars,
        xp = result.xp_earned,
        streak = update.progress.streak,
        "Lesson completed"
    );

    Ok(CompleteLessonResponse {
        result,
        answers,
        progress: update.progress,
        streak: update.streak,
    })
}
