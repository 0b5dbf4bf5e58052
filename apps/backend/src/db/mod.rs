//! Persistence interfaces and their implementations.
//!
//! Handlers only see the repository traits; the server picks PostgreSQL or
//! the in-memory store at startup.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Lesson, LessonResult, Unit, UserProgress};

pub use memory::MemoryStore;
pub use postgres::Database;

/// Read access to the lesson catalogue.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// All units in display order, each with its lessons in order
    async fn list_units(&self) -> Result<Vec<Unit>>;

    async fn get_lesson(&self, lesson_id: &str) -> Result<Option<Lesson>>;

    /// Insert or replace a unit and all of its lessons
    async fn upsert_unit(&self, unit: &Unit) -> Result<()>;
}

/// Per-user progress and the append-only result log.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn load_progress(&self, user_id: &str) -> Result<Option<UserProgress>>;

    async fn save_progress(&self, progress: &UserProgress) -> Result<()>;

    /// Append a result record; records are never updated
    async fn append_result(&self, result: &LessonResult) -> Result<()>;

    /// A user's results, oldest first
    async fn list_results(&self, user_id: &str) -> Result<Vec<LessonResult>>;

    /// Append a result and save the progress it produced as one write
    async fn save_completion(&self, result: &LessonResult, progress: &UserProgress) -> Result<()>;
}

/// Everything the server needs from persistence.
pub trait Store: LessonRepository + ProgressRepository {}

impl<T: LessonRepository + ProgressRepository> Store for T {}
