//! PostgreSQL database operations

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, types::Json, PgExecutor, PgPool};

use super::{LessonRepository, ProgressRepository};
use crate::error::Result;
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl LessonRepository for Database {
    async fn list_units(&self) -> Result<Vec<Unit>> {
        let units = sqlx::query_as::<_, DbUnit>(
            r#"
            SELECT id, title, description, sort_order, color
            FROM units
            ORDER BY sort_order, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let lessons = sqlx::query_as::<_, DbLesson>(
            r#"
            SELECT unit_id, body
            FROM lessons
            ORDER BY unit_id, sort_order, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(units
            .into_iter()
            .map(|unit| {
                let unit_lessons = lessons
                    .iter()
                    .filter(|l| l.unit_id == unit.id)
                    .map(|l| l.body.0.clone())
                    .collect();
                unit.into_unit(unit_lessons)
            })
            .collect())
    }

    async fn get_lesson(&self, lesson_id: &str) -> Result<Option<Lesson>> {
        let lesson = sqlx::query_as::<_, DbLesson>(
            r#"
            SELECT unit_id, body
            FROM lessons
            WHERE id = $1
            "#,
        )
        .bind(lesson_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lesson.map(|l| l.body.0))
    }

    async fn upsert_unit(&self, unit: &Unit) -> Result<()> {
        let row = DbUnit::from_unit(unit);
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO units (id, title, description, sort_order, color)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                sort_order = EXCLUDED.sort_order,
                color = EXCLUDED.color
            "#,
        )
        .bind(&row.id)
        .bind(&row.title)
        .bind(&row.description)
        .bind(row.sort_order)
        .bind(&row.color)
        .execute(&mut *tx)
        .await?;

        for lesson in &unit.lessons {
            sqlx::query(
                r#"
                INSERT INTO lessons (id, unit_id, sort_order, body)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id) DO UPDATE SET
                    unit_id = EXCLUDED.unit_id,
                    sort_order = EXCLUDED.sort_order,
                    body = EXCLUDED.body
                "#,
            )
            .bind(&lesson.id)
            .bind(&unit.id)
            .bind(lesson.order as i32)
            .bind(Json(lesson))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for Database {
    async fn load_progress(&self, user_id: &str) -> Result<Option<UserProgress>> {
        let progress = sqlx::query_as::<_, DbUserProgress>(
            r#"
            SELECT user_id, current_lesson_id, completed_lesson_ids, xp, streak,
                   last_activity_at, lesson_progress
            FROM user_progress
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(progress.map(DbUserProgress::into_core))
    }

    async fn save_progress(&self, progress: &UserProgress) -> Result<()> {
        upsert_progress(&self.pool, progress).await
    }

    async fn append_result(&self, result: &LessonResult) -> Result<()> {
        insert_result(&self.pool, result).await
    }

    async fn list_results(&self, user_id: &str) -> Result<Vec<LessonResult>> {
        let results = sqlx::query_as::<_, DbLessonResult>(
            r#"
            SELECT id, user_id, lesson_id, total_questions, correct_answers,
                   xp_earned, stars, score, completed_at, time_spent_ms
            FROM lesson_results
            WHERE user_id = $1
            ORDER BY completed_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(results.into_iter().map(DbLessonResult::into_core).collect())
    }

    async fn save_completion(&self, result: &LessonResult, progress: &UserProgress) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        insert_result(&mut *tx, result).await?;
        upsert_progress(&mut *tx, progress).await?;
        tx.commit().await?;
        Ok(())
    }
}

async fn upsert_progress<'e, E: PgExecutor<'e>>(executor: E, progress: &UserProgress) -> Result<()> {
    let row = DbUserProgress::from_core(progress);
    sqlx::query(
        r#"
        INSERT INTO user_progress (user_id, current_lesson_id, completed_lesson_ids, xp,
                                   streak, last_activity_at, lesson_progress, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
        ON CONFLICT (user_id) DO UPDATE SET
            current_lesson_id = EXCLUDED.current_lesson_id,
            completed_lesson_ids = EXCLUDED.completed_lesson_ids,
            xp = EXCLUDED.xp,
            streak = EXCLUDED.streak,
            last_activity_at = EXCLUDED.last_activity_at,
            lesson_progress = EXCLUDED.lesson_progress,
            updated_at = NOW()
        "#,
    )
    .bind(&row.user_id)
    .bind(&row.current_lesson_id)
    .bind(&row.completed_lesson_ids)
    .bind(row.xp)
    .bind(row.streak)
    .bind(row.last_activity_at)
    .bind(&row.lesson_progress)
    .execute(executor)
    .await?;

    Ok(())
}

async fn insert_result<'e, E: PgExecutor<'e>>(executor: E, result: &LessonResult) -> Result<()> {
    let row = DbLessonResult::from_core(result);
    sqlx::query(
        r#"
        INSERT INTO lesson_results (id, user_id, lesson_id, total_questions, correct_answers,
                                    xp_earned, stars, score, completed_at, time_spent_ms)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(row.id)
    .bind(&row.user_id)
    .bind(&row.lesson_id)
    .bind(row.total_questions)
    .bind(row.correct_answers)
    .bind(row.xp_earned)
    .bind(row.stars)
    .bind(row.score)
    .bind(row.completed_at)
    .bind(row.time_spent_ms)
    .execute(executor)
    .await?;

    Ok(())
}
