//! Load the lesson catalogue into PostgreSQL.
//!
//! Usage: `seed [catalog.json]`. Without a path the bundled catalogue is used.

use std::path::PathBuf;

use anyhow::Context;
use kannada_lessons_backend::config::Config;
use kannada_lessons_backend::db::{Database, LessonRepository};
use kannada_lessons_backend::services::catalog;
use lesson_core::validate_lesson;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .context("DATABASE_URL must be set to seed the catalogue")?;

    let units = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            tracing::info!("Loading catalogue from {}", path.display());
            catalog::load(&path)?
        }
        None => catalog::bundled()?,
    };

    for lesson in units.iter().flat_map(|u| &u.lessons) {
        validate_lesson(lesson).with_context(|| format!("lesson {} is not playable", lesson.id))?;
    }

    let db = Database::connect(&database_url).await?;
    db.run_migrations().await?;

    for unit in &units {
        db.upsert_unit(unit).await?;
        tracing::info!(unit_id = %unit.id, lessons = unit.lessons.len(), "Seeded unit");
    }

    tracing::info!("Seeded {} units", units.len());
    Ok(())
}
