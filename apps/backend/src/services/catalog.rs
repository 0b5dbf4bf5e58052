//! Lesson catalogue: the bundled seed data and per-user catalogue views.

use std::path::Path;

use lesson_core::lesson_status;
use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::models::{LessonSummary, Unit, UnitSummary, UserProgress};

const BUNDLED_CATALOG: &str = include_str!("../../seed/catalog.json");

#[derive(Deserialize)]
struct CatalogFile {
    units: Vec<Unit>,
}

/// Parse a catalogue document.
pub fn parse(content: &str) -> Result<Vec<Unit>> {
    let file: CatalogFile = serde_json::from_str(content)
        .map_err(|e| ApiError::BadRequest(format!("Invalid catalog: {}", e)))?;
    Ok(file.units)
}

/// The catalogue shipped with the server.
pub fn bundled() -> Result<Vec<Unit>> {
    parse(BUNDLED_CATALOG)
}

/// Read a catalogue from disk.
pub fn load(path: &Path) -> Result<Vec<Unit>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ApiError::Internal(format!("Failed to read {}: {}", path.display(), e)))?;
    parse(&content)
}

/// Units with each lesson's status for one user.
pub fn unit_summaries(units: &[Unit], progress: Option<&UserProgress>) -> Vec<UnitSummary> {
    units
        .iter()
        .map(|unit| UnitSummary {
            id: unit.id.clone(),
            title: unit.title.clone(),
            description: unit.description.clone(),
            order: unit.order,
            color: unit.color.clone(),
            lessons: unit
                .lessons
                .iter()
                .map(|lesson| LessonSummary {
                    id: lesson.id.clone(),
                    title: lesson.title.clone(),
                    description: lesson.description.clone(),
                    order: lesson.order,
                    xp_reward: lesson.xp_reward,
                    question_count: lesson.questions.len(),
                    status: lesson_status(lesson, progress),
                    stars: progress
                        .and_then(|p| p.lesson_progress.get(&lesson.id))
                        .map_or(0, |p| p.stars),
                })
                .collect(),
        })
        .collect()
}

/// Number of lessons across all units.
pub fn lesson_count(units: &[Unit]) -> usize {
    units.iter().map(|u| u.lessons.len()).sum()
}
