//! In-memory store used when no database is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{LessonRepository, ProgressRepository};
use crate::error::Result;
use crate::models::{Lesson, LessonResult, Unit, UserProgress};

#[derive(Default)]
pub struct MemoryStore {
    units: RwLock<Vec<Unit>>,
    progress: RwLock<HashMap<String, UserProgress>>,
    results: RwLock<Vec<LessonResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store preloaded with a catalogue
    pub fn with_units(units: Vec<Unit>) -> Self {
        let mut units = units;
        sort_catalogue(&mut units);
        Self {
            units: RwLock::new(units),
            ..Self::default()
        }
    }
}

fn sort_catalogue(units: &mut [Unit]) {
    units.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
    for unit in units.iter_mut() {
        unit.lessons
            .sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
    }
}

#[async_trait]
impl LessonRepository for MemoryStore {
    async fn list_units(&self) -> Result<Vec<Unit>> {
        Ok(self.units.read().await.clone())
    }

    async fn get_lesson(&self, lesson_id: &str) -> Result<Option<Lesson>> {
        let units = self.units.read().await;
        Ok(units
            .iter()
            .flat_map(|u| u.lessons.iter())
            .find(|l| l.id == lesson_id)
            .cloned())
    }

    async fn upsert_unit(&self, unit: &Unit) -> Result<()> {
        let mut units = self.units.write().await;
        // A lesson belongs to exactly one unit
        for existing in units.iter_mut() {
            existing
                .lessons
                .retain(|l| !unit.lessons.iter().any(|new| new.id == l.id));
        }
        match units.iter_mut().find(|u| u.id == unit.id) {
            Some(existing) => *existing = unit.clone(),
            None => units.push(unit.clone()),
        }
        sort_catalogue(&mut units);
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for MemoryStore {
    async fn load_progress(&self, user_id: &str) -> Result<Option<UserProgress>> {
        Ok(self.progress.read().await.get(user_id).cloned())
    }

    async fn save_progress(&self, progress: &UserProgress) -> Result<()> {
        self.progress
            .write()
            .await
            .insert(progress.user_id.clone(), progress.clone());
        Ok(())
    }

    async fn append_result(&self, result: &LessonResult) -> Result<()> {
        self.results.write().await.push(result.clone());
        Ok(())
    }

    async fn list_results(&self, user_id: &str) -> Result<Vec<LessonResult>> {
        Ok(self
            .results
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn save_completion(&self, result: &LessonResult, progress: &UserProgress) -> Result<()> {
        let mut results = self.results.write().await;
        let mut all_progress = self.progress.write().await;
        results.push(result.clone());
        all_progress.insert(progress.user_id.clone(), progress.clone());
        Ok(())
    }
}
