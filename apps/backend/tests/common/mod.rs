//! Common test utilities and fixtures for integration tests.
//!
//! Tests run against the in-memory store seeded with the bundled catalogue,
//! so no database is required.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::http::HeaderName;
use axum::Router;
use axum_test::TestServer;
use uuid::Uuid;

use kannada_lessons_backend::config::Config;
use kannada_lessons_backend::db::{MemoryStore, ProgressRepository};
use kannada_lessons_backend::models::UserProgress;
use kannada_lessons_backend::routes::auth::USER_ID_HEADER;
use kannada_lessons_backend::services::catalog;
use kannada_lessons_backend::{router, AppState};

/// Test context holding the store and the application router.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let units = catalog::bundled().expect("bundled catalogue parses");
        let store = Arc::new(MemoryStore::with_units(units));
        let app = router(AppState::new(store.clone(), config));

        Self { store, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("test server starts")
    }

    /// A user id no other test shares.
    pub fn new_user() -> String {
        format!("user-{}", Uuid::new_v4())
    }

    pub fn user_header() -> HeaderName {
        HeaderName::from_static(USER_ID_HEADER)
    }

    pub async fn progress_of(&self, user_id: &str) -> Option<UserProgress> {
        self.store
            .load_progress(user_id)
            .await
            .expect("memory store never fails")
    }

    pub async fn put_progress(&self, progress: &UserProgress) {
        self.store
            .save_progress(progress)
            .await
            .expect("memory store never fails");
    }
}
