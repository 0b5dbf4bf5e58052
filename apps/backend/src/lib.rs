pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::{Database, MemoryStore, Store};
use crate::services::catalog;
use crate::services::progress::UserLocks;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub locks: Arc<UserLocks>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            locks: Arc::new(UserLocks::new()),
            config: Arc::new(config),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Catalogue routes
        .route("/api/units", get(routes::lessons::units))
        .route("/api/lessons/:id", get(routes::lessons::get))
        .route("/api/lessons/:id/evaluate", post(routes::lessons::evaluate_answer))
        .route("/api/lessons/:id/complete", post(routes::lessons::complete))
        // Progress routes
        .route("/api/progress", get(routes::progress::get))
        .route("/api/progress/stats", get(routes::progress::stats))
        .route("/api/progress/results", get(routes::progress::results))
        .layer(middleware::from_fn(routes::auth::auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(database_url).await?;

            tracing::info!("Running migrations...");
            db.run_migrations().await?;
            Arc::new(db)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store with bundled catalogue");
            Arc::new(MemoryStore::with_units(catalog::bundled()?))
        }
    };

    let addr = config.bind_addr();
    let app = router(AppState::new(store, config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
