//! Progress endpoints

use axum::{extract::State, Extension, Json};
use lesson_core::stats;

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::catalog;
use crate::AppState;

/// GET /api/progress
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ProgressResponse>> {
    let progress = state.store.load_progress(&auth.user_id).await?;
    Ok(Json(ProgressResponse { progress }))
}

/// GET /api/progress/stats
pub async fn stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ProgressStats>> {
    let progress = state.store.load_progress(&auth.user_id).await?;
    let units = state.store.list_units().await?;

    Ok(Json(stats::compute(
        progress.as_ref(),
        catalog::lesson_count(&units),
        state.config.daily_xp_goal,
    )))
}

/// GET /api/progress/results
pub async fn results(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ResultsResponse>> {
    let results = state.store.list_results(&auth.user_id).await?;
    Ok(Json(ResultsResponse { results }))
}
