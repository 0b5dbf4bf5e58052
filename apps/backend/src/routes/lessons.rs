//! Lesson endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use lesson_core::evaluate;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::{catalog, progress};
use crate::AppState;

/// GET /api/units
pub async fn units(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<UnitsResponse>> {
    let units = state.store.list_units().await?;
    let progress = state.store.load_progress(&auth.user_id).await?;

    Ok(Json(UnitsResponse {
        units: catalog::unit_summaries(&units, progress.as_ref()),
    }))
}

/// GET /api/lessons/:id
pub async fn get(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
) -> Result<Json<Lesson>> {
    let lesson = state
        .store
        .get_lesson(&lesson_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Lesson {}", lesson_id)))?;

    Ok(Json(lesson))
}

/// POST /api/lessons/:id/evaluate
/// Judges a single answer without recording anything
pub async fn evaluate_answer(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    Json(payload): Json<EvaluateAnswerRequest>,
) -> Result<Json<EvaluateAnswerResponse>> {
    let lesson = state
        .store
        .get_lesson(&lesson_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Lesson {}", lesson_id)))?;

    let question = lesson.question(&payload.question_id).ok_or_else(|| {
        ApiError::NotFound(format!(
            "Question {} in lesson {}",
            payload.question_id, lesson_id
        ))
    })?;

    let verdict = evaluate(question, &payload.answer)?;

    Ok(Json(EvaluateAnswerResponse {
        question_id: payload.question_id,
        correct: verdict.correct,
        is_fuzzy_match: verdict.is_fuzzy_match,
    }))
}

/// POST /api/lessons/:id/complete
pub async fn complete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(lesson_id): Path<String>,
    Json(payload): Json<CompleteLessonRequest>,
) -> Result<Json<CompleteLessonResponse>> {
    let response = progress::complete_lesson(
        state.store.as_ref(),
        &state.locks,
        &auth.user_id,
        &lesson_id,
        &payload,
        Utc::now(),
    )
    .await?;

    Ok(Json(response))
}
