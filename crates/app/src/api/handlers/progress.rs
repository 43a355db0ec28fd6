//! Lesson completion state.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use learn_core::model::{LessonId, ModuleOutline, ModuleProgress, ProgressStats};
use serde::Serialize;
use services::ProgressTracker;

use super::{ApiError, api_error};
use crate::api::ApiState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub is_loaded: bool,
    #[serde(flatten)]
    pub stats: ProgressStats,
    pub modules: Vec<ModuleProgress>,
}

impl ProgressResponse {
    #[must_use]
    pub fn from_tracker(tracker: &ProgressTracker, modules: &[ModuleOutline]) -> Self {
        Self {
            is_loaded: tracker.is_loaded(),
            stats: tracker.stats(modules),
            modules: tracker.module_progress(modules),
        }
    }
}

/// Result of a single-lesson mutation; `changed` is false when the lesson
/// already had the requested state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdateResponse {
    pub changed: bool,
    #[serde(flatten)]
    pub progress: ProgressResponse,
}

async fn modules(state: &ApiState) -> Result<Arc<[ModuleOutline]>, ApiError> {
    state
        .services
        .content()
        .list_modules()
        .await
        .map_err(|_| api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch modules"))
}

fn parse_lesson_id(raw: &str) -> Result<LessonId, ApiError> {
    raw.parse()
        .map_err(|_| api_error(StatusCode::NOT_FOUND, "Lesson not found"))
}

fn save_failed() -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save progress")
}

/// Overall and per-module completion.
pub async fn get_progress(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let modules = modules(&state).await?;
    let progress = state.services.progress();
    let tracker = progress.read().await;
    Ok(Json(ProgressResponse::from_tracker(&tracker, &modules)))
}

/// Mark an existing lesson complete.
pub async fn mark_complete(
    State(state): State<Arc<ApiState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProgressUpdateResponse>, ApiError> {
    let id = parse_lesson_id(&raw_id)?;
    match state.services.content().get_lesson(id).await {
        Ok(_) => {}
        Err(e) if e.is_not_found() => {
            return Err(api_error(StatusCode::NOT_FOUND, "Lesson not found"));
        }
        Err(_) => {
            return Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch lesson",
            ));
        }
    }
    let modules = modules(&state).await?;

    let progress = state.services.progress();
    let mut tracker = progress.write().await;
    let changed = tracker.mark_complete(id).await.map_err(|e| {
        tracing::error!(lesson_id = %id, error = %e, "failed to save progress");
        save_failed()
    })?;

    Ok(Json(ProgressUpdateResponse {
        changed,
        progress: ProgressResponse::from_tracker(&tracker, &modules),
    }))
}

/// Mark a lesson incomplete. Unknown ids are accepted so stale entries can be removed.
pub async fn mark_incomplete(
    State(state): State<Arc<ApiState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProgressUpdateResponse>, ApiError> {
    let id = parse_lesson_id(&raw_id)?;
    let modules = modules(&state).await?;

    let progress = state.services.progress();
    let mut tracker = progress.write().await;
    let changed = tracker.mark_incomplete(id).await.map_err(|e| {
        tracing::error!(lesson_id = %id, error = %e, "failed to save progress");
        save_failed()
    })?;

    Ok(Json(ProgressUpdateResponse {
        changed,
        progress: ProgressResponse::from_tracker(&tracker, &modules),
    }))
}

/// Forget every completion and erase the stored record.
pub async fn reset_progress(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let modules = modules(&state).await?;

    let progress = state.services.progress();
    let mut tracker = progress.write().await;
    tracker.reset().await.map_err(|e| {
        tracing::error!(error = %e, "failed to reset progress");
        save_failed()
    })?;

    Ok(Json(ProgressResponse::from_tracker(&tracker, &modules)))
}
