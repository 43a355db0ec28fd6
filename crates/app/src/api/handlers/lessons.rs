//! Single lesson lookup.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use learn_core::model::{Lesson, LessonId};

use super::{ApiError, api_error};
use crate::api::ApiState;

/// Full lesson with its module projection and challenges.
///
/// Ids that do not parse can never match a record and get the same 404.
pub async fn get_lesson(
    State(state): State<Arc<ApiState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Lesson>, ApiError> {
    let not_found = || api_error(StatusCode::NOT_FOUND, "Lesson not found");

    let id: LessonId = raw_id.parse().map_err(|_| not_found())?;
    match state.services.content().get_lesson(id).await {
        Ok(lesson) => Ok(Json(lesson)),
        Err(e) if e.is_not_found() => Err(not_found()),
        Err(_) => Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch lesson",
        )),
    }
}
