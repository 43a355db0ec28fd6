//! Curriculum listing.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use learn_core::model::ModuleOutline;

use super::{ApiError, api_error};
use crate::api::ApiState;

/// All modules in curriculum order, each with its lesson summaries.
pub async fn list_modules(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ModuleOutline>>, ApiError> {
    let modules = state
        .services
        .content()
        .list_modules()
        .await
        .map_err(|_| api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch modules"))?;

    Ok(Json(modules.to_vec()))
}
