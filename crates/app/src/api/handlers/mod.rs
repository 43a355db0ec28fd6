//! Route handlers, one module per resource.

pub mod lessons;
pub mod modules;
pub mod pages;
pub mod progress;
pub mod status;

use axum::{Json, http::StatusCode};
use serde::Serialize;

/// JSON error body, `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

pub(crate) fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.to_owned(),
        }),
    )
}
