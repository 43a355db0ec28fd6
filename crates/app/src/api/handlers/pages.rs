//! Server-rendered lesson pages and their form actions.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use learn_core::model::{LessonId, ModuleOutline};
use learn_core::navigation;
use ui::vm::{LessonViewState, SidebarVm, build_sidebar, lesson_href};
use ui::{LessonScreen, PageBody, load_lesson_screen, render_page};

use crate::api::ApiState;

async fn sidebar(state: &ApiState, modules: &[ModuleOutline], active: Option<LessonId>) -> SidebarVm {
    let progress = state.services.progress();
    let tracker = progress.read().await;
    let completed = tracker.is_loaded().then(|| tracker.completed());
    build_sidebar(modules, completed, active)
}

async fn error_page(state: &ApiState, status: StatusCode, body: LessonViewState) -> Response {
    let sidebar = match state.services.content().list_modules().await {
        Ok(modules) => sidebar(state, &modules, None).await,
        Err(_) => SidebarVm::unavailable(),
    };
    (status, Html(render_page(sidebar, PageBody::Lesson(body)))).into_response()
}

async fn not_found_page(state: &ApiState) -> Response {
    error_page(state, StatusCode::NOT_FOUND, LessonViewState::NotFound).await
}

async fn save_failed_page(state: &ApiState) -> Response {
    error_page(
        state,
        StatusCode::INTERNAL_SERVER_ERROR,
        LessonViewState::Failed("Failed to save progress".to_owned()),
    )
    .await
}

pub async fn root() -> Redirect {
    Redirect::to("/learn")
}

/// Send the learner to the first lesson, or show an empty curriculum page.
pub async fn learn(State(state): State<Arc<ApiState>>) -> Response {
    let modules = match state.services.content().list_modules().await {
        Ok(modules) => modules,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_page(
                    SidebarVm::unavailable(),
                    PageBody::Lesson(LessonViewState::Failed(
                        "Failed to fetch modules".to_owned(),
                    )),
                )),
            )
                .into_response();
        }
    };

    if let Some(first) = navigation::first_lesson(&modules) {
        return Redirect::to(&lesson_href(first.id)).into_response();
    }

    let sidebar = sidebar(&state, &modules, None).await;
    Html(render_page(sidebar, PageBody::EmptyCurriculum)).into_response()
}

pub async fn lesson(
    State(state): State<Arc<ApiState>>,
    Path(raw_id): Path<String>,
) -> Response {
    let Ok(id) = raw_id.parse::<LessonId>() else {
        return not_found_page(&state).await;
    };

    let LessonScreen { view, sidebar } = load_lesson_screen(&state.services, id).await;
    let page = view.state();
    let status = match &page {
        LessonViewState::NotFound => StatusCode::NOT_FOUND,
        LessonViewState::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        LessonViewState::Loading | LessonViewState::Ready(_) => StatusCode::OK,
    };
    (status, Html(render_page(sidebar, PageBody::Lesson(page)))).into_response()
}

/// Only lessons that exist can be completed, as with the JSON API.
pub async fn complete_lesson(
    State(state): State<Arc<ApiState>>,
    Path(raw_id): Path<String>,
) -> Response {
    let Ok(id) = raw_id.parse::<LessonId>() else {
        return not_found_page(&state).await;
    };

    match state.services.content().get_lesson(id).await {
        Ok(_) => {}
        Err(e) if e.is_not_found() => return not_found_page(&state).await,
        Err(_) => {
            return error_page(
                &state,
                StatusCode::INTERNAL_SERVER_ERROR,
                LessonViewState::Failed("Failed to fetch lesson".to_owned()),
            )
            .await;
        }
    }

    let result = state.services.progress().write().await.mark_complete(id).await;
    match result {
        Ok(_) => Redirect::to(&lesson_href(id)).into_response(),
        Err(e) => {
            tracing::error!(lesson_id = %id, error = %e, "failed to save progress");
            save_failed_page(&state).await
        }
    }
}

pub async fn incomplete_lesson(
    State(state): State<Arc<ApiState>>,
    Path(raw_id): Path<String>,
) -> Response {
    let Ok(id) = raw_id.parse::<LessonId>() else {
        return not_found_page(&state).await;
    };

    let result = state.services.progress().write().await.mark_incomplete(id).await;
    match result {
        Ok(_) => Redirect::to(&lesson_href(id)).into_response(),
        Err(e) => {
            tracing::error!(lesson_id = %id, error = %e, "failed to save progress");
            save_failed_page(&state).await
        }
    }
}

pub async fn reset_progress(State(state): State<Arc<ApiState>>) -> Response {
    let result = state.services.progress().write().await.reset().await;
    match result {
        Ok(()) => Redirect::to("/learn").into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to reset progress");
            save_failed_page(&state).await
        }
    }
}
