//! HTTP surface: the JSON API and the server-rendered lesson pages.

pub mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use services::AppServices;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state for API handlers.
pub struct ApiState {
    pub services: AppServices,
}

impl ApiState {
    #[must_use]
    pub fn new(services: AppServices) -> Self {
        Self { services }
    }
}

/// Build the router with all routes.
pub fn router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::status::health))
        // Content
        .route("/api/modules", get(handlers::modules::list_modules))
        .route("/api/lessons/:id", get(handlers::lessons::get_lesson))
        // Progress
        .route(
            "/api/progress",
            get(handlers::progress::get_progress).delete(handlers::progress::reset_progress),
        )
        .route(
            "/api/progress/lessons/:id",
            put(handlers::progress::mark_complete).delete(handlers::progress::mark_incomplete),
        )
        // Pages
        .route("/", get(handlers::pages::root))
        .route("/learn", get(handlers::pages::learn))
        .route("/learn/lesson/:id", get(handlers::pages::lesson))
        .route(
            "/learn/lesson/:id/complete",
            post(handlers::pages::complete_lesson),
        )
        .route(
            "/learn/lesson/:id/incomplete",
            post(handlers::pages::incomplete_lesson),
        )
        .route("/learn/progress/reset", post(handlers::pages::reset_progress))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_request(())
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        let status = response.status();
                        // Redirects after form posts are expected.
                        if status.is_client_error() || status.is_server_error() {
                            tracing::warn!(
                                status = %status,
                                latency_ms = latency.as_millis(),
                                "request failed"
                            );
                        }
                    },
                ),
        )
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(state: Arc<ApiState>, bind_addr: &str) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    tracing::info!("learn server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
