use std::sync::Arc;

use app::api::{ApiState, router};
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use learn_core::model::{ChallengeId, CompletionSet, Lesson, LessonId, ModuleId, ModuleOutline};
use serde_json::Value;
use services::AppServices;
use storage::repository::{
    ContentRepository, InMemoryRepository, NewChallengeRecord, NewLessonRecord, NewModuleRecord,
    ProgressStore, Storage, StorageError,
};
use storage::seed::seed_curriculum;
use tower::ServiceExt;

fn offline() -> StorageError {
    StorageError::Connection("database is locked".into())
}

/// Content store that fails every call.
struct OfflineContent;

#[async_trait]
impl ContentRepository for OfflineContent {
    async fn list_modules(&self) -> Result<Vec<ModuleOutline>, StorageError> {
        Err(offline())
    }

    async fn get_lesson(&self, _id: LessonId) -> Result<Option<Lesson>, StorageError> {
        Err(offline())
    }

    async fn insert_module(&self, _module: NewModuleRecord) -> Result<ModuleId, StorageError> {
        Err(offline())
    }

    async fn insert_lesson(&self, _lesson: NewLessonRecord) -> Result<LessonId, StorageError> {
        Err(offline())
    }

    async fn insert_challenge(
        &self,
        _challenge: NewChallengeRecord,
    ) -> Result<ChallengeId, StorageError> {
        Err(offline())
    }

    async fn clear_content(&self) -> Result<(), StorageError> {
        Err(offline())
    }
}

/// Progress store that can never be read; writes would succeed.
struct UnreadableProgress {
    inner: InMemoryRepository,
}

#[async_trait]
impl ProgressStore for UnreadableProgress {
    async fn load(&self) -> Result<CompletionSet, StorageError> {
        Err(offline())
    }

    async fn save(&self, completed: &CompletionSet) -> Result<(), StorageError> {
        self.inner.save(completed).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.inner.clear().await
    }
}

async fn app_over(storage: Storage) -> Router {
    router(Arc::new(ApiState::new(AppServices::from_storage(storage).await)))
}

async fn seeded() -> (Router, Vec<LessonId>) {
    let services = AppServices::in_memory().await;
    let report = services.seed().await.unwrap();
    let app = router(Arc::new(ApiState::new(services)));
    (app, report.lesson_ids)
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>, Option<String>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_owned());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec(), location)
}

async fn json(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let (status, body, _) = send(app, method, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = seeded().await;
    let (status, body) = json(&app, Method::GET, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn modules_list_nests_ordered_lessons() {
    let (app, ids) = seeded().await;
    let (status, body) = json(&app, Method::GET, "/api/modules").await;
    assert_eq!(status, StatusCode::OK);

    let modules = body.as_array().unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0]["title"], "MongoDB Fundamentals");
    let lessons: Vec<u64> = modules[0]["lessons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_u64().unwrap())
        .collect();
    let expected: Vec<u64> = ids.iter().map(|id| id.value()).collect();
    assert_eq!(lessons, expected);
}

#[tokio::test]
async fn lesson_lookup_returns_content_or_404() {
    let (app, ids) = seeded().await;

    let (status, body) = json(&app, Method::GET, &format!("/api/lessons/{}", ids[0])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Introduction to MongoDB");
    assert_eq!(body["module"]["title"], "MongoDB Fundamentals");
    assert!(body["content"].as_str().unwrap().contains('#'));

    let (status, body) = json(&app, Method::GET, "/api/lessons/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Lesson not found");

    let (status, body) = json(&app, Method::GET, "/api/lessons/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Lesson not found");
}

#[tokio::test]
async fn progress_mutations_update_stats() {
    let (app, ids) = seeded().await;

    let (status, body) = json(&app, Method::GET, "/api/progress").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isLoaded"], true);
    assert_eq!(body["totalLessons"], 3);
    assert_eq!(body["completedLessons"], 0);

    let uri = format!("/api/progress/lessons/{}", ids[0]);
    let (status, body) = json(&app, Method::PUT, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], true);
    assert_eq!(body["completedLessons"], 1);
    assert_eq!(body["completionPercentage"], 33);

    let (_, body) = json(&app, Method::PUT, &uri).await;
    assert_eq!(body["changed"], false);
    assert_eq!(body["completedLessons"], 1);

    let (status, body) = json(&app, Method::DELETE, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], true);
    assert_eq!(body["completedLessons"], 0);
}

#[tokio::test]
async fn completing_unknown_lesson_is_rejected() {
    let (app, _) = seeded().await;
    let (status, body) = json(&app, Method::PUT, "/api/progress/lessons/424242").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Lesson not found");
}

#[tokio::test]
async fn reset_clears_all_completions() {
    let (app, ids) = seeded().await;
    for id in &ids {
        json(&app, Method::PUT, &format!("/api/progress/lessons/{id}")).await;
    }
    let (_, body) = json(&app, Method::GET, "/api/progress").await;
    assert_eq!(body["completionPercentage"], 100);

    let (status, body) = json(&app, Method::DELETE, "/api/progress").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completedLessons"], 0);
    assert_eq!(body["completedLessonIds"], serde_json::json!([]));
}

#[tokio::test]
async fn root_and_learn_redirect_to_first_lesson() {
    let (app, ids) = seeded().await;

    let (status, _, location) = send(&app, Method::GET, "/").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/learn"));

    let (status, _, location) = send(&app, Method::GET, "/learn").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, Some(format!("/learn/lesson/{}", ids[0])));
}

#[tokio::test]
async fn learn_without_curriculum_renders_empty_page() {
    let app = router(Arc::new(ApiState::new(AppServices::in_memory().await)));
    let (status, body, _) = send(&app, Method::GET, "/learn").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("No lessons yet"));
}

#[tokio::test]
async fn lesson_page_renders_markdown_and_navigation() {
    let (app, ids) = seeded().await;
    let (status, body, _) = send(&app, Method::GET, &format!("/learn/lesson/{}", ids[1])).await;
    assert_eq!(status, StatusCode::OK);

    let html = String::from_utf8(body).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Documents and Collections"));
    assert!(html.contains(&format!("href=\"/learn/lesson/{}\"", ids[0])));
    assert!(html.contains(&format!("href=\"/learn/lesson/{}\"", ids[2])));
    assert!(html.contains("id=\"complete-form\""));
}

#[tokio::test]
async fn missing_lesson_page_is_404() {
    let (app, _) = seeded().await;
    for uri in ["/learn/lesson/999999", "/learn/lesson/abc"] {
        let (status, body, _) = send(&app, Method::GET, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(String::from_utf8(body).unwrap().contains("Lesson Not Found"));
    }
}

#[tokio::test]
async fn completion_form_redirects_back_and_marks_lesson() {
    let (app, ids) = seeded().await;
    let uri = format!("/learn/lesson/{}/complete", ids[0]);
    let (status, _, location) = send(&app, Method::POST, &uri).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, Some(format!("/learn/lesson/{}", ids[0])));

    let (_, body, _) = send(&app, Method::GET, &format!("/learn/lesson/{}", ids[0])).await;
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Mark as incomplete"));
    assert!(!html.contains("id=\"complete-form\""));

    let (status, _, location) = send(&app, Method::POST, "/learn/progress/reset").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/learn"));
    let (_, body) = json(&app, Method::GET, "/api/progress").await;
    assert_eq!(body["completedLessons"], 0);
}

#[tokio::test]
async fn completion_form_rejects_unknown_lesson() {
    let (app, _) = seeded().await;
    let (status, body, location) = send(&app, Method::POST, "/learn/lesson/424242/complete").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(location.is_none());
    assert!(String::from_utf8(body).unwrap().contains("Lesson Not Found"));

    let (_, body) = json(&app, Method::GET, "/api/progress").await;
    assert_eq!(body["completedLessonIds"], serde_json::json!([]));
}

#[tokio::test]
async fn content_store_fault_is_a_server_error() {
    let app = app_over(Storage {
        content: Arc::new(OfflineContent),
        progress: Arc::new(InMemoryRepository::new()),
    })
    .await;

    let (status, body) = json(&app, Method::GET, "/api/modules").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch modules");

    let (status, body) = json(&app, Method::GET, "/api/lessons/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch lesson");

    let (status, body, _) = send(&app, Method::GET, "/learn/lesson/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(String::from_utf8(body).unwrap().contains("Failed to fetch lesson"));

    let (status, _, _) = send(&app, Method::GET, "/learn").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unreadable_progress_is_never_overwritten() {
    let content = InMemoryRepository::new();
    let report = seed_curriculum(&content, &content).await.unwrap();
    let progress = Arc::new(UnreadableProgress {
        inner: InMemoryRepository::new(),
    });
    let stored: CompletionSet = report.lesson_ids[..2].iter().copied().collect();
    progress.inner.save(&stored).await.unwrap();

    let app = app_over(Storage {
        content: Arc::new(content),
        progress: progress.clone(),
    })
    .await;

    let (status, body) = json(&app, Method::GET, "/api/progress").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isLoaded"], false);

    let uri = format!("/api/progress/lessons/{}", report.lesson_ids[2]);
    let (status, body) = json(&app, Method::PUT, &uri).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to save progress");

    assert_eq!(progress.inner.load().await.unwrap(), stored);
}
