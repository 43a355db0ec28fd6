use std::sync::Arc;

use learn_core::model::{Lesson, LessonId, ModuleOutline};
use storage::repository::ContentRepository;
use tokio::sync::RwLock;

use crate::error::ContentError;

/// Read access to the curriculum.
///
/// The module list is fetched once and shared by every consumer (sidebar,
/// lesson page, dashboard, API) until `invalidate` is called or a lesson
/// lookup misses. A miss means the list may name lessons that no longer exist,
/// for example after another process reseeded the store. Failed fetches are
/// not cached.
pub struct ContentService {
    content: Arc<dyn ContentRepository>,
    modules: RwLock<Option<Arc<[ModuleOutline]>>>,
}

impl ContentService {
    #[must_use]
    pub fn new(content: Arc<dyn ContentRepository>) -> Self {
        Self {
            content,
            modules: RwLock::new(None),
        }
    }

    /// All modules in curriculum order, each with its lesson summaries.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Store` if the store fails; nothing partial is returned.
    pub async fn list_modules(&self) -> Result<Arc<[ModuleOutline]>, ContentError> {
        if let Some(cached) = self.modules.read().await.as_ref() {
            return Ok(Arc::clone(cached));
        }

        // Concurrent callers queue on the write lock and reuse the first fetch.
        let mut slot = self.modules.write().await;
        if let Some(cached) = slot.as_ref() {
            return Ok(Arc::clone(cached));
        }

        let loaded: Arc<[ModuleOutline]> = match self.content.list_modules().await {
            Ok(modules) => modules.into(),
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch modules");
                return Err(e.into());
            }
        };
        tracing::debug!(modules = loaded.len(), "module list cached");
        *slot = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Full lesson with its module projection.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NotFound` for an unknown id and
    /// `ContentError::Store` if the store fails.
    pub async fn get_lesson(&self, id: LessonId) -> Result<Lesson, ContentError> {
        match self.content.get_lesson(id).await {
            Ok(Some(lesson)) => Ok(lesson),
            Ok(None) => {
                self.invalidate().await;
                Err(ContentError::NotFound(id))
            }
            Err(e) => {
                tracing::error!(lesson_id = %id, error = %e, "failed to fetch lesson");
                Err(e.into())
            }
        }
    }

    /// Drop the cached module list so the next read goes to the store.
    pub async fn invalidate(&self) {
        *self.modules.write().await = None;
    }
}
