use std::path::PathBuf;
use std::sync::Arc;

use storage::local::LocalProgressStore;
use storage::repository::Storage;
use storage::seed::{SeedReport, seed_curriculum};
use tokio::sync::RwLock;

use crate::content_service::ContentService;
use crate::error::AppServicesError;
use crate::progress_tracker::ProgressTracker;

/// Progress tracker shared between request handlers.
pub type SharedProgress = Arc<RwLock<ProgressTracker>>;

/// Where completed lesson ids are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressBackend {
    /// `completedLessons.json` inside the given directory.
    Local(PathBuf),
    /// The `user_progress` table next to the curriculum.
    Sqlite,
}

/// Assembles app-facing services on top of one `Storage`.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
    content: Arc<ContentService>,
    progress: SharedProgress,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// Progress is loaded before this returns.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        backend: ProgressBackend,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let storage = match backend {
            ProgressBackend::Local(dir) => {
                tracing::info!(dir = %dir.display(), "using local progress store");
                storage.with_progress(Arc::new(LocalProgressStore::new(dir)))
            }
            ProgressBackend::Sqlite => storage,
        };
        Ok(Self::from_storage(storage).await)
    }

    /// Build services over volatile in-memory storage.
    pub async fn in_memory() -> Self {
        Self::from_storage(Storage::in_memory()).await
    }

    /// Wire services over `storage` and read stored progress.
    ///
    /// An unreadable progress store is logged; the tracker stays unloaded and
    /// retries the read on the next mutation.
    pub async fn from_storage(storage: Storage) -> Self {
        let content = Arc::new(ContentService::new(Arc::clone(&storage.content)));
        let mut tracker = ProgressTracker::new(Arc::clone(&storage.progress));
        if let Err(e) = tracker.load().await {
            tracing::error!(error = %e, "failed to read stored progress");
        }
        Self {
            storage,
            content,
            progress: Arc::new(RwLock::new(tracker)),
        }
    }

    #[must_use]
    pub fn content(&self) -> Arc<ContentService> {
        Arc::clone(&self.content)
    }

    #[must_use]
    pub fn progress(&self) -> SharedProgress {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Replace the curriculum with the starter set and wipe progress.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Seed` if clearing or inserting fails.
    pub async fn seed(&self) -> Result<SeedReport, AppServicesError> {
        let report =
            seed_curriculum(self.storage.content.as_ref(), self.storage.progress.as_ref()).await?;
        self.content.invalidate().await;
        if let Err(e) = self.progress.write().await.load().await {
            tracing::error!(error = %e, "failed to reload progress after seeding");
        }
        tracing::info!(
            module_id = %report.module_id,
            lessons = report.lesson_count(),
            "curriculum seeded"
        );
        Ok(report)
    }
}
