use std::sync::Arc;

use learn_core::model::{CompletionSet, LessonId, ModuleOutline, ModuleProgress, ProgressStats};
use storage::repository::{ProgressStore, StorageError};

use crate::error::ProgressError;

/// Tracks which lessons are completed and persists every change immediately.
///
/// The tracker starts unloaded. `is_loaded` separates "not read yet" from
/// "read and empty" so callers never present an incomplete state before the
/// store was consulted.
pub struct ProgressTracker {
    store: Arc<dyn ProgressStore>,
    completed: CompletionSet,
    loaded: bool,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self {
            store,
            completed: CompletionSet::new(),
            loaded: false,
        }
    }

    /// Read the persisted set, replacing whatever is held in memory.
    ///
    /// A corrupt record is logged and treated as "no progress"; the tracker is
    /// still marked loaded.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` when the store cannot be read. The
    /// tracker is left unloaded so the next mutation retries the read instead
    /// of persisting over a record it never saw.
    pub async fn load(&mut self) -> Result<(), ProgressError> {
        let loaded = match self.store.load().await {
            Ok(set) => set,
            Err(StorageError::Serialization(reason)) => {
                tracing::warn!(%reason, "stored progress is corrupt, starting empty");
                CompletionSet::new()
            }
            Err(e) => {
                self.completed.clear();
                self.loaded = false;
                return Err(e.into());
            }
        };
        self.completed = loaded;
        self.loaded = true;
        tracing::debug!(completed = self.completed.len(), "progress loaded");
        Ok(())
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Add `id` and persist the whole set. Returns whether membership changed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the stored set cannot be read or the
    /// new set cannot be persisted; the in-memory state is left untouched in
    /// that case.
    pub async fn mark_complete(&mut self, id: LessonId) -> Result<bool, ProgressError> {
        self.ensure_loaded().await?;
        let mut next = self.completed.clone();
        if !next.insert(id) {
            return Ok(false);
        }
        self.commit(next).await?;
        tracing::info!(lesson_id = %id, "lesson marked complete");
        Ok(true)
    }

    /// Remove `id` and persist the whole set. Returns whether membership changed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the stored set cannot be read or the
    /// new set cannot be persisted.
    pub async fn mark_incomplete(&mut self, id: LessonId) -> Result<bool, ProgressError> {
        self.ensure_loaded().await?;
        let mut next = self.completed.clone();
        if !next.remove(id) {
            return Ok(false);
        }
        self.commit(next).await?;
        tracing::info!(lesson_id = %id, "lesson marked incomplete");
        Ok(true)
    }

    #[must_use]
    pub fn is_completed(&self, id: LessonId) -> bool {
        self.completed.contains(id)
    }

    /// Stats computed fresh from the current set.
    #[must_use]
    pub fn stats(&self, modules: &[ModuleOutline]) -> ProgressStats {
        ProgressStats::compute(&self.completed, modules)
    }

    #[must_use]
    pub fn module_progress(&self, modules: &[ModuleOutline]) -> Vec<ModuleProgress> {
        ModuleProgress::for_modules(&self.completed, modules)
    }

    /// Empty the set and erase the persisted record.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the record cannot be removed.
    pub async fn reset(&mut self) -> Result<(), ProgressError> {
        self.store.clear().await?;
        self.completed.clear();
        self.loaded = true;
        tracing::info!("progress reset");
        Ok(())
    }

    #[must_use]
    pub fn completed(&self) -> &CompletionSet {
        &self.completed
    }

    async fn ensure_loaded(&mut self) -> Result<(), ProgressError> {
        if !self.loaded {
            self.load().await?;
        }
        Ok(())
    }

    async fn commit(&mut self, next: CompletionSet) -> Result<(), ProgressError> {
        self.store.save(&next).await?;
        self.completed = next;
        Ok(())
    }
}
