//! Device-local key/value records, the on-disk counterpart of browser local storage.
//!
//! Each key maps to one JSON file inside the store directory. Progress lives
//! under [`COMPLETED_LESSONS_KEY`] as an array of lesson id strings.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use learn_core::model::CompletionSet;

use crate::repository::{ProgressStore, StorageError};

/// Record key holding the completed lesson ids.
pub const COMPLETED_LESSONS_KEY: &str = "completedLessons";

fn io_err(e: std::io::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Progress store backed by a single JSON record in a local directory.
#[derive(Debug, Clone)]
pub struct LocalProgressStore {
    dir: PathBuf,
}

impl LocalProgressStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the progress record.
    #[must_use]
    pub fn record_path(&self) -> PathBuf {
        self.dir.join(format!("{COMPLETED_LESSONS_KEY}.json"))
    }
}

#[async_trait]
impl ProgressStore for LocalProgressStore {
    async fn load(&self) -> Result<CompletionSet, StorageError> {
        let raw = match tokio::fs::read_to_string(self.record_path()).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CompletionSet::new()),
            Err(e) => return Err(io_err(e)),
        };
        let ids: Vec<String> = serde_json::from_str(&raw).map_err(ser)?;
        CompletionSet::from_persisted(&ids).map_err(ser)
    }

    async fn save(&self, completed: &CompletionSet) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(io_err)?;
        let json = serde_json::to_string(&completed.to_persisted()).map_err(ser)?;

        // Replace via rename so readers never observe a half-written record.
        let target = self.record_path();
        let tmp = target.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &target).await.map_err(io_err)?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.record_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(e)),
        }
    }
}
