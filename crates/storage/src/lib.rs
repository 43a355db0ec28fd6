#![forbid(unsafe_code)]

pub mod local;
pub mod repository;
pub mod seed;
pub mod sqlite;

pub use local::LocalProgressStore;
pub use repository::{ContentRepository, InMemoryRepository, ProgressStore, Storage, StorageError};
