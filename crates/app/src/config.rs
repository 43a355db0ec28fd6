//! Runtime configuration shared by the CLI commands.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use services::ProgressBackend;
use thiserror::Error;

pub const DEFAULT_DB_URL: &str = "sqlite://dev.sqlite3";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_DATA_DIR: &str = ".learn";
pub const DEFAULT_LOG_FILTER: &str = "app=info,services=info,tower_http=info";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid --db value: {raw}")]
    InvalidDbUrl { raw: String },
    #[error("failed to prepare database file: {0}")]
    Io(#[from] std::io::Error),
}

/// Where lesson completion is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProgressMode {
    /// JSON record in the data directory, one per machine.
    Local,
    /// `user_progress` table in the curriculum database.
    Sqlite,
}

impl ProgressMode {
    #[must_use]
    pub fn backend(self, data_dir: &Path) -> ProgressBackend {
        match self {
            Self::Local => ProgressBackend::Local(data_dir.to_path_buf()),
            Self::Sqlite => ProgressBackend::Sqlite,
        }
    }
}

/// Turn relative `sqlite:` paths into absolute `sqlite://` URLs.
#[must_use]
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_owned();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Create the database file (and parent directories) so the pool can open it.
///
/// # Errors
///
/// Returns `ConfigError::InvalidDbUrl` for URLs without a file path and
/// `ConfigError::Io` if the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), ConfigError> {
    if db_url == "sqlite::memory:" || db_url.contains("mode=memory") {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ConfigError::InvalidDbUrl {
            raw: db_url.to_owned(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ConfigError::InvalidDbUrl {
            raw: db_url.to_owned(),
        });
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}
