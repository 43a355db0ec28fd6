use std::collections::BTreeSet;

use chrono::Utc;
use learn_core::model::CompletionSet;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{conn, ser};
use crate::repository::{ProgressStore, StorageError};

#[async_trait::async_trait]
impl ProgressStore for SqliteRepository {
    async fn load(&self) -> Result<CompletionSet, StorageError> {
        let rows = sqlx::query("SELECT lesson_id FROM user_progress")
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        let raw = rows
            .iter()
            .map(|row| row.try_get::<String, _>("lesson_id").map_err(ser))
            .collect::<Result<Vec<_>, _>>()?;
        CompletionSet::from_persisted(&raw).map_err(ser)
    }

    async fn save(&self, completed: &CompletionSet) -> Result<(), StorageError> {
        let wanted: BTreeSet<String> = completed.to_persisted().into_iter().collect();
        let mut tx = self.pool.begin().await.map_err(conn)?;

        let existing: Vec<String> = sqlx::query("SELECT lesson_id FROM user_progress")
            .fetch_all(&mut *tx)
            .await
            .map_err(conn)?
            .iter()
            .map(|row| row.try_get::<String, _>("lesson_id").map_err(ser))
            .collect::<Result<_, _>>()?;

        for stale in existing.iter().filter(|id| !wanted.contains(*id)) {
            sqlx::query("DELETE FROM user_progress WHERE lesson_id = ?1")
                .bind(stale)
                .execute(&mut *tx)
                .await
                .map_err(conn)?;
        }

        // Existing rows keep their original completion time.
        let now = Utc::now();
        for id in &wanted {
            sqlx::query(
                r"
                INSERT INTO user_progress (lesson_id, completed_at)
                VALUES (?1, ?2)
                ON CONFLICT(lesson_id) DO NOTHING
                ",
            )
            .bind(id)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM user_progress")
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}
