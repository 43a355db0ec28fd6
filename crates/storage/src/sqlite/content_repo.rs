use std::collections::HashMap;

use learn_core::model::{
    ChallengeId, Lesson, LessonId, LessonSummary, ModuleId, ModuleOutline, ModuleRef,
};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{
    challenge_id_from_i64, conn, id_to_i64, insert_err, lesson_id_from_i64, map_challenge_row,
    map_lesson_summary_row, map_module_row, module_id_from_i64, order_to_i64, ser, tier_from_i64,
};
use crate::repository::{
    ContentRepository, NewChallengeRecord, NewLessonRecord, NewModuleRecord, StorageError,
};

#[async_trait::async_trait]
impl ContentRepository for SqliteRepository {
    async fn list_modules(&self) -> Result<Vec<ModuleOutline>, StorageError> {
        let module_rows = sqlx::query(
            r"
            SELECT id, title, description, tier, sort_order
            FROM modules
            ORDER BY tier ASC, sort_order ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let lesson_rows = sqlx::query(
            r"
            SELECT id, module_id, title, description, sort_order
            FROM lessons
            ORDER BY module_id ASC, sort_order ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut lessons_by_module: HashMap<ModuleId, Vec<LessonSummary>> = HashMap::new();
        for row in &lesson_rows {
            let (module_id, summary) = map_lesson_summary_row(row)?;
            lessons_by_module.entry(module_id).or_default().push(summary);
        }

        let mut outlines = Vec::with_capacity(module_rows.len());
        for row in &module_rows {
            let module = map_module_row(row)?;
            let lessons = lessons_by_module.remove(&module.id()).unwrap_or_default();
            outlines.push(ModuleOutline::new(module, lessons));
        }
        Ok(outlines)
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT l.id, l.title, l.description, l.content, l.sort_order,
                   m.id AS module_id, m.title AS module_title, m.tier AS module_tier
            FROM lessons l
            JOIN modules m ON m.id = l.module_id
            WHERE l.id = ?1
            ",
        )
        .bind(id_to_i64(id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let challenge_rows = sqlx::query(
            r"
            SELECT id, title, instructions, sort_order
            FROM challenges
            WHERE lesson_id = ?1
            ORDER BY sort_order ASC, id ASC
            ",
        )
        .bind(id_to_i64(id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let challenges = challenge_rows
            .iter()
            .map(map_challenge_row)
            .collect::<Result<Vec<_>, _>>()?;

        let module = ModuleRef {
            id: module_id_from_i64(row.try_get::<i64, _>("module_id").map_err(ser)?)?,
            title: row.try_get::<String, _>("module_title").map_err(ser)?,
            tier: tier_from_i64(row.try_get::<i64, _>("module_tier").map_err(ser)?)?,
        };
        let order = i32::try_from(row.try_get::<i64, _>("sort_order").map_err(ser)?)
            .map_err(|_| StorageError::Serialization("sort_order overflow".into()))?;

        Lesson::new(
            lesson_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
            row.try_get::<String, _>("title").map_err(ser)?,
            row.try_get::<Option<String>, _>("description").map_err(ser)?,
            row.try_get::<String, _>("content").map_err(ser)?,
            order,
            module,
            challenges,
        )
        .map(Some)
        .map_err(ser)
    }

    async fn insert_module(&self, module: NewModuleRecord) -> Result<ModuleId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO modules (title, description, tier, sort_order)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(module.title)
        .bind(module.description)
        .bind(i64::from(module.tier))
        .bind(order_to_i64(module.order))
        .execute(&self.pool)
        .await
        .map_err(insert_err)?;

        module_id_from_i64(res.last_insert_rowid())
    }

    async fn insert_lesson(&self, lesson: NewLessonRecord) -> Result<LessonId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO lessons (module_id, title, description, content, sort_order)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(id_to_i64(lesson.module_id.value())?)
        .bind(lesson.title)
        .bind(lesson.description)
        .bind(lesson.content)
        .bind(order_to_i64(lesson.order))
        .execute(&self.pool)
        .await
        .map_err(insert_err)?;

        lesson_id_from_i64(res.last_insert_rowid())
    }

    async fn insert_challenge(
        &self,
        challenge: NewChallengeRecord,
    ) -> Result<ChallengeId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO challenges (lesson_id, title, instructions, sort_order)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(id_to_i64(challenge.lesson_id.value())?)
        .bind(challenge.title)
        .bind(challenge.instructions)
        .bind(order_to_i64(challenge.order))
        .execute(&self.pool)
        .await
        .map_err(insert_err)?;

        challenge_id_from_i64(res.last_insert_rowid())
    }

    async fn clear_content(&self) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;
        for statement in [
            "DELETE FROM challenges",
            "DELETE FROM lessons",
            "DELETE FROM modules",
        ] {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(conn)?;
        }
        tx.commit().await.map_err(conn)?;
        Ok(())
    }
}
