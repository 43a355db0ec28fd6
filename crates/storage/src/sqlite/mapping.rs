use learn_core::model::{Challenge, ChallengeId, LessonId, LessonSummary, Module, ModuleId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

/// Maps insert failures, turning foreign key violations into `NotFound`.
pub(crate) fn insert_err(e: sqlx::Error) -> StorageError {
    match e.as_database_error() {
        Some(db) if db.is_foreign_key_violation() => StorageError::NotFound,
        Some(db) if db.is_unique_violation() => StorageError::Conflict,
        _ => conn(e),
    }
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn id_to_i64(value: u64) -> Result<i64, StorageError> {
    i64::try_from(value).map_err(|_| StorageError::Serialization("id overflow".into()))
}

pub(crate) fn module_id_from_i64(v: i64) -> Result<ModuleId, StorageError> {
    Ok(ModuleId::new(i64_to_u64("module_id", v)?))
}

pub(crate) fn lesson_id_from_i64(v: i64) -> Result<LessonId, StorageError> {
    Ok(LessonId::new(i64_to_u64("lesson_id", v)?))
}

pub(crate) fn challenge_id_from_i64(v: i64) -> Result<ChallengeId, StorageError> {
    Ok(ChallengeId::new(i64_to_u64("challenge_id", v)?))
}

fn order_from_i64(v: i64) -> Result<i32, StorageError> {
    i32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid sort_order: {v}")))
}

pub(crate) fn tier_from_i64(v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid tier: {v}")))
}

pub(crate) fn map_module_row(row: &SqliteRow) -> Result<Module, StorageError> {
    Module::new(
        module_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<String, _>("description").map_err(ser)?,
        tier_from_i64(row.try_get::<i64, _>("tier").map_err(ser)?)?,
        order_from_i64(row.try_get::<i64, _>("sort_order").map_err(ser)?)?,
    )
    .map_err(ser)
}

/// Lesson summary plus the owning module id, for grouping.
pub(crate) fn map_lesson_summary_row(
    row: &SqliteRow,
) -> Result<(ModuleId, LessonSummary), StorageError> {
    let module_id = module_id_from_i64(row.try_get::<i64, _>("module_id").map_err(ser)?)?;
    let summary = LessonSummary {
        id: lesson_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        title: row.try_get::<String, _>("title").map_err(ser)?,
        description: row
            .try_get::<Option<String>, _>("description")
            .map_err(ser)?
            .filter(|d| !d.trim().is_empty()),
        order: order_from_i64(row.try_get::<i64, _>("sort_order").map_err(ser)?)?,
    };
    Ok((module_id, summary))
}

pub(crate) fn map_challenge_row(row: &SqliteRow) -> Result<Challenge, StorageError> {
    Ok(Challenge {
        id: challenge_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        title: row.try_get::<String, _>("title").map_err(ser)?,
        instructions: row.try_get::<String, _>("instructions").map_err(ser)?,
        order: order_from_i64(row.try_get::<i64, _>("sort_order").map_err(ser)?)?,
    })
}

pub(crate) fn order_to_i64(order: i32) -> i64 {
    i64::from(order)
}
