//! Fixed starter curriculum.
//!
//! Seeding wipes progress and all curriculum records, then loads one tier-1
//! module with three ordered lessons. Running it again produces the same shape
//! (ids are reassigned by the store).

use learn_core::model::{LessonId, Module, ModuleError, ModuleId};
use thiserror::Error;

use crate::repository::{
    ContentRepository, NewLessonRecord, NewModuleRecord, ProgressStore, StorageError,
};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    Module(#[from] ModuleError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// What a seed run inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub module_id: ModuleId,
    pub lesson_ids: Vec<LessonId>,
}

impl SeedReport {
    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.lesson_ids.len()
    }
}

struct SeedLesson {
    title: &'static str,
    description: &'static str,
    content: &'static str,
}

pub const MODULE_TITLE: &str = "MongoDB Fundamentals";
const MODULE_DESCRIPTION: &str =
    "Learn the basics of MongoDB, including documents, collections, and basic operations.";

const LESSONS: [SeedLesson; 3] = [
    SeedLesson {
        title: "Introduction to MongoDB",
        description: "Understanding what MongoDB is and its key concepts",
        content: include_str!("../seed/01-introduction-to-mongodb.md"),
    },
    SeedLesson {
        title: "Documents and Collections",
        description: "Deep dive into MongoDB documents and collections",
        content: include_str!("../seed/02-documents-and-collections.md"),
    },
    SeedLesson {
        title: "Basic CRUD Operations",
        description: "Learn Create, Read, Update, and Delete operations",
        content: include_str!("../seed/03-basic-crud-operations.md"),
    },
];

/// Replace everything in `content` and `progress` with the starter curriculum.
///
/// # Errors
///
/// Returns `SeedError::Storage` if clearing or inserting fails.
pub async fn seed_curriculum(
    content: &dyn ContentRepository,
    progress: &dyn ProgressStore,
) -> Result<SeedReport, SeedError> {
    progress.clear().await?;
    content.clear_content().await?;

    let module = Module::new(ModuleId::new(1), MODULE_TITLE, MODULE_DESCRIPTION, 1, 1)?;
    let module_id = content
        .insert_module(NewModuleRecord::from_module(&module))
        .await?;

    let mut lesson_ids = Vec::with_capacity(LESSONS.len());
    for (lesson, order) in LESSONS.iter().zip(1..) {
        let id = content
            .insert_lesson(NewLessonRecord {
                module_id,
                title: lesson.title.to_owned(),
                description: Some(lesson.description.to_owned()),
                content: lesson.content.to_owned(),
                order,
            })
            .await?;
        lesson_ids.push(id);
    }

    Ok(SeedReport {
        module_id,
        lesson_ids,
    })
}
