use async_trait::async_trait;
use learn_core::model::{
    Challenge, ChallengeId, CompletionSet, Lesson, LessonId, LessonSummary, Module, ModuleId,
    ModuleOutline, ModuleRef,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Insert shape for a module; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewModuleRecord {
    pub title: String,
    pub description: String,
    pub tier: u32,
    pub order: i32,
}

impl NewModuleRecord {
    #[must_use]
    pub fn from_module(module: &Module) -> Self {
        Self {
            title: module.title().to_owned(),
            description: module.description().to_owned(),
            tier: module.tier(),
            order: module.order(),
        }
    }
}

/// Insert shape for a lesson inside an existing module.
#[derive(Debug, Clone)]
pub struct NewLessonRecord {
    pub module_id: ModuleId,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub order: i32,
}

/// Insert shape for a challenge attached to an existing lesson.
#[derive(Debug, Clone)]
pub struct NewChallengeRecord {
    pub lesson_id: LessonId,
    pub title: String,
    pub instructions: String,
    pub order: i32,
}

/// Read access to the curriculum plus the bulk-load operations used by seeding.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// All modules sorted by `(tier, order)`, each with lesson summaries sorted by `order`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn list_modules(&self) -> Result<Vec<ModuleOutline>, StorageError>;

    /// Full lesson record with its module projection and challenges.
    ///
    /// Returns `Ok(None)` when no lesson has this id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the module cannot be stored.
    async fn insert_module(&self, module: NewModuleRecord) -> Result<ModuleId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the module does not exist.
    async fn insert_lesson(&self, lesson: NewLessonRecord) -> Result<LessonId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the lesson does not exist.
    async fn insert_challenge(
        &self,
        challenge: NewChallengeRecord,
    ) -> Result<ChallengeId, StorageError>;

    /// Delete every challenge, lesson and module.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    async fn clear_content(&self) -> Result<(), StorageError>;
}

/// Persistence for the completion set of one user/device.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Load the persisted set; a missing record is an empty set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the record is corrupt, or other
    /// storage errors.
    async fn load(&self) -> Result<CompletionSet, StorageError>;

    /// Replace the persisted record with `completed`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    async fn save(&self, completed: &CompletionSet) -> Result<(), StorageError>;

    /// Remove the persisted record entirely.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be removed.
    async fn clear(&self) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
struct StoredLesson {
    module_id: ModuleId,
    title: String,
    description: Option<String>,
    content: String,
    order: i32,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    modules: BTreeMap<ModuleId, Module>,
    lessons: BTreeMap<LessonId, StoredLesson>,
    challenges: BTreeMap<ChallengeId, (LessonId, Challenge)>,
    progress: Option<CompletionSet>,
}

impl MemoryState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    /// True if a progress record exists (as opposed to never written or cleared).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn has_progress_record(&self) -> Result<bool, StorageError> {
        Ok(self.lock()?.progress.is_some())
    }
}

#[async_trait]
impl ContentRepository for InMemoryRepository {
    async fn list_modules(&self) -> Result<Vec<ModuleOutline>, StorageError> {
        let guard = self.lock()?;
        let mut outlines: Vec<ModuleOutline> = guard
            .modules
            .values()
            .map(|module| {
                let lessons = guard
                    .lessons
                    .iter()
                    .filter(|(_, l)| l.module_id == module.id())
                    .map(|(id, l)| LessonSummary {
                        id: *id,
                        title: l.title.clone(),
                        description: l.description.clone(),
                        order: l.order,
                    })
                    .collect();
                ModuleOutline::new(module.clone(), lessons)
            })
            .collect();
        outlines.sort_by_key(ModuleOutline::sort_key);
        Ok(outlines)
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, StorageError> {
        let guard = self.lock()?;
        let Some(stored) = guard.lessons.get(&id) else {
            return Ok(None);
        };
        let module = guard
            .modules
            .get(&stored.module_id)
            .ok_or_else(|| StorageError::Serialization(format!("orphan lesson {id}")))?;
        let challenges = guard
            .challenges
            .values()
            .filter(|(lesson_id, _)| *lesson_id == id)
            .map(|(_, c)| c.clone())
            .collect();

        Lesson::new(
            id,
            stored.title.clone(),
            stored.description.clone(),
            stored.content.clone(),
            stored.order,
            ModuleRef::from(module),
            challenges,
        )
        .map(Some)
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn insert_module(&self, module: NewModuleRecord) -> Result<ModuleId, StorageError> {
        let mut guard = self.lock()?;
        let id = ModuleId::new(guard.allocate_id());
        let module = Module::new(id, module.title, module.description, module.tier, module.order)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        guard.modules.insert(id, module);
        Ok(id)
    }

    async fn insert_lesson(&self, lesson: NewLessonRecord) -> Result<LessonId, StorageError> {
        let mut guard = self.lock()?;
        if !guard.modules.contains_key(&lesson.module_id) {
            return Err(StorageError::NotFound);
        }
        let id = LessonId::new(guard.allocate_id());
        guard.lessons.insert(
            id,
            StoredLesson {
                module_id: lesson.module_id,
                title: lesson.title,
                description: lesson.description,
                content: lesson.content,
                order: lesson.order,
            },
        );
        Ok(id)
    }

    async fn insert_challenge(
        &self,
        challenge: NewChallengeRecord,
    ) -> Result<ChallengeId, StorageError> {
        let mut guard = self.lock()?;
        if !guard.lessons.contains_key(&challenge.lesson_id) {
            return Err(StorageError::NotFound);
        }
        let id = ChallengeId::new(guard.allocate_id());
        guard.challenges.insert(
            id,
            (
                challenge.lesson_id,
                Challenge {
                    id,
                    title: challenge.title,
                    instructions: challenge.instructions,
                    order: challenge.order,
                },
            ),
        );
        Ok(id)
    }

    async fn clear_content(&self) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.challenges.clear();
        guard.lessons.clear();
        guard.modules.clear();
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for InMemoryRepository {
    async fn load(&self) -> Result<CompletionSet, StorageError> {
        Ok(self.lock()?.progress.clone().unwrap_or_default())
    }

    async fn save(&self, completed: &CompletionSet) -> Result<(), StorageError> {
        self.lock()?.progress = Some(completed.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.lock()?.progress = None;
        Ok(())
    }
}

/// Aggregates the content and progress backends behind trait objects for easy swapping.
#[derive(Clone)]
pub struct Storage {
    pub content: Arc<dyn ContentRepository>,
    pub progress: Arc<dyn ProgressStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let content: Arc<dyn ContentRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressStore> = Arc::new(repo);
        Self { content, progress }
    }

    /// Keep the content backend, persist progress somewhere else.
    #[must_use]
    pub fn with_progress(self, progress: Arc<dyn ProgressStore>) -> Self {
        Self {
            content: self.content,
            progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_record(title: &str, tier: u32, order: i32) -> NewModuleRecord {
        NewModuleRecord {
            title: title.into(),
            description: String::new(),
            tier,
            order,
        }
    }

    fn lesson_record(module_id: ModuleId, title: &str, order: i32) -> NewLessonRecord {
        NewLessonRecord {
            module_id,
            title: title.into(),
            description: None,
            content: format!("# {title}"),
            order,
        }
    }

    #[tokio::test]
    async fn lists_modules_by_tier_then_order() {
        let repo = InMemoryRepository::new();
        let advanced = repo.insert_module(module_record("Advanced", 2, 1)).await.unwrap();
        let second = repo.insert_module(module_record("Second", 1, 2)).await.unwrap();
        let first = repo.insert_module(module_record("First", 1, 1)).await.unwrap();
        repo.insert_lesson(lesson_record(first, "B", 2)).await.unwrap();
        repo.insert_lesson(lesson_record(first, "A", 1)).await.unwrap();

        let modules = repo.list_modules().await.unwrap();
        let order: Vec<ModuleId> = modules.iter().map(ModuleOutline::id).collect();
        assert_eq!(order, vec![first, second, advanced]);
        let titles: Vec<&str> = modules[0].lessons().iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn get_lesson_embeds_module_and_challenges() {
        let repo = InMemoryRepository::new();
        let module_id = repo.insert_module(module_record("Basics", 1, 1)).await.unwrap();
        let lesson_id = repo.insert_lesson(lesson_record(module_id, "Intro", 1)).await.unwrap();
        repo.insert_challenge(NewChallengeRecord {
            lesson_id,
            title: "Try it".into(),
            instructions: "Insert a document".into(),
            order: 1,
        })
        .await
        .unwrap();

        let lesson = repo.get_lesson(lesson_id).await.unwrap().unwrap();
        assert_eq!(lesson.module().id, module_id);
        assert_eq!(lesson.module().title, "Basics");
        assert_eq!(lesson.challenges().len(), 1);
        assert!(repo.get_lesson(LessonId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lesson_requires_existing_module() {
        let repo = InMemoryRepository::new();
        let err = repo
            .insert_lesson(lesson_record(ModuleId::new(42), "Orphan", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn progress_clear_removes_record() {
        let repo = InMemoryRepository::new();
        assert!(!repo.has_progress_record().unwrap());

        let set: CompletionSet = [LessonId::new(1)].into_iter().collect();
        repo.save(&set).await.unwrap();
        assert!(repo.has_progress_record().unwrap());
        assert_eq!(repo.load().await.unwrap(), set);

        repo.clear().await.unwrap();
        assert!(!repo.has_progress_record().unwrap());
        assert!(repo.load().await.unwrap().is_empty());
    }
}
