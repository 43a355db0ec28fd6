use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ChallengeId, LessonId, ModuleId};
use crate::model::module::{LessonSummary, Module};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,
}

/// Read-only projection of the module that owns a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRef {
    pub id: ModuleId,
    pub title: String,
    pub tier: u32,
}

impl From<&Module> for ModuleRef {
    fn from(module: &Module) -> Self {
        Self {
            id: module.id(),
            title: module.title().to_owned(),
            tier: module.tier(),
        }
    }
}

/// A practice exercise attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: ChallengeId,
    pub title: String,
    pub instructions: String,
    pub order: i32,
}

/// A single markdown lesson, with its owning module and challenges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    id: LessonId,
    title: String,
    description: Option<String>,
    content: String,
    order: i32,
    module: ModuleRef,
    challenges: Vec<Challenge>,
}

impl Lesson {
    /// Creates a lesson record.
    ///
    /// Blank descriptions are normalized to `None`; challenges are sorted by `(order, id)`.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::EmptyTitle` if the title is blank.
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        description: Option<String>,
        content: impl Into<String>,
        order: i32,
        module: ModuleRef,
        mut challenges: Vec<Challenge>,
    ) -> Result<Self, LessonError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        let description = description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());
        challenges.sort_by_key(|c| (c.order, c.id));

        Ok(Self {
            id,
            title,
            description,
            content: content.into(),
            order,
            module,
            challenges,
        })
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Markdown body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn order(&self) -> i32 {
        self.order
    }

    #[must_use]
    pub fn module(&self) -> &ModuleRef {
        &self.module
    }

    #[must_use]
    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    #[must_use]
    pub fn summary(&self) -> LessonSummary {
        LessonSummary {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            order: self.order,
        }
    }
}
