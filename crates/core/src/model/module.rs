use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{LessonId, ModuleId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModuleError {
    #[error("module title cannot be empty")]
    EmptyTitle,

    #[error("module tier must be >= 1")]
    InvalidTier,
}

//
// ─── MODULE ────────────────────────────────────────────────────────────────────
//

/// A top-level curriculum unit grouping ordered lessons.
///
/// Modules sort by `(tier, order)`; tier 1 holds the fundamentals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    id: ModuleId,
    title: String,
    description: String,
    tier: u32,
    order: i32,
}

impl Module {
    /// Creates a validated module record.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::EmptyTitle` for a blank title and
    /// `ModuleError::InvalidTier` when `tier` is zero.
    pub fn new(
        id: ModuleId,
        title: impl Into<String>,
        description: impl Into<String>,
        tier: u32,
        order: i32,
    ) -> Result<Self, ModuleError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(ModuleError::EmptyTitle);
        }
        if tier == 0 {
            return Err(ModuleError::InvalidTier);
        }

        Ok(Self {
            id,
            title,
            description: description.into().trim().to_owned(),
            tier,
            order,
        })
    }

    #[must_use]
    pub fn id(&self) -> ModuleId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn tier(&self) -> u32 {
        self.tier
    }

    #[must_use]
    pub fn order(&self) -> i32 {
        self.order
    }
}

/// Lesson projection used by the module list: everything except the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSummary {
    pub id: LessonId,
    pub title: String,
    pub description: Option<String>,
    pub order: i32,
}

/// A module together with its lesson summaries, as served by the module list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOutline {
    #[serde(flatten)]
    module: Module,
    lessons: Vec<LessonSummary>,
}

impl ModuleOutline {
    /// Pairs a module with its lessons, sorted by `(order, id)`.
    #[must_use]
    pub fn new(module: Module, mut lessons: Vec<LessonSummary>) -> Self {
        lessons.sort_by_key(|lesson| (lesson.order, lesson.id));
        Self { module, lessons }
    }

    #[must_use]
    pub fn module(&self) -> &Module {
        &self.module
    }

    #[must_use]
    pub fn id(&self) -> ModuleId {
        self.module.id()
    }

    #[must_use]
    pub fn lessons(&self) -> &[LessonSummary] {
        &self.lessons
    }

    /// Sort key for curriculum ordering.
    #[must_use]
    pub fn sort_key(&self) -> (u32, i32, ModuleId) {
        (self.module.tier(), self.module.order(), self.module.id())
    }
}
