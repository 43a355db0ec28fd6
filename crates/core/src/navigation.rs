//! Previous/next lesson resolution across module boundaries.
//!
//! The module list must already be in curriculum order: modules by
//! `(tier, order)`, lessons by `order`. Resolution only ever looks at the
//! directly adjacent module, so an empty neighbour ends the walk in that
//! direction.

use serde::Serialize;

use crate::model::{LessonId, LessonSummary, ModuleId, ModuleOutline};

/// Neighbours of the current lesson in curriculum order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonNavigation {
    pub previous: Option<LessonSummary>,
    pub next: Option<LessonSummary>,
}

/// Resolves both neighbours of `lesson_id` inside `module_id`.
#[must_use]
pub fn resolve(
    modules: &[ModuleOutline],
    lesson_id: LessonId,
    module_id: ModuleId,
) -> LessonNavigation {
    LessonNavigation {
        previous: previous_lesson(modules, lesson_id, module_id).cloned(),
        next: next_lesson(modules, lesson_id, module_id).cloned(),
    }
}

/// Following lesson in the same module, else the first lesson of the next module.
#[must_use]
pub fn next_lesson(
    modules: &[ModuleOutline],
    lesson_id: LessonId,
    module_id: ModuleId,
) -> Option<&LessonSummary> {
    let (module_idx, lesson_idx) = locate(modules, lesson_id, module_id)?;
    let lessons = modules[module_idx].lessons();

    if lesson_idx + 1 < lessons.len() {
        return lessons.get(lesson_idx + 1);
    }
    modules.get(module_idx + 1)?.lessons().first()
}

/// Preceding lesson in the same module, else the last lesson of the previous module.
#[must_use]
pub fn previous_lesson(
    modules: &[ModuleOutline],
    lesson_id: LessonId,
    module_id: ModuleId,
) -> Option<&LessonSummary> {
    let (module_idx, lesson_idx) = locate(modules, lesson_id, module_id)?;

    if lesson_idx > 0 {
        return modules[module_idx].lessons().get(lesson_idx - 1);
    }
    modules.get(module_idx.checked_sub(1)?)?.lessons().last()
}

/// Entry point of the curriculum: the first lesson of the first module.
#[must_use]
pub fn first_lesson(modules: &[ModuleOutline]) -> Option<&LessonSummary> {
    modules.first()?.lessons().first()
}

fn locate(
    modules: &[ModuleOutline],
    lesson_id: LessonId,
    module_id: ModuleId,
) -> Option<(usize, usize)> {
    let module_idx = modules.iter().position(|m| m.id() == module_id)?;
    let lesson_idx = modules[module_idx]
        .lessons()
        .iter()
        .position(|l| l.id == lesson_id)?;
    Some((module_idx, lesson_idx))
}
