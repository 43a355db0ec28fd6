use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::ids::{LessonId, ModuleId, ParseIdError};
use crate::model::module::ModuleOutline;

//
// ─── COMPLETION SET ────────────────────────────────────────────────────────────
//

/// Lesson ids the current user has marked done.
///
/// Membership is idempotent: inserting a present id or removing an absent one
/// leaves the set unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionSet(BTreeSet<LessonId>);

impl CompletionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the id was not already present.
    pub fn insert(&mut self, id: LessonId) -> bool {
        self.0.insert(id)
    }

    /// Returns `true` if the id was present.
    pub fn remove(&mut self, id: LessonId) -> bool {
        self.0.remove(&id)
    }

    #[must_use]
    pub fn contains(&self, id: LessonId) -> bool {
        self.0.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = LessonId> + '_ {
        self.0.iter().copied()
    }

    /// Persisted shape: identifier strings in ascending id order.
    #[must_use]
    pub fn to_persisted(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Rebuild from persisted identifier strings.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` for the first entry that is not a lesson id.
    pub fn from_persisted<S: AsRef<str>>(raw: &[S]) -> Result<Self, ParseIdError> {
        raw.iter()
            .map(|s| s.as_ref().parse::<LessonId>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }
}

impl FromIterator<LessonId> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = LessonId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

//
// ─── STATS ─────────────────────────────────────────────────────────────────────
//

/// `round(100 * completed / total)` with halves rounded up; `0` when `total == 0`.
#[must_use]
pub fn completion_percentage(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = u64::from(completed.min(total));
    let total = u64::from(total);
    let pct = (200 * completed + total) / (2 * total);
    u8::try_from(pct).unwrap_or(100)
}

/// Aggregate progress derived from a completion set and the module list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub total_lessons: u32,
    pub completed_lessons: u32,
    pub completion_percentage: u8,
    pub completed_lesson_ids: CompletionSet,
}

impl ProgressStats {
    /// Computes stats fresh from `completed` and `modules`.
    ///
    /// Only ids that belong to a listed lesson count as completed.
    #[must_use]
    pub fn compute(completed: &CompletionSet, modules: &[ModuleOutline]) -> Self {
        let lesson_ids: BTreeSet<LessonId> = modules
            .iter()
            .flat_map(|m| m.lessons().iter().map(|l| l.id))
            .collect();
        let total_lessons = count_u32(lesson_ids.len());
        let completed_lessons = count_u32(
            lesson_ids
                .iter()
                .filter(|id| completed.contains(**id))
                .count(),
        );

        Self {
            total_lessons,
            completed_lessons,
            completion_percentage: completion_percentage(completed_lessons, total_lessons),
            completed_lesson_ids: completed.clone(),
        }
    }

    /// True once every listed lesson is completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_lessons > 0 && self.completed_lessons == self.total_lessons
    }

    #[must_use]
    pub fn is_completed(&self, id: LessonId) -> bool {
        self.completed_lesson_ids.contains(id)
    }
}

/// Progress row for a single module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgress {
    pub module_id: ModuleId,
    pub title: String,
    pub completed: u32,
    pub total: u32,
    pub percentage: u8,
}

impl ModuleProgress {
    /// One row per module, in list order.
    #[must_use]
    pub fn for_modules(completed: &CompletionSet, modules: &[ModuleOutline]) -> Vec<Self> {
        modules
            .iter()
            .map(|outline| {
                let total = count_u32(outline.lessons().len());
                let done = count_u32(
                    outline
                        .lessons()
                        .iter()
                        .filter(|l| completed.contains(l.id))
                        .count(),
                );
                Self {
                    module_id: outline.id(),
                    title: outline.module().title().to_owned(),
                    completed: done,
                    total,
                    percentage: completion_percentage(done, total),
                }
            })
            .collect()
    }
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LessonSummary, Module};

    fn outline(module_id: u64, lesson_ids: &[u64]) -> ModuleOutline {
        let module = Module::new(ModuleId::new(module_id), "Module", "", 1, 1).unwrap();
        let lessons = lesson_ids
            .iter()
            .zip(1..)
            .map(|(id, order)| LessonSummary {
                id: LessonId::new(*id),
                title: format!("Lesson {id}"),
                description: None,
                order,
            })
            .collect();
        ModuleOutline::new(module, lessons)
    }

    #[test]
    fn insert_and_remove_are_idempotent() {
        let mut set = CompletionSet::new();
        assert!(set.insert(LessonId::new(1)));
        assert!(!set.insert(LessonId::new(1)));
        assert_eq!(set.len(), 1);
        assert!(set.remove(LessonId::new(1)));
        assert!(!set.remove(LessonId::new(1)));
        assert!(set.is_empty());
    }

    #[test]
    fn persisted_form_round_trips() {
        let set: CompletionSet = [LessonId::new(3), LessonId::new(1)].into_iter().collect();
        let raw = set.to_persisted();
        assert_eq!(raw, vec!["1".to_string(), "3".to_string()]);
        assert_eq!(CompletionSet::from_persisted(&raw).unwrap(), set);
    }

    #[test]
    fn persisted_form_rejects_corrupt_entries() {
        let err = CompletionSet::from_persisted(&["1", "oops"]).unwrap_err();
        assert_eq!(err.raw(), "oops");
    }

    #[test]
    fn stats_for_empty_curriculum_are_zero() {
        let stats = ProgressStats::compute(&CompletionSet::new(), &[]);
        assert_eq!(stats.total_lessons, 0);
        assert_eq!(stats.completed_lessons, 0);
        assert_eq!(stats.completion_percentage, 0);
        assert!(!stats.is_complete());
    }

    #[test]
    fn one_of_three_rounds_to_thirty_three() {
        let modules = vec![outline(1, &[1, 2, 3])];
        let set: CompletionSet = [LessonId::new(2)].into_iter().collect();
        let stats = ProgressStats::compute(&set, &modules);
        assert_eq!(stats.total_lessons, 3);
        assert_eq!(stats.completed_lessons, 1);
        assert_eq!(stats.completion_percentage, 33);
        assert!(stats.is_completed(LessonId::new(2)));
    }

    #[test]
    fn two_of_three_rounds_up() {
        let modules = vec![outline(1, &[1, 2, 3])];
        let set: CompletionSet = [LessonId::new(1), LessonId::new(2)].into_iter().collect();
        assert_eq!(ProgressStats::compute(&set, &modules).completion_percentage, 67);
    }

    #[test]
    fn unknown_ids_do_not_inflate_progress() {
        let modules = vec![outline(1, &[1, 2])];
        let set: CompletionSet = [1, 2, 99].into_iter().map(LessonId::new).collect();
        let stats = ProgressStats::compute(&set, &modules);
        assert_eq!(stats.completed_lessons, 2);
        assert_eq!(stats.completion_percentage, 100);
        assert!(stats.is_complete());
        assert_eq!(stats.completed_lesson_ids.len(), 3);
    }

    #[test]
    fn module_rows_follow_list_order() {
        let modules = vec![outline(1, &[1, 2]), outline(2, &[]), outline(3, &[3])];
        let set: CompletionSet = [LessonId::new(1), LessonId::new(3)].into_iter().collect();
        let rows = ModuleProgress::for_modules(&set, &modules);
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].completed, rows[0].total, rows[0].percentage), (1, 2, 50));
        assert_eq!((rows[1].completed, rows[1].total, rows[1].percentage), (0, 0, 0));
        assert_eq!((rows[2].completed, rows[2].total, rows[2].percentage), (1, 1, 100));
    }

    #[test]
    fn percentage_helper_handles_edges() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(1, 2), 50);
        assert_eq!(completion_percentage(1, 8), 13);
        assert_eq!(completion_percentage(5, 3), 100);
    }
}
