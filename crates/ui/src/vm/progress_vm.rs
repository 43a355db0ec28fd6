use learn_core::model::{CompletionSet, LessonId, ModuleOutline, ModuleProgress, ProgressStats};

#[must_use]
pub fn lesson_href(id: LessonId) -> String {
    format!("/learn/lesson/{id}")
}

#[must_use]
pub fn tier_label(tier: u32) -> String {
    format!("Tier {tier}")
}

/// Badge colour class; tiers past 4 share a neutral style.
#[must_use]
pub fn tier_class(tier: u32) -> &'static str {
    match tier {
        1 => "tier tier-1",
        2 => "tier tier-2",
        3 => "tier tier-3",
        4 => "tier tier-4",
        _ => "tier tier-other",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleRowVm {
    pub title: String,
    pub completed: u32,
    pub total: u32,
    pub percentage: u8,
}

impl From<&ModuleProgress> for ModuleRowVm {
    fn from(row: &ModuleProgress) -> Self {
        Self {
            title: row.title.clone(),
            completed: row.completed,
            total: row.total,
            percentage: row.percentage,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DashboardVm {
    /// Progress has not been read yet; render a placeholder, not zeros.
    Loading,
    Ready {
        completed: u32,
        total: u32,
        percentage: u8,
        modules: Vec<ModuleRowVm>,
        all_complete: bool,
    },
}

impl DashboardVm {
    #[must_use]
    pub fn from_progress(stats: &ProgressStats, rows: &[ModuleProgress]) -> Self {
        Self::Ready {
            completed: stats.completed_lessons,
            total: stats.total_lessons,
            percentage: stats.completion_percentage,
            modules: rows.iter().map(ModuleRowVm::from).collect(),
            all_complete: stats.is_complete(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarLessonVm {
    pub title: String,
    pub description: Option<String>,
    pub href: String,
    pub active: bool,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarModuleVm {
    pub title: String,
    pub description: String,
    pub tier_label: String,
    pub tier_class: &'static str,
    pub lessons: Vec<SidebarLessonVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarVm {
    pub modules: Vec<SidebarModuleVm>,
    pub unavailable: bool,
    pub dashboard: DashboardVm,
}

impl SidebarVm {
    /// Sidebar for a module list that could not be fetched.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            modules: Vec::new(),
            unavailable: true,
            dashboard: DashboardVm::Loading,
        }
    }
}

/// Build the sidebar. `completed` is `None` while progress is still unread,
/// in which case no lesson is shown as completed.
#[must_use]
pub fn build_sidebar(
    modules: &[ModuleOutline],
    completed: Option<&CompletionSet>,
    active: Option<LessonId>,
) -> SidebarVm {
    let dashboard = match completed {
        Some(set) => DashboardVm::from_progress(
            &ProgressStats::compute(set, modules),
            &ModuleProgress::for_modules(set, modules),
        ),
        None => DashboardVm::Loading,
    };

    let modules = modules
        .iter()
        .map(|outline| {
            let module = outline.module();
            SidebarModuleVm {
                title: module.title().to_owned(),
                description: module.description().to_owned(),
                tier_label: tier_label(module.tier()),
                tier_class: tier_class(module.tier()),
                lessons: outline
                    .lessons()
                    .iter()
                    .map(|lesson| SidebarLessonVm {
                        title: lesson.title.clone(),
                        description: lesson.description.clone(),
                        href: lesson_href(lesson.id),
                        active: active == Some(lesson.id),
                        completed: completed.is_some_and(|set| set.contains(lesson.id)),
                    })
                    .collect(),
            }
        })
        .collect();

    SidebarVm {
        modules,
        unavailable: false,
        dashboard,
    }
}
