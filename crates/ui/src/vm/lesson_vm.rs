use std::sync::Arc;

use learn_core::model::{CompletionSet, Lesson, LessonId, LessonSummary, ModuleOutline};
use learn_core::navigation;
use learn_core::reading::reading_time;

use crate::vm::markdown_vm::{TocItem, render_lesson_markdown, table_of_contents};
use crate::vm::progress_vm::{lesson_href, tier_label};

/// Outcome of fetching the lesson record.
#[derive(Clone, Debug, PartialEq)]
pub enum LessonFetch {
    Found(Lesson),
    Missing,
    Failed(String),
}

/// Results arriving for a lesson view. Each carries the lesson id the fetch
/// was issued for.
#[derive(Clone, Debug, PartialEq)]
pub enum LessonEvent {
    LessonLoaded(LessonId, LessonFetch),
    ModulesLoaded(LessonId, Result<Arc<[ModuleOutline]>, String>),
    ProgressLoaded(LessonId, CompletionSet),
}

impl LessonEvent {
    fn lesson_id(&self) -> LessonId {
        match self {
            Self::LessonLoaded(id, _) | Self::ModulesLoaded(id, _) | Self::ProgressLoaded(id, _) => {
                *id
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLinkVm {
    pub title: String,
    pub href: String,
}

impl From<&LessonSummary> for NavLinkVm {
    fn from(summary: &LessonSummary) -> Self {
        Self {
            title: summary.title.clone(),
            href: lesson_href(summary.id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeVm {
    pub title: String,
    pub instructions: String,
}

/// Previous/next links once the module list is known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationVm {
    Pending,
    Unavailable,
    Resolved {
        previous: Option<NavLinkVm>,
        next: Option<NavLinkVm>,
    },
}

impl NavigationVm {
    #[must_use]
    pub fn previous(&self) -> Option<&NavLinkVm> {
        match self {
            Self::Resolved { previous, .. } => previous.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn next(&self) -> Option<&NavLinkVm> {
        match self {
            Self::Resolved { next, .. } => next.as_ref(),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonPageVm {
    pub lesson_id: LessonId,
    pub title: String,
    pub description: Option<String>,
    pub module_title: String,
    pub tier_label: String,
    pub reading_time: String,
    pub html: String,
    pub toc: Vec<TocItem>,
    pub challenges: Vec<ChallengeVm>,
    pub navigation: NavigationVm,
    pub progress_loaded: bool,
    pub completed: bool,
}

impl LessonPageVm {
    #[must_use]
    pub fn complete_action(&self) -> String {
        format!("{}/complete", lesson_href(self.lesson_id))
    }

    #[must_use]
    pub fn incomplete_action(&self) -> String {
        format!("{}/incomplete", lesson_href(self.lesson_id))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LessonViewState {
    Loading,
    NotFound,
    Failed(String),
    Ready(Box<LessonPageVm>),
}

/// Lesson rendered once, when its record arrives.
#[derive(Clone, Debug)]
struct RenderedLesson {
    lesson: Lesson,
    html: String,
    toc: Vec<TocItem>,
    reading_time: String,
}

/// Assembles a lesson page from independently arriving fetch results.
///
/// Lesson, module list and progress may arrive in any order. Results tagged
/// with a different lesson id belong to a view that was already replaced and
/// are dropped.
#[derive(Clone, Debug)]
pub struct LessonView {
    lesson_id: LessonId,
    lesson: Option<Result<RenderedLesson, LessonFetch>>,
    modules: Option<Result<Arc<[ModuleOutline]>, String>>,
    progress: Option<CompletionSet>,
}

impl LessonView {
    #[must_use]
    pub fn new(lesson_id: LessonId) -> Self {
        Self {
            lesson_id,
            lesson: None,
            modules: None,
            progress: None,
        }
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    /// Apply a fetch result. Returns `false` when the event was stale and ignored.
    pub fn apply(&mut self, event: LessonEvent) -> bool {
        if event.lesson_id() != self.lesson_id {
            return false;
        }
        match event {
            LessonEvent::LessonLoaded(_, LessonFetch::Found(lesson)) => {
                let content = lesson.content();
                self.lesson = Some(Ok(RenderedLesson {
                    html: render_lesson_markdown(content),
                    toc: table_of_contents(content),
                    reading_time: reading_time(content).to_string(),
                    lesson,
                }));
            }
            LessonEvent::LessonLoaded(_, other) => self.lesson = Some(Err(other)),
            LessonEvent::ModulesLoaded(_, modules) => self.modules = Some(modules),
            LessonEvent::ProgressLoaded(_, completed) => self.progress = Some(completed),
        }
        true
    }

    #[must_use]
    pub fn state(&self) -> LessonViewState {
        let rendered = match &self.lesson {
            None => return LessonViewState::Loading,
            Some(Err(LessonFetch::Failed(message))) => {
                return LessonViewState::Failed(message.clone());
            }
            Some(Err(_)) => return LessonViewState::NotFound,
            Some(Ok(rendered)) => rendered,
        };
        let lesson = &rendered.lesson;

        let navigation = match &self.modules {
            None => NavigationVm::Pending,
            Some(Err(_)) => NavigationVm::Unavailable,
            Some(Ok(modules)) => {
                let nav = navigation::resolve(modules, lesson.id(), lesson.module().id);
                NavigationVm::Resolved {
                    previous: nav.previous.as_ref().map(NavLinkVm::from),
                    next: nav.next.as_ref().map(NavLinkVm::from),
                }
            }
        };

        let completed = self
            .progress
            .as_ref()
            .is_some_and(|set| set.contains(lesson.id()));

        LessonViewState::Ready(Box::new(LessonPageVm {
            lesson_id: lesson.id(),
            title: lesson.title().to_owned(),
            description: lesson.description().map(str::to_owned),
            module_title: lesson.module().title.clone(),
            tier_label: tier_label(lesson.module().tier),
            reading_time: rendered.reading_time.clone(),
            html: rendered.html.clone(),
            toc: rendered.toc.clone(),
            challenges: lesson
                .challenges()
                .iter()
                .map(|c| ChallengeVm {
                    title: c.title.clone(),
                    instructions: c.instructions.clone(),
                })
                .collect(),
            navigation,
            progress_loaded: self.progress.is_some(),
            completed,
        }))
    }
}
