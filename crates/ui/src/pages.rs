//! Loads everything a page needs from the app services.

use learn_core::model::LessonId;
use services::AppServices;

use crate::vm::{LessonEvent, LessonFetch, LessonView, SidebarVm, build_sidebar};

pub struct LessonScreen {
    pub view: LessonView,
    pub sidebar: SidebarVm,
}

/// Fetch the lesson and the module list concurrently and feed both, plus the
/// current progress, into a fresh `LessonView`.
pub async fn load_lesson_screen(services: &AppServices, id: LessonId) -> LessonScreen {
    let content = services.content();
    let (lesson, modules) = tokio::join!(content.get_lesson(id), content.list_modules());

    let completed = {
        let progress = services.progress();
        let tracker = progress.read().await;
        tracker.is_loaded().then(|| tracker.completed().clone())
    };

    let fetch = match lesson {
        Ok(lesson) => LessonFetch::Found(lesson),
        Err(e) if e.is_not_found() => LessonFetch::Missing,
        Err(_) => LessonFetch::Failed("Failed to fetch lesson".to_owned()),
    };

    let sidebar = match &modules {
        Ok(modules) => build_sidebar(modules, completed.as_ref(), Some(id)),
        Err(_) => SidebarVm::unavailable(),
    };

    let mut view = LessonView::new(id);
    view.apply(LessonEvent::LessonLoaded(id, fetch));
    view.apply(LessonEvent::ModulesLoaded(
        id,
        modules.map_err(|_| "Failed to fetch modules".to_owned()),
    ));
    if let Some(completed) = completed {
        view.apply(LessonEvent::ProgressLoaded(id, completed));
    }

    LessonScreen { view, sidebar }
}
