mod lesson_vm;
mod markdown_vm;
mod progress_vm;

pub use lesson_vm::{
    ChallengeVm, LessonEvent, LessonFetch, LessonPageVm, LessonView, LessonViewState, NavLinkVm,
    NavigationVm,
};
pub use markdown_vm::{TocItem, render_lesson_markdown, sanitize_html, table_of_contents};
pub use progress_vm::{
    DashboardVm, ModuleRowVm, SidebarLessonVm, SidebarModuleVm, SidebarVm, build_sidebar,
    lesson_href, tier_class, tier_label,
};
