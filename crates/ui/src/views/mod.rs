mod keyboard;
mod lesson;
mod scripts;
mod sidebar;
mod toc;

pub use keyboard::KeyboardHelp;
pub use lesson::{EmptyCurriculum, LessonFailed, LessonLoading, LessonNotFound, LessonPage};
pub use sidebar::{ProgressDashboard, Sidebar};
pub use toc::TableOfContents;

#[cfg(test)]
mod view_smoke;
