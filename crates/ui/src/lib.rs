pub mod pages;
pub mod render;
pub mod views;
pub mod vm;

pub use pages::{LessonScreen, load_lesson_screen};
pub use render::{PageBody, render_page};
