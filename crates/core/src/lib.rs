#![forbid(unsafe_code)]

pub mod model;
pub mod navigation;
pub mod reading;
pub mod slug;

pub use navigation::{LessonNavigation, first_lesson, resolve};
pub use slug::slugify;
