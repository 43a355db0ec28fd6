mod ids;
mod lesson;
mod module;
mod progress;

pub use ids::{ChallengeId, LessonId, ModuleId, ParseIdError};

pub use lesson::{Challenge, Lesson, LessonError, ModuleRef};
pub use module::{LessonSummary, Module, ModuleError, ModuleOutline};
pub use progress::{CompletionSet, ModuleProgress, ProgressStats, completion_percentage};
