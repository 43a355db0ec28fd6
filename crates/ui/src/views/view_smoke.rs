use learn_core::model::{
    Challenge, ChallengeId, CompletionSet, Lesson, LessonId, LessonSummary, Module, ModuleId,
    ModuleOutline, ModuleRef,
};

use crate::render::{PageBody, render_page};
use crate::vm::{
    LessonEvent, LessonFetch, LessonView, LessonViewState, SidebarVm, build_sidebar,
};

fn modules() -> Vec<ModuleOutline> {
    let module = Module::new(
        ModuleId::new(1),
        "MongoDB Fundamentals",
        "Learn the basics of MongoDB.",
        1,
        1,
    )
    .unwrap();
    let lessons = (1..=3)
        .map(|id| LessonSummary {
            id: LessonId::new(id),
            title: format!("Lesson {id}"),
            description: Some(format!("About lesson {id}")),
            order: i32::try_from(id).unwrap(),
        })
        .collect();
    vec![ModuleOutline::new(module, lessons)]
}

fn lesson(id: u64, challenges: Vec<Challenge>) -> Lesson {
    Lesson::new(
        LessonId::new(id),
        format!("Lesson {id}"),
        Some(format!("About lesson {id}")),
        "# Getting Started\n\n## Documents\n\n```javascript\ndb.users.find()\n```\n",
        i32::try_from(id).unwrap(),
        ModuleRef {
            id: ModuleId::new(1),
            title: "MongoDB Fundamentals".into(),
            tier: 1,
        },
        challenges,
    )
    .unwrap()
}

fn ready_state(id: u64, completed: &CompletionSet, challenges: Vec<Challenge>) -> LessonViewState {
    let lesson_id = LessonId::new(id);
    let mut view = LessonView::new(lesson_id);
    view.apply(LessonEvent::LessonLoaded(
        lesson_id,
        LessonFetch::Found(lesson(id, challenges)),
    ));
    view.apply(LessonEvent::ModulesLoaded(lesson_id, Ok(modules().into())));
    view.apply(LessonEvent::ProgressLoaded(lesson_id, completed.clone()));
    view.state()
}

#[test]
fn lesson_page_renders_content_navigation_and_actions() {
    let completed = CompletionSet::new();
    let sidebar = build_sidebar(&modules(), Some(&completed), Some(LessonId::new(2)));
    let html = render_page(
        sidebar,
        PageBody::Lesson(ready_state(2, &completed, Vec::new())),
    );

    assert!(html.starts_with("<!DOCTYPE html>"), "{html}");
    assert!(html.contains("<title>Lesson 2 | Learn</title>"), "{html}");
    assert!(html.contains("MongoDB Fundamentals"), "{html}");
    assert!(html.contains("Tier 1"), "{html}");
    assert!(html.contains("1 min read"), "{html}");
    assert!(html.contains(r##"href="#getting-started""##), "{html}");
    assert!(html.contains(r#"id="getting-started""#), "{html}");
    assert!(html.contains(r#"class="language-javascript""#), "{html}");
    assert!(html.contains("Previous: Lesson 1"), "{html}");
    assert!(html.contains("Next: Lesson 3"), "{html}");
    assert!(html.contains(r#"data-nav="next""#), "{html}");
    assert!(html.contains(r#"action="/learn/lesson/2/complete""#), "{html}");
    assert!(html.contains("Mark as Complete"), "{html}");
    assert!(html.contains("ArrowRight"), "{html}");
    assert!(html.contains("0/3"), "{html}");
}

#[test]
fn completed_lesson_shows_badge_instead_of_form() {
    let completed: CompletionSet = [LessonId::new(1)].into_iter().collect();
    let sidebar = build_sidebar(&modules(), Some(&completed), Some(LessonId::new(1)));
    let html = render_page(
        sidebar,
        PageBody::Lesson(ready_state(1, &completed, Vec::new())),
    );

    assert!(html.contains("✓ Completed"), "{html}");
    assert!(!html.contains(r#"id="complete-form""#), "{html}");
    assert!(html.contains(r#"action="/learn/lesson/1/incomplete""#), "{html}");
    assert!(!html.contains("Previous:"), "{html}");
    assert!(html.contains("1/3"), "{html}");
    assert!(html.contains("33% Complete"), "{html}");
}

#[test]
fn challenges_are_listed_when_present() {
    let challenge = Challenge {
        id: ChallengeId::new(1),
        title: "Insert a user".into(),
        instructions: "Use insertOne.".into(),
        order: 1,
    };
    let completed = CompletionSet::new();
    let html = render_page(
        build_sidebar(&modules(), Some(&completed), None),
        PageBody::Lesson(ready_state(3, &completed, vec![challenge])),
    );
    assert!(html.contains("Challenges"), "{html}");
    assert!(html.contains("Insert a user"), "{html}");
}

#[test]
fn not_found_failed_and_loading_states_render_distinctly() {
    let not_found = render_page(
        SidebarVm::unavailable(),
        PageBody::Lesson(LessonViewState::NotFound),
    );
    assert!(not_found.contains("Lesson Not Found"), "{not_found}");
    assert!(not_found.contains("Back to Learning"), "{not_found}");
    assert!(not_found.contains("Modules could not be loaded."), "{not_found}");

    let failed = render_page(
        SidebarVm::unavailable(),
        PageBody::Lesson(LessonViewState::Failed("Failed to fetch lesson".into())),
    );
    assert!(failed.contains("Something went wrong"), "{failed}");
    assert!(failed.contains("Failed to fetch lesson"), "{failed}");

    let loading = render_page(
        SidebarVm::unavailable(),
        PageBody::Lesson(LessonViewState::Loading),
    );
    assert!(loading.contains("Loading lesson..."), "{loading}");
}

#[test]
fn dashboard_waits_for_progress_and_celebrates_completion() {
    let pending = render_page(
        build_sidebar(&modules(), None, None),
        PageBody::EmptyCurriculum,
    );
    assert!(!pending.contains("Your Progress"), "{pending}");
    assert!(pending.contains("No lessons yet"), "{pending}");

    let all: CompletionSet = (1..=3).map(LessonId::new).collect();
    let done = render_page(
        build_sidebar(&modules(), Some(&all), None),
        PageBody::EmptyCurriculum,
    );
    assert!(done.contains("100% Complete"), "{done}");
    assert!(done.contains("Congratulations"), "{done}");
}
