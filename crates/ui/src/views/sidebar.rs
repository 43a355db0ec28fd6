use dioxus::prelude::*;

use crate::vm::{DashboardVm, SidebarLessonVm, SidebarVm};

fn lesson_class(lesson: &SidebarLessonVm) -> &'static str {
    match (lesson.active, lesson.completed) {
        (true, true) => "sidebar-lesson active completed",
        (true, false) => "sidebar-lesson active",
        (false, true) => "sidebar-lesson completed",
        (false, false) => "sidebar-lesson",
    }
}

#[component]
pub fn Sidebar(sidebar: SidebarVm) -> Element {
    rsx! {
        div { class: "sidebar-header",
            a { href: "/learn", "📚 Learn MongoDB" }
        }

        ProgressDashboard { dashboard: sidebar.dashboard.clone() }

        div { class: "sidebar-modules",
            if sidebar.unavailable {
                p { class: "notice", "Modules could not be loaded." }
            }
            for (idx, module) in sidebar.modules.iter().enumerate() {
                section { key: "{idx}", class: "sidebar-module",
                    div { class: "sidebar-module-header",
                        h3 { "{module.title}" }
                        span { class: "{module.tier_class}", "{module.tier_label}" }
                    }
                    p { "{module.description}" }
                    for lesson in module.lessons.iter() {
                        a {
                            key: "{lesson.href}",
                            class: lesson_class(lesson),
                            href: "{lesson.href}",
                            span { class: "status",
                                if lesson.completed { "✓" }
                            }
                            div {
                                div { class: "lesson-title", "{lesson.title}" }
                                if let Some(description) = &lesson.description {
                                    div { class: "lesson-subtitle", "{description}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Overall and per-module completion. Shows a placeholder until progress is read.
#[component]
pub fn ProgressDashboard(dashboard: DashboardVm) -> Element {
    let DashboardVm::Ready {
        completed,
        total,
        percentage,
        modules,
        all_complete,
    } = dashboard
    else {
        return rsx! {
            div { class: "dashboard loading",
                div { class: "placeholder" }
                div { class: "placeholder" }
            }
        };
    };

    rsx! {
        div { class: "dashboard",
            h3 { "Your Progress" }
            div { class: "dashboard-row",
                span { "Lessons Completed" }
                span { "{completed}/{total}" }
            }
            div { class: "bar",
                div { class: "bar-fill", style: "width: {percentage}%" }
            }
            div { class: "dashboard-percent", "{percentage}% Complete" }

            for (idx, row) in modules.iter().enumerate() {
                div { key: "{idx}", class: "dashboard-module",
                    div { class: "dashboard-row",
                        span { "{row.title}" }
                        span { "{row.completed}/{row.total}" }
                    }
                    div { class: "bar thin",
                        div { class: "bar-fill", style: "width: {row.percentage}%" }
                    }
                }
            }

            if all_complete {
                div { class: "dashboard-done", "🎉 Congratulations! You've completed all lessons!" }
            }
        }
    }
}
