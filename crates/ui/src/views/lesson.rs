use dioxus::prelude::*;

use crate::views::{KeyboardHelp, TableOfContents};
use crate::vm::{LessonPageVm, NavigationVm};

#[component]
pub fn LessonPage(vm: LessonPageVm) -> Element {
    let previous = vm.navigation.previous().cloned();
    let next = vm.navigation.next().cloned();
    let complete_action = vm.complete_action();
    let incomplete_action = vm.incomplete_action();
    let navigation_unavailable = vm.navigation == NavigationVm::Unavailable;

    rsx! {
        article { class: "lesson", id: "lesson-root",
            header { class: "lesson-header",
                div { class: "lesson-meta",
                    span { "{vm.module_title}" }
                    span { "•" }
                    span { "{vm.tier_label}" }
                    span { "•" }
                    span { "{vm.reading_time}" }
                }
                h1 { "{vm.title}" }
                if let Some(description) = &vm.description {
                    p { class: "lesson-description", "{description}" }
                }
            }

            TableOfContents { items: vm.toc.clone() }

            div { class: "prose", dangerous_inner_html: "{vm.html}" }

            if !vm.challenges.is_empty() {
                section { class: "challenges",
                    h2 { "Challenges" }
                    ol {
                        for (idx, challenge) in vm.challenges.iter().enumerate() {
                            li { key: "{idx}",
                                strong { "{challenge.title}" }
                                p { "{challenge.instructions}" }
                            }
                        }
                    }
                }
            }

            if navigation_unavailable {
                p { class: "notice", "Lesson navigation is unavailable right now." }
            }

            footer { class: "lesson-actions",
                div {
                    if let Some(link) = &previous {
                        a {
                            class: "button outline",
                            href: "{link.href}",
                            "data-nav": "previous",
                            "← Previous: {link.title}"
                        }
                    }
                }
                div { class: "lesson-actions-right",
                    if vm.completed {
                        span { class: "completed-badge", "✓ Completed" }
                        form { method: "post", action: "{incomplete_action}",
                            button { r#type: "submit", class: "button link", "Mark as incomplete" }
                        }
                    } else {
                        form { id: "complete-form", method: "post", action: "{complete_action}",
                            button { r#type: "submit", class: "button primary", "Mark as Complete" }
                        }
                    }
                    if let Some(link) = &next {
                        a {
                            class: "button primary",
                            href: "{link.href}",
                            "data-nav": "next",
                            "Next: {link.title} →"
                        }
                    }
                }
            }

            KeyboardHelp {}
        }
    }
}

#[component]
pub fn LessonNotFound() -> Element {
    rsx! {
        div { class: "centered",
            div {
                h1 { "Lesson Not Found" }
                p { "The lesson you're looking for doesn't exist." }
                a { class: "button primary", href: "/learn", "Back to Learning" }
            }
        }
    }
}

#[component]
pub fn LessonFailed(message: String) -> Element {
    rsx! {
        div { class: "centered",
            div {
                h1 { "Something went wrong" }
                p { "{message}" }
                a { class: "button primary", href: "/learn", "Back to Learning" }
            }
        }
    }
}

#[component]
pub fn LessonLoading() -> Element {
    rsx! {
        div { class: "centered",
            div {
                div { class: "spinner" }
                p { "Loading lesson..." }
            }
        }
    }
}

/// Landing page when the curriculum has no lessons yet.
#[component]
pub fn EmptyCurriculum() -> Element {
    rsx! {
        div { class: "centered",
            div {
                h1 { "No lessons yet" }
                p { "The curriculum is empty. Seed it with " code { "app seed" } " and reload." }
            }
        }
    }
}
