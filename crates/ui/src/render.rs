//! Server-side rendering of complete HTML documents.

use dioxus::prelude::*;

use crate::views::{
    EmptyCurriculum, LessonFailed, LessonLoading, LessonNotFound, LessonPage, Sidebar,
};
use crate::vm::{LessonViewState, SidebarVm};

const STYLESHEET: &str = include_str!("../assets/style.css");

/// What the main pane shows next to the sidebar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageBody {
    Lesson(LessonViewState),
    EmptyCurriculum,
}

impl PageBody {
    fn title(&self) -> String {
        match self {
            Self::Lesson(LessonViewState::Ready(vm)) => format!("{} | Learn", vm.title),
            Self::Lesson(LessonViewState::NotFound) => "Lesson Not Found | Learn".to_owned(),
            Self::Lesson(LessonViewState::Failed(_)) => "Something went wrong | Learn".to_owned(),
            Self::Lesson(LessonViewState::Loading) | Self::EmptyCurriculum => "Learn".to_owned(),
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct LearnDocumentProps {
    title: String,
    sidebar: SidebarVm,
    body: PageBody,
}

#[component]
fn LearnDocument(props: LearnDocumentProps) -> Element {
    let LearnDocumentProps {
        title,
        sidebar,
        body,
    } = props;

    rsx! {
        html { lang: "en",
            head {
                meta { charset: "utf-8" }
                meta { name: "viewport", content: "width=device-width, initial-scale=1" }
                title { "{title}" }
                style { dangerous_inner_html: STYLESHEET }
            }
            body {
                div { class: "learn-layout",
                    aside { class: "sidebar",
                        Sidebar { sidebar }
                    }
                    main { class: "main",
                        match body {
                            PageBody::Lesson(LessonViewState::Ready(vm)) => rsx! {
                                LessonPage { vm: *vm }
                            },
                            PageBody::Lesson(LessonViewState::NotFound) => rsx! {
                                LessonNotFound {}
                            },
                            PageBody::Lesson(LessonViewState::Failed(message)) => rsx! {
                                LessonFailed { message }
                            },
                            PageBody::Lesson(LessonViewState::Loading) => rsx! {
                                LessonLoading {}
                            },
                            PageBody::EmptyCurriculum => rsx! {
                                EmptyCurriculum {}
                            },
                        }
                    }
                }
            }
        }
    }
}

/// Render a full `<!DOCTYPE html>` page.
#[must_use]
pub fn render_page(sidebar: SidebarVm, body: PageBody) -> String {
    let mut dom = VirtualDom::new_with_props(
        LearnDocument,
        LearnDocumentProps {
            title: body.title(),
            sidebar,
            body,
        },
    );
    dom.rebuild_in_place();
    format!("<!DOCTYPE html>{}", dioxus_ssr::render(&dom))
}
