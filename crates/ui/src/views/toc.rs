use dioxus::prelude::*;

use crate::vm::TocItem;

/// Anchor list for the lesson headings. Renders nothing for a lesson without headings.
#[component]
pub fn TableOfContents(items: Vec<TocItem>) -> Element {
    if items.is_empty() {
        return rsx! {};
    }

    rsx! {
        nav { class: "toc",
            h3 { "Table of Contents" }
            for (idx, item) in items.iter().enumerate() {
                a {
                    key: "{idx}",
                    class: "level-{item.level}",
                    href: "#{item.id}",
                    "{item.title}"
                }
            }
        }
    }
}
