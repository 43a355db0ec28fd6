use dioxus::prelude::*;

use super::scripts::KEYBOARD_NAVIGATION_SCRIPT;

#[component]
pub fn KeyboardHelp() -> Element {
    rsx! {
        div { class: "keyboard-help",
            div { "← → Navigate lessons" }
            div { "Ctrl+C Mark complete" }
        }
        script { dangerous_inner_html: KEYBOARD_NAVIGATION_SCRIPT }
    }
}
