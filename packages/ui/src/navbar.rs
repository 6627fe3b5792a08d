use dioxus::prelude::*;

/// Top navigation bar; the app decides which links and session controls
/// to place inside it.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        nav {
            class: "navbar",
            {children}
        }
    }
}
