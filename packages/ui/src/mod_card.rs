//! Listing card for a mod or project.

use api::Mod;
use dioxus::prelude::*;

/// One entry in a mod grid. Clicking anywhere on the card selects it;
/// projects get a badge so they are distinguishable at a glance. When an
/// `on_download` handler is given, a download button is rendered too.
#[component]
pub fn ModCard(
    item: Mod,
    on_select: EventHandler<i64>,
    on_download: Option<EventHandler<i64>>,
) -> Element {
    let id = item.id;
    let blurb = item
        .summary
        .clone()
        .unwrap_or_else(|| item.description.clone());

    rsx! {
        div {
            class: "mod-card",
            onclick: move |_| on_select.call(id),

            if let Some(icon_url) = &item.icon_url {
                img {
                    class: "mod-card__icon",
                    src: "{icon_url}",
                    alt: "{item.title} icon",
                }
            }

            div {
                class: "mod-card__body",
                div {
                    class: "mod-card__title-row",
                    h3 { class: "mod-card__title", "{item.title}" }
                    if item.is_project() {
                        span { class: "mod-card__badge", "Project" }
                    }
                }
                p { class: "mod-card__blurb", "{blurb}" }
                div {
                    class: "mod-card__meta",
                    span { "{item.downloads} downloads" }
                    if let Some(uploader) = &item.uploader {
                        span { "by {uploader.username}" }
                    }
                }
                if let Some(handler) = on_download {
                    button {
                        class: "btn btn--primary mod-card__download",
                        onclick: move |evt| {
                            evt.stop_propagation();
                            handler.call(id);
                        },
                        "Download"
                    }
                }
            }
        }
    }
}
