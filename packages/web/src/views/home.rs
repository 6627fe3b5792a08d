use api::ModQuery;
use dioxus::prelude::*;

use ui::{use_api, use_query, ModCard};

use crate::Route;

/// Landing page: hero plus a strip of the most recent uploads.
#[component]
pub fn Home() -> Element {
    let client = use_api();
    let nav = use_navigator();

    let recent = use_query(move || {
        let client = client.clone();
        async move { api::mods::list(&client, &ModQuery::all().limit(6)).await }
    });

    let snapshot = recent.snapshot();

    rsx! {
        div {
            class: "hero",
            h1 { "Share your mods with the world" }
            p { "Browse, download, and publish mods and projects." }
            Link {
                class: "btn btn--primary",
                to: Route::Discover {},
                "Start exploring"
            }
        }

        div {
            class: "page",
            h2 { "Recently added" }
            if let Some(mods) = snapshot.data {
                if mods.is_empty() {
                    p { class: "empty-state", "Nothing here yet — be the first to upload." }
                } else {
                    div {
                        class: "mod-grid",
                        for item in mods {
                            ModCard {
                                key: "{item.id}",
                                item: item.clone(),
                                on_select: move |id| {
                                    nav.push(Route::ModDetail { id });
                                },
                            }
                        }
                    }
                }
            } else if snapshot.loading {
                p { class: "empty-state", "Loading mods..." }
            }
        }
    }
}
