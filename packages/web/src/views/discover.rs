use api::{ApiError, ModQuery};
use dioxus::prelude::*;

use ui::components::Input;
use ui::{use_api, use_error_toast, use_query, use_toasts, ModCard};

use super::open_in_new_tab;
use crate::Route;

/// Search and browse all mods and projects.
///
/// The listing re-fetches as the search text changes; a stale response
/// from an earlier keystroke can never overwrite a newer one (the query
/// hook discards superseded completions).
#[component]
pub fn Discover() -> Element {
    let client = use_api();
    let mut search = use_signal(String::new);
    let toasts = use_toasts();
    let nav = use_navigator();

    let list_client = client.clone();
    let mods = use_query(move || {
        let client = list_client.clone();
        let query = ModQuery::search(search());
        async move { api::mods::list(&client, &query).await }
    });
    use_error_toast(mods, "Could not load mods");

    let handle_download = EventHandler::new(move |id: i64| {
        let client = client.clone();
        let mut toasts = toasts;
        spawn(async move {
            match api::mods::download(&client, id).await {
                Ok(url) => {
                    open_in_new_tab(&url);
                    toasts.success("Download started!");
                }
                Err(err) => {
                    toasts
                        .error(err.message_or("Download failed. Please try again.").to_string());
                }
            }
        });
    });

    let snapshot = mods.snapshot();

    rsx! {
        div {
            class: "page",
            h1 { "Discover" }

            Input {
                class: "search-input",
                placeholder: "Search mods...",
                value: search(),
                oninput: move |evt: FormEvent| search.set(evt.value()),
            }

            if snapshot.loading && snapshot.data.is_none() {
                p { class: "empty-state", "Loading mods..." }
            } else if let Some(err) = &snapshot.error {
                div {
                    class: "error-state",
                    p { "Failed to load mods. Please try again later." }
                    if matches!(err, ApiError::Network(_)) {
                        p { class: "error-state__hint", "Cannot connect to the backend. Is it running?" }
                    }
                }
            } else if let Some(mods) = snapshot.data {
                if mods.is_empty() {
                    div {
                        class: "empty-state",
                        h3 { "No mods found" }
                        p { "Try adjusting your search or filters" }
                    }
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
                                on_download: handle_download,
                            }
                        }
                    }
                }
            }
        }
    }
}
