use dioxus::prelude::*;

use ui::{use_api, use_error_toast, use_query, use_toasts};

use super::open_in_new_tab;

/// Detail page for a single mod or project.
///
/// Versions and gallery are fetched alongside the record itself; a failure
/// in either subresource never takes down the page.
#[component]
pub fn ModDetail(id: i64) -> Element {
    // Track the route param in a signal so the queries re-run when the
    // user navigates between detail pages.
    let mut id_signal = use_signal(|| id);
    if *id_signal.peek() != id {
        id_signal.set(id);
    }

    let client = use_api();
    let mut toasts = use_toasts();

    let detail_client = client.clone();
    let detail = use_query(move || {
        let client = detail_client.clone();
        let id = id_signal();
        async move { api::mods::get(&client, id).await }
    });
    use_error_toast(detail, "Could not load mod details");

    let versions_client = client.clone();
    let versions = use_query(move || {
        let client = versions_client.clone();
        let id = id_signal();
        async move { api::mods::versions(&client, id).await }
    });

    let gallery_client = client.clone();
    let gallery = use_query(move || {
        let client = gallery_client.clone();
        let id = id_signal();
        async move { api::mods::gallery(&client, id).await }
    });

    let handle_download = move |_| {
        let client = client.clone();
        let id = *id_signal.peek();
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
    };

    let snapshot = detail.snapshot();

    rsx! {
        div {
            class: "page",

            if let Some(item) = snapshot.data {
                div {
                    class: "mod-detail__header",
                    if let Some(icon_url) = &item.icon_url {
                        img { class: "mod-detail__icon", src: "{icon_url}", alt: "{item.title} icon" }
                    }
                    div {
                        h1 { "{item.title}" }
                        div {
                            class: "mod-detail__meta",
                            if item.is_project() {
                                span { class: "mod-card__badge", "Project" }
                            }
                            span { "{item.downloads} downloads" }
                            if let Some(uploader) = &item.uploader {
                                span { "by {uploader.username}" }
                            }
                            span { "added {item.created_at}" }
                        }
                    }
                    if !item.is_project() {
                        button {
                            class: "btn btn--primary",
                            onclick: handle_download,
                            "Download"
                        }
                    }
                }

                if let Some(summary) = &item.summary {
                    p { class: "mod-detail__summary", "{summary}" }
                }

                div {
                    class: "mod-detail__description",
                    h2 { "Description" }
                    p { "{item.description}" }
                }

                if item.is_project() {
                    if let Some(license) = &item.license {
                        p { class: "mod-detail__license", "License: {license}" }
                    }

                    if !item.external_links.is_empty() {
                        div {
                            class: "mod-detail__links",
                            h2 { "Links" }
                            for link in &item.external_links {
                                a {
                                    href: "{link.url}",
                                    target: "_blank",
                                    "{link.kind.label()}"
                                }
                            }
                        }
                    }

                    div {
                        class: "mod-detail__versions",
                        h2 { "Versions" }
                        if let Some(versions) = versions.snapshot().data {
                            if versions.is_empty() {
                                p { class: "empty-state", "No versions published yet." }
                            } else {
                                ul {
                                    for version in versions {
                                        li {
                                            key: "{version.version_number}",
                                            strong { "{version.version_number}" }
                                            if !version.changelog.is_empty() {
                                                p { "{version.changelog}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }

                    if let Some(images) = gallery.snapshot().data {
                        if !images.is_empty() {
                            div {
                                class: "mod-detail__gallery",
                                h2 { "Gallery" }
                                div {
                                    class: "gallery-grid",
                                    for image in images {
                                        img {
                                            key: "{image.id}",
                                            src: "{image.url}",
                                            alt: "Gallery image",
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            } else if snapshot.loading {
                p { class: "empty-state", "Loading mod details..." }
            } else {
                div {
                    class: "error-state",
                    p { "Failed to load mod details. Please try again later." }
                }
            }
        }
    }
}
