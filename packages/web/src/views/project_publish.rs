use api::{ExternalLink, FilePayload, LinkKind, ModKind, ProjectUpdate, Visibility};
use dioxus::prelude::*;

use ui::components::{Button, ButtonVariant, Input, Label, Textarea};
use ui::{use_api, use_error_toast, use_query, use_session, use_toasts};

use crate::Route;

/// Project editing and publishing checklist.
///
/// Loads the project plus its versions and gallery; a failure in either
/// subresource leaves the rest of the page usable. Saving re-fetches the
/// project so the form always reflects the backend's canonical copy.
#[component]
pub fn ProjectPublish(id: i64) -> Element {
    let mut id_signal = use_signal(|| id);
    if *id_signal.peek() != id {
        id_signal.set(id);
    }

    let client = use_api();
    let session = use_session();
    let mut toasts = use_toasts();
    let nav = use_navigator();

    let project_client = client.clone();
    let mut project_query = use_query(move || {
        let client = project_client.clone();
        let id = id_signal();
        async move { api::mods::get(&client, id).await }
    });
    use_error_toast(project_query, "Could not load project details");

    let versions_client = client.clone();
    let mut versions_query = use_query(move || {
        let client = versions_client.clone();
        let id = id_signal();
        async move { api::mods::versions(&client, id).await }
    });

    let gallery_client = client.clone();
    let mut gallery_query = use_query(move || {
        let client = gallery_client.clone();
        let id = id_signal();
        async move { api::mods::gallery(&client, id).await }
    });

    // Project details form
    let mut expanded = use_signal(|| false);
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut url = use_signal(String::new);
    let mut visibility = use_signal(|| Visibility::Public);
    let mut summary = use_signal(String::new);
    let mut license = use_signal(String::new);
    let mut links = use_signal(Vec::<ExternalLink>::new);

    // Dialogs
    let mut show_version_dialog = use_signal(|| false);
    let mut show_icon_dialog = use_signal(|| false);
    let mut show_gallery_dialog = use_signal(|| false);
    let mut show_links_dialog = use_signal(|| false);

    let mut version_number = use_signal(String::new);
    let mut changelog = use_signal(String::new);
    let mut version_file = use_signal(|| Option::<FilePayload>::None);
    let mut icon_file = use_signal(|| Option::<FilePayload>::None);
    let mut gallery_file = use_signal(|| Option::<FilePayload>::None);

    let mut new_link_kind = use_signal(|| LinkKind::Website);
    let mut new_link_url = use_signal(String::new);

    let mut saving = use_signal(|| false);

    // Re-populate the form whenever the project is (re)loaded.
    use_effect(move || {
        if let Some(project) = project_query.snapshot().data {
            title.set(project.title.clone());
            description.set(project.description.clone());
            summary.set(project.summary.clone().unwrap_or_default());
            license.set(project.license.clone().unwrap_or_default());
            links.set(project.external_links.clone());
            if let ModKind::Project {
                url: project_url,
                visibility: project_visibility,
            } = &project.kind
            {
                url.set(project_url.clone());
                visibility.set(*project_visibility);
            }
        }
    });

    let save_client = client.clone();
    // Shared by the details form, the description card and the license
    // card, so it lives behind a copyable handler.
    let handle_save = EventHandler::new(move |_: MouseEvent| {
        let client = save_client.clone();
        spawn(async move {
            if title().trim().is_empty() || url().trim().is_empty() || summary().trim().is_empty()
            {
                toasts.error("Please fill in all required fields");
                return;
            }

            saving.set(true);
            let payload = ProjectUpdate::for_project(
                title().trim().to_string(),
                description().trim().to_string(),
                url().trim(),
                visibility(),
                summary().trim().to_string(),
                license().trim().to_string(),
                links(),
            );
            match api::mods::update(&client, *id_signal.peek(), &payload).await {
                Ok(_) => {
                    toasts.success("Project updated successfully!");
                    project_query.refresh();
                }
                Err(err) => {
                    toasts.error(err.message_or("Failed to update project").to_string());
                }
            }
            saving.set(false);
        });
    });

    let review_client = client.clone();
    let handle_submit_review = move |_| {
        let client = review_client.clone();
        spawn(async move {
            saving.set(true);
            match api::mods::submit_for_review(&client, *id_signal.peek()).await {
                Ok(_) => {
                    toasts.success("Project submitted for review!");
                    project_query.refresh();
                }
                Err(err) => {
                    toasts.error(err.message_or("Failed to submit project for review").to_string());
                }
            }
            saving.set(false);
        });
    };

    let version_client = client.clone();
    let handle_version_submit = move |_| {
        let client = version_client.clone();
        spawn(async move {
            let number = version_number().trim().to_string();
            let Some(file) = version_file() else {
                toasts.error("Please provide a version number and file");
                return;
            };
            if number.is_empty() {
                toasts.error("Please provide a version number and file");
                return;
            }

            saving.set(true);
            match api::mods::upload_version(&client, *id_signal.peek(), &number, &changelog(), file)
                .await
            {
                Ok(_) => {
                    toasts.success("Version uploaded successfully!");
                    version_number.set(String::new());
                    changelog.set(String::new());
                    version_file.set(None);
                    show_version_dialog.set(false);
                    versions_query.refresh();
                }
                Err(err) => {
                    toasts.error(err.message_or("Failed to upload version").to_string());
                }
            }
            saving.set(false);
        });
    };

    let icon_client = client.clone();
    let handle_icon_submit = move |_| {
        let client = icon_client.clone();
        spawn(async move {
            let Some(file) = icon_file() else {
                toasts.error("Please select an icon image");
                return;
            };

            saving.set(true);
            match api::mods::upload_icon(&client, *id_signal.peek(), file).await {
                Ok(_) => {
                    toasts.success("Icon uploaded successfully!");
                    icon_file.set(None);
                    show_icon_dialog.set(false);
                    project_query.refresh();
                }
                Err(err) => {
                    toasts.error(err.message_or("Failed to upload icon").to_string());
                }
            }
            saving.set(false);
        });
    };

    let gallery_upload_client = client.clone();
    let handle_gallery_submit = move |_| {
        let client = gallery_upload_client.clone();
        spawn(async move {
            let Some(file) = gallery_file() else {
                toasts.error("Please select an image for the gallery");
                return;
            };

            saving.set(true);
            match api::mods::upload_gallery_image(&client, *id_signal.peek(), file).await {
                Ok(_) => {
                    toasts.success("Gallery image uploaded successfully!");
                    gallery_file.set(None);
                    gallery_query.refresh();
                }
                Err(err) => {
                    toasts.error(err.message_or("Failed to upload gallery image").to_string());
                }
            }
            saving.set(false);
        });
    };

    let gallery_delete_client = client.clone();
    let handle_gallery_delete = EventHandler::new(move |image_id: i64| {
        let client = gallery_delete_client.clone();
        let mut toasts = toasts;
        let mut gallery_query = gallery_query;
        spawn(async move {
            match api::mods::delete_gallery_image(&client, *id_signal.peek(), image_id).await {
                Ok(()) => {
                    toasts.success("Gallery image deleted");
                    gallery_query.refresh();
                }
                Err(err) => {
                    toasts.error(err.message_or("Failed to delete gallery image").to_string());
                }
            }
        });
    });

    let handle_add_link = move |_| {
        let link_url = new_link_url().trim().to_string();
        if link_url.is_empty() {
            toasts.error("Please enter a URL");
            return;
        }
        if url::Url::parse(&link_url).is_err() {
            toasts.error("Please enter a valid URL");
            return;
        }
        links.write().push(ExternalLink {
            kind: new_link_kind(),
            url: link_url,
        });
        new_link_kind.set(LinkKind::Website);
        new_link_url.set(String::new());
    };

    let links_client = client.clone();
    let handle_links_submit = move |_| {
        let client = links_client.clone();
        spawn(async move {
            saving.set(true);
            match api::mods::update_links(&client, *id_signal.peek(), &links()).await {
                Ok(_) => {
                    toasts.success("External links updated successfully!");
                    show_links_dialog.set(false);
                    project_query.refresh();
                }
                Err(err) => {
                    toasts.error(err.message_or("Failed to update external links").to_string());
                }
            }
            saving.set(false);
        });
    };

    let snapshot = project_query.snapshot();

    // Guards: load state, record kind, ownership.
    let Some(project) = snapshot.data else {
        return rsx! {
            div {
                class: "page",
                if snapshot.loading {
                    p { class: "empty-state", "Loading project details..." }
                } else {
                    div {
                        class: "error-state",
                        p { "Failed to load project details. Please try again later." }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| { nav.push(Route::Profile {}); },
                            "Back to Profile"
                        }
                    }
                }
            }
        };
    };

    if !project.is_project() {
        return rsx! {
            div {
                class: "page",
                div {
                    class: "error-state",
                    p { "This is not a project" }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| { nav.push(Route::Profile {}); },
                        "Back to Profile"
                    }
                }
            }
        };
    }

    let is_owner = session()
        .user()
        .map(|user| user.id == project.user_id)
        .unwrap_or(false);
    if !is_owner {
        return rsx! {
            div {
                class: "page",
                div {
                    class: "error-state",
                    p { "You do not have permission to edit this project" }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| { nav.push(Route::Profile {}); },
                        "Back to Profile"
                    }
                }
            }
        };
    }

    let versions = versions_query.snapshot().data.unwrap_or_default();
    let gallery = gallery_query.snapshot().data.unwrap_or_default();

    let has_version = !versions.is_empty();
    let has_description = !description().trim().is_empty();
    let has_icon = project.icon_url.is_some();
    let has_gallery = !gallery.is_empty();
    let has_links = !links().is_empty();
    let has_license = !license().trim().is_empty();
    let in_review = matches!(project.status.as_deref(), Some("in_review") | Some("published"));
    let can_submit = has_version && has_description && has_license && !in_review;

    rsx! {
        div {
            class: "page",

            div {
                class: "form-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| { nav.push(Route::Profile {}); },
                    "← Back to Profile"
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| expanded.set(!expanded()),
                    if expanded() { "Hide project details" } else { "Show project details" }
                }
            }

            if expanded() {
                div {
                    class: "panel",
                    h1 { "Edit project: {project.title}" }

                    div {
                        class: "form-field",
                        Label { html_for: "project-title", "Project name *" }
                        Input {
                            id: "project-title",
                            placeholder: "Your project name",
                            value: title(),
                            oninput: move |evt: FormEvent| title.set(evt.value()),
                        }
                    }
                    div {
                        class: "form-field",
                        Label { html_for: "project-url", "URL *" }
                        Input {
                            id: "project-url",
                            placeholder: "your-project",
                            value: url(),
                            oninput: move |evt: FormEvent| url.set(evt.value()),
                        }
                        p { class: "form-hint", "This is the public URL where your project will be accessible." }
                    }
                    div {
                        class: "form-field",
                        Label { html_for: "project-summary", "Summary *" }
                        Input {
                            id: "project-summary",
                            placeholder: "A short summary of your project",
                            value: summary(),
                            oninput: move |evt: FormEvent| summary.set(evt.value()),
                        }
                    }
                    div {
                        class: "form-field",
                        Label { html_for: "project-visibility", "Visibility *" }
                        select {
                            id: "project-visibility",
                            class: "input",
                            value: "{visibility().as_str()}",
                            onchange: move |evt| visibility.set(Visibility::parse(&evt.value())),
                            for option_value in Visibility::ALL {
                                option { value: "{option_value.as_str()}", "{option_value.label()}" }
                            }
                        }
                        p { class: "form-hint", "Controls who can see your project." }
                    }

                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: saving(),
                        onclick: handle_save,
                        if saving() { "Saving..." } else { "Save project details" }
                    }
                }
            }

            div {
                class: "panel",
                h1 { "Publishing checklist" }

                div {
                    class: "checklist-grid",

                    // Upload a version
                    div {
                        class: if has_version { "checklist-item checklist-item--done" } else { "checklist-item checklist-item--required" },
                        h3 { "Upload a version" }
                        p { "At least one version is required for a project to be submitted for review." }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| show_version_dialog.set(true),
                            if has_version { "Manage versions" } else { "Upload version" }
                        }
                        if !versions.is_empty() {
                            ul {
                                class: "checklist-item__list",
                                for version in &versions {
                                    li { key: "{version.version_number}", "{version.version_number}" }
                                }
                            }
                        }
                    }

                    // Add a description
                    div {
                        class: if has_description { "checklist-item checklist-item--done" } else { "checklist-item checklist-item--required" },
                        h3 { "Add a description" }
                        p { "A description that clearly describes the project's purpose and function is required." }
                        Textarea {
                            placeholder: "Detailed description of your project",
                            value: description(),
                            oninput: move |evt: FormEvent| description.set(evt.value()),
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            disabled: saving(),
                            onclick: handle_save,
                            if saving() { "Saving..." } else { "Save description" }
                        }
                    }

                    // Add an icon
                    div {
                        class: if has_icon { "checklist-item checklist-item--done" } else { "checklist-item" },
                        h3 { "Add an icon" }
                        p { "An icon uniquely identifies your project at a glance." }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| show_icon_dialog.set(true),
                            if has_icon { "Change icon" } else { "Upload icon" }
                        }
                        if let Some(icon_url) = &project.icon_url {
                            img { class: "checklist-item__icon", src: "{icon_url}", alt: "Project icon" }
                        }
                    }

                    // Feature a gallery image
                    div {
                        class: if has_gallery { "checklist-item checklist-item--done" } else { "checklist-item" },
                        h3 { "Feature a gallery image" }
                        p { "Featured gallery images may be the first impression of many users." }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| show_gallery_dialog.set(true),
                            if has_gallery { "Manage gallery" } else { "Add gallery images" }
                        }
                    }

                    // Add external links
                    div {
                        class: if has_links { "checklist-item checklist-item--done" } else { "checklist-item" },
                        h3 { "Add external links" }
                        p { "Add any relevant links, such as sources, issues, or a Discord invite." }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| show_links_dialog.set(true),
                            if has_links { "Manage links" } else { "Add external links" }
                        }
                    }

                    // Select license
                    div {
                        class: if has_license { "checklist-item checklist-item--done" } else { "checklist-item checklist-item--required" },
                        h3 { "Select license" }
                        p { "Select the license your project is distributed under." }
                        select {
                            class: "input",
                            value: "{license()}",
                            onchange: move |evt| {
                                license.set(evt.value());
                            },
                            option { value: "", "Select license" }
                            option { value: "MIT", "MIT License" }
                            option { value: "Apache-2.0", "Apache License 2.0" }
                            option { value: "GPL-3.0", "GNU GPL v3" }
                            option { value: "BSD-3-Clause", "BSD 3-Clause" }
                            option { value: "CC-BY-4.0", "Creative Commons BY 4.0" }
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            disabled: saving(),
                            onclick: handle_save,
                            "Save license"
                        }
                    }

                    // Submit for review
                    div {
                        class: if in_review { "checklist-item checklist-item--done" } else { "checklist-item" },
                        h3 { "Submit for review" }
                        p { "Your project must be reviewed by moderators in order to be published." }
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: !can_submit || saving(),
                            onclick: handle_submit_review,
                            if in_review { "Submitted for review" } else { "Submit for review" }
                        }
                    }
                }
            }

            if show_version_dialog() {
                div {
                    class: "panel",
                    h2 { "Upload version" }
                    div {
                        class: "form-field",
                        Label { html_for: "version-number", "Version number *" }
                        Input {
                            id: "version-number",
                            placeholder: "e.g. 1.0.0",
                            value: version_number(),
                            oninput: move |evt: FormEvent| version_number.set(evt.value()),
                        }
                        p { class: "form-hint", "Use semantic versioning (e.g. 1.0.0, 1.1.2)" }
                    }
                    div {
                        class: "form-field",
                        Label { html_for: "version-changelog", "Changelog" }
                        Textarea {
                            id: "version-changelog",
                            placeholder: "What's new in this version? (optional)",
                            value: changelog(),
                            oninput: move |evt: FormEvent| changelog.set(evt.value()),
                        }
                    }
                    div {
                        class: "form-field",
                        Label { html_for: "version-file", "Upload file *" }
                        input {
                            id: "version-file",
                            r#type: "file",
                            onchange: move |evt: FormEvent| async move {
                                if let Some(file_engine) = evt.files() {
                                    if let Some(name) = file_engine.files().first().cloned() {
                                        if let Some(bytes) = file_engine.read_file(&name).await {
                                            version_file.set(Some(FilePayload { name, bytes }));
                                        }
                                    }
                                }
                            },
                        }
                        if let Some(file) = version_file() {
                            p { class: "form-hint", "File size: {file.size_kb()} KB" }
                        }
                    }
                    div {
                        class: "form-actions",
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: saving(),
                            onclick: handle_version_submit,
                            if saving() { "Uploading..." } else { "Upload version" }
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| show_version_dialog.set(false),
                            "Cancel"
                        }
                    }
                }
            }

            if show_icon_dialog() {
                div {
                    class: "panel",
                    h2 { "Upload project icon" }
                    div {
                        class: "form-field",
                        Label { html_for: "icon-file", "Icon image *" }
                        input {
                            id: "icon-file",
                            r#type: "file",
                            accept: "image/*",
                            onchange: move |evt: FormEvent| async move {
                                if let Some(file_engine) = evt.files() {
                                    if let Some(name) = file_engine.files().first().cloned() {
                                        if let Some(bytes) = file_engine.read_file(&name).await {
                                            icon_file.set(Some(FilePayload { name, bytes }));
                                        }
                                    }
                                }
                            },
                        }
                        p { class: "form-hint", "Recommended: 512x512px" }
                    }
                    div {
                        class: "form-actions",
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: saving(),
                            onclick: handle_icon_submit,
                            if saving() { "Uploading..." } else { "Upload icon" }
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| show_icon_dialog.set(false),
                            "Cancel"
                        }
                    }
                }
            }

            if show_gallery_dialog() {
                div {
                    class: "panel",
                    h2 { "Gallery images" }
                    div {
                        class: "form-field",
                        Label { html_for: "gallery-file", "Upload new image" }
                        input {
                            id: "gallery-file",
                            r#type: "file",
                            accept: "image/*",
                            onchange: move |evt: FormEvent| async move {
                                if let Some(file_engine) = evt.files() {
                                    if let Some(name) = file_engine.files().first().cloned() {
                                        if let Some(bytes) = file_engine.read_file(&name).await {
                                            gallery_file.set(Some(FilePayload { name, bytes }));
                                        }
                                    }
                                }
                            },
                        }
                        p { class: "form-hint", "Recommended: 16:9 aspect ratio" }
                    }
                    div {
                        class: "form-actions",
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: saving(),
                            onclick: handle_gallery_submit,
                            if saving() { "Uploading..." } else { "Upload" }
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| show_gallery_dialog.set(false),
                            "Close"
                        }
                    }

                    if gallery.is_empty() {
                        p { class: "empty-state", "No images uploaded yet." }
                    } else {
                        div {
                            class: "gallery-grid",
                            for image in &gallery {
                                div {
                                    key: "{image.id}",
                                    class: "gallery-grid__item",
                                    img { src: "{image.url}", alt: "Gallery image" }
                                    Button {
                                        variant: ButtonVariant::Danger,
                                        onclick: {
                                            let image_id = image.id;
                                            move |_| handle_gallery_delete.call(image_id)
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if show_links_dialog() {
                div {
                    class: "panel",
                    h2 { "External links" }
                    div {
                        class: "form-field",
                        Label { html_for: "link-url", "Add link" }
                        div {
                            class: "form-actions",
                            select {
                                class: "input",
                                value: "{new_link_kind().as_str()}",
                                onchange: move |evt| new_link_kind.set(LinkKind::parse(&evt.value())),
                                for kind in LinkKind::ALL {
                                    option { value: "{kind.as_str()}", "{kind.label()}" }
                                }
                            }
                            Input {
                                id: "link-url",
                                placeholder: "https://",
                                value: new_link_url(),
                                oninput: move |evt: FormEvent| new_link_url.set(evt.value()),
                            }
                            Button {
                                variant: ButtonVariant::Outline,
                                onclick: handle_add_link,
                                "Add"
                            }
                        }
                    }

                    h3 { "Current links" }
                    if links().is_empty() {
                        p { class: "empty-state", "No links added yet." }
                    } else {
                        ul {
                            class: "link-list",
                            for (index, link) in links().into_iter().enumerate() {
                                li {
                                    key: "{link.url}",
                                    span { "{link.kind.label()}: {link.url}" }
                                    Button {
                                        variant: ButtonVariant::Outline,
                                        onclick: move |_| {
                                            links.write().remove(index);
                                        },
                                        "Remove"
                                    }
                                }
                            }
                        }
                    }

                    div {
                        class: "form-actions",
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: saving(),
                            onclick: handle_links_submit,
                            if saving() { "Saving..." } else { "Save links" }
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| show_links_dialog.set(false),
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}
