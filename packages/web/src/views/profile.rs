use std::time::Duration;

use api::{ApiError, FilePayload, ModQuery, NewProject, ProfileUpdate, Visibility};
use dioxus::prelude::*;

use ui::components::{Button, ButtonVariant, Input, Label, Textarea};
use ui::{use_api, use_error_toast_with, use_query, use_session, use_toasts, Session};

use crate::Route;

/// Deadline for the owned-content fetch; a slow backend should fail fast
/// here rather than leave the dashboard spinning.
const OWNED_MODS_DEADLINE: Duration = Duration::from_secs(8);

/// The signed-in user's dashboard: profile editing, owned mods and
/// projects, mod upload, and project creation.
#[component]
pub fn Profile() -> Element {
    let client = use_api();
    let mut session = use_session();
    let mut toasts = use_toasts();
    let nav = use_navigator();

    // Profile edit form
    let mut editing = use_signal(|| false);
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);

    // Create-project dialog
    let mut show_project_dialog = use_signal(|| false);
    let mut project_name = use_signal(String::new);
    let mut project_url = use_signal(String::new);
    let mut project_visibility = use_signal(|| Visibility::Public);
    let mut project_summary = use_signal(String::new);

    // Upload-mod dialog
    let mut show_upload_dialog = use_signal(|| false);
    let mut mod_title = use_signal(String::new);
    let mut mod_description = use_signal(String::new);
    let mut mod_file = use_signal(|| Option::<FilePayload>::None);

    let mut saving = use_signal(|| false);

    let list_client = client.clone();
    let mut mods = use_query(move || {
        let client = list_client.clone().with_timeout(OWNED_MODS_DEADLINE);
        let user_id = session().user().map(|u| u.id);
        async move {
            match user_id {
                Some(id) => api::mods::list(&client, &ModQuery::by_user(id)).await,
                None => Ok(Vec::new()),
            }
        }
    });
    use_error_toast_with(mods, |err| {
        match err {
            ApiError::Timeout => {
                "Request timed out. Please check if the backend server is running.".to_string()
            }
            ApiError::Network(_) => "Cannot connect to the backend server. Is it running?".to_string(),
            _ => "Could not load your content. Please try again later.".to_string(),
        }
    });

    let save_client = client.clone();
    let handle_save_profile = move |_| {
        let client = save_client.clone();
        spawn(async move {
            let profile = ProfileUpdate {
                username: username().trim().to_string(),
                email: email().trim().to_string(),
            };
            if profile.username.is_empty() || profile.email.is_empty() {
                toasts.error("Username and email are required");
                return;
            }
            match api::auth::update_profile(&client, &profile).await {
                Ok(user) => {
                    session.set(Session::Authenticated(user));
                    editing.set(false);
                    toasts.success("Profile updated successfully");
                }
                Err(err) => {
                    toasts.error(err.message_or("Failed to update profile").to_string());
                }
            }
        });
    };

    let create_client = client.clone();
    let handle_create_project = move |_| {
        let client = create_client.clone();
        spawn(async move {
            let project = NewProject {
                name: project_name().trim().to_string(),
                url: project_url().trim().to_string(),
                visibility: project_visibility(),
                summary: project_summary().trim().to_string(),
            };
            // Required fields are checked before any request is issued.
            if let Err(message) = project.validate() {
                toasts.error(message);
                return;
            }

            saving.set(true);
            match api::mods::create_project(&client, &project).await {
                Ok(_) => {
                    show_project_dialog.set(false);
                    toasts.success("Project created successfully!");
                    project_name.set(String::new());
                    project_url.set(String::new());
                    project_visibility.set(Visibility::Public);
                    project_summary.set(String::new());
                    mods.refresh();
                }
                Err(err) => {
                    toasts.error(err.message_or("Failed to create project").to_string());
                }
            }
            saving.set(false);
        });
    };

    let upload_client = client.clone();
    let handle_upload_mod = move |_| {
        let client = upload_client.clone();
        spawn(async move {
            let title = mod_title().trim().to_string();
            let description = mod_description().trim().to_string();
            let Some(file) = mod_file() else {
                toasts.error("Please select a file to upload");
                return;
            };
            if title.is_empty() || description.is_empty() {
                toasts.error("Please fill in all required fields");
                return;
            }

            saving.set(true);
            match api::mods::create(&client, &title, &description, file).await {
                Ok(_) => {
                    show_upload_dialog.set(false);
                    toasts.success("Mod uploaded!");
                    mod_title.set(String::new());
                    mod_description.set(String::new());
                    mod_file.set(None);
                    mods.refresh();
                }
                Err(err) => {
                    toasts.error(err.message_or("Failed to upload mod").to_string());
                }
            }
            saving.set(false);
        });
    };

    let delete_client = client.clone();
    let handle_delete = EventHandler::new(move |id: i64| {
        let client = delete_client.clone();
        let mut mods = mods;
        let mut toasts = toasts;
        spawn(async move {
            match api::mods::delete(&client, id).await {
                Ok(()) => {
                    toasts.success("Mod deleted");
                    mods.refresh();
                }
                Err(err) => {
                    toasts.error(err.message_or("Failed to delete mod").to_string());
                }
            }
        });
    });

    // Session guards: hydration shows a placeholder, logged-out users get
    // a pointer to the login page.
    let current = session();
    if current.is_hydrating() {
        return rsx! {
            div { class: "page", p { class: "empty-state", "Loading..." } }
        };
    }
    let Some(user) = current.user().cloned() else {
        return rsx! {
            div {
                class: "page",
                p { class: "empty-state", "Please log in to view your profile" }
                Link { class: "btn btn--primary", to: Route::Login {}, "Sign in" }
            }
        };
    };

    let snapshot = mods.snapshot();
    let edit_user = user.clone();

    rsx! {
        div {
            class: "page",

            div {
                class: "profile-header",
                if let Some(avatar_url) = &user.avatar_url {
                    img { class: "profile-header__avatar", src: "{avatar_url}", alt: "Avatar" }
                }
                div {
                    h1 { "{user.username}" }
                    p { class: "profile-header__email", "{user.email}" }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| {
                        username.set(edit_user.username.clone());
                        email.set(edit_user.email.clone());
                        editing.set(true);
                    },
                    "Edit profile"
                }
            }

            if editing() {
                div {
                    class: "panel",
                    h2 { "Edit profile" }
                    div {
                        class: "form-field",
                        Label { html_for: "profile-username", "Username" }
                        Input {
                            id: "profile-username",
                            value: username(),
                            oninput: move |evt: FormEvent| username.set(evt.value()),
                        }
                    }
                    div {
                        class: "form-field",
                        Label { html_for: "profile-email", "Email" }
                        Input {
                            id: "profile-email",
                            r#type: "email",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                    div {
                        class: "form-actions",
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: handle_save_profile,
                            "Save"
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| editing.set(false),
                            "Cancel"
                        }
                    }
                }
            }

            div {
                class: "profile-actions",
                h2 { "Your content" }
                div {
                    class: "form-actions",
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| show_upload_dialog.set(true),
                        "Upload mod"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| show_project_dialog.set(true),
                        "Create project"
                    }
                }
            }

            if show_upload_dialog() {
                div {
                    class: "panel",
                    h2 { "Upload a mod" }
                    div {
                        class: "form-field",
                        Label { html_for: "mod-title", "Title *" }
                        Input {
                            id: "mod-title",
                            placeholder: "Your mod's name",
                            value: mod_title(),
                            oninput: move |evt: FormEvent| mod_title.set(evt.value()),
                        }
                    }
                    div {
                        class: "form-field",
                        Label { html_for: "mod-description", "Description *" }
                        Textarea {
                            id: "mod-description",
                            placeholder: "What does your mod do?",
                            value: mod_description(),
                            oninput: move |evt: FormEvent| mod_description.set(evt.value()),
                        }
                    }
                    div {
                        class: "form-field",
                        Label { html_for: "mod-file", "File *" }
                        input {
                            id: "mod-file",
                            r#type: "file",
                            onchange: move |evt: FormEvent| async move {
                                if let Some(file_engine) = evt.files() {
                                    if let Some(name) = file_engine.files().first().cloned() {
                                        if let Some(bytes) = file_engine.read_file(&name).await {
                                            mod_file.set(Some(FilePayload { name, bytes }));
                                        }
                                    }
                                }
                            },
                        }
                        if let Some(file) = mod_file() {
                            p { class: "form-hint", "Selected: {file.name} ({file.size_kb()} KB)" }
                        }
                    }
                    div {
                        class: "form-actions",
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: saving(),
                            onclick: handle_upload_mod,
                            if saving() { "Uploading..." } else { "Upload" }
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| show_upload_dialog.set(false),
                            "Cancel"
                        }
                    }
                }
            }

            if show_project_dialog() {
                div {
                    class: "panel",
                    h2 { "Create a project" }
                    div {
                        class: "form-field",
                        Label { html_for: "project-name", "Project name *" }
                        Input {
                            id: "project-name",
                            placeholder: "Your project name",
                            value: project_name(),
                            oninput: move |evt: FormEvent| project_name.set(evt.value()),
                        }
                    }
                    div {
                        class: "form-field",
                        Label { html_for: "project-url", "URL *" }
                        Input {
                            id: "project-url",
                            placeholder: "your-project",
                            value: project_url(),
                            oninput: move |evt: FormEvent| project_url.set(evt.value()),
                        }
                        p { class: "form-hint", "The public URL where your project will be accessible." }
                    }
                    div {
                        class: "form-field",
                        Label { html_for: "project-visibility", "Visibility *" }
                        select {
                            id: "project-visibility",
                            class: "input",
                            value: "{project_visibility().as_str()}",
                            onchange: move |evt| project_visibility.set(Visibility::parse(&evt.value())),
                            for visibility in Visibility::ALL {
                                option { value: "{visibility.as_str()}", "{visibility.label()}" }
                            }
                        }
                        p { class: "form-hint", "The visibility of your project after it has been approved." }
                    }
                    div {
                        class: "form-field",
                        Label { html_for: "project-summary", "Summary *" }
                        Input {
                            id: "project-summary",
                            placeholder: "A sentence or two that describes your project.",
                            value: project_summary(),
                            oninput: move |evt: FormEvent| project_summary.set(evt.value()),
                        }
                    }
                    div {
                        class: "form-actions",
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: saving(),
                            onclick: handle_create_project,
                            "Create project"
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| show_project_dialog.set(false),
                            "Cancel"
                        }
                    }
                }
            }

            if snapshot.loading && snapshot.data.is_none() {
                p { class: "empty-state", "Loading your content..." }
            } else if let Some(items) = snapshot.data {
                if items.is_empty() {
                    div {
                        class: "empty-state",
                        h3 { "Nothing here yet" }
                        p { "Upload a mod or create a project to get started." }
                    }
                } else {
                    div {
                        class: "profile-mod-list",
                        for item in items {
                            div {
                                key: "{item.id}",
                                class: "profile-mod-row",
                                div {
                                    class: "profile-mod-row__info",
                                    strong { "{item.title}" }
                                    if item.is_project() {
                                        span { class: "mod-card__badge", "Project" }
                                    }
                                    span { class: "profile-mod-row__meta", "{item.downloads} downloads" }
                                }
                                div {
                                    class: "form-actions",
                                    if item.is_project() {
                                        Button {
                                            variant: ButtonVariant::Outline,
                                            onclick: {
                                                let id = item.id;
                                                move |_| { nav.push(Route::ProjectPublish { id }); }
                                            },
                                            "Manage"
                                        }
                                    }
                                    Button {
                                        variant: ButtonVariant::Outline,
                                        onclick: {
                                            let id = item.id;
                                            move |_| { nav.push(Route::ModDetail { id }); }
                                        },
                                        "View"
                                    }
                                    Button {
                                        variant: ButtonVariant::Danger,
                                        onclick: {
                                            let id = item.id;
                                            move |_| handle_delete.call(id)
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
