//! Login page view with username/password form.

use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input};
use ui::{use_api, use_session, use_toasts, Session};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let client = use_api();
    let mut session = use_session();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let mut toasts = use_toasts();
    let nav = use_navigator();

    // Already signed in: go to the profile
    if session().is_authenticated() {
        nav.replace(Route::Profile {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);

            let username_value = username().trim().to_string();
            let password_value = password();

            if username_value.is_empty() || password_value.is_empty() {
                error.set(Some("Username and password are required".to_string()));
                return;
            }

            loading.set(true);
            match ui::sign_in(&client, &username_value, &password_value).await {
                Ok(user) => {
                    session.set(Session::Authenticated(user));
                    toasts.success("Successfully signed in!");
                    nav.push(Route::Profile {});
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.message_or("Failed to sign in").to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",

            h1 { "Sign in" }
            p { class: "auth-page__subtitle", "Welcome back to Modzart" }

            form {
                class: "auth-form",
                onsubmit: handle_login,

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                Input {
                    r#type: "text",
                    placeholder: "Username",
                    value: username(),
                    disabled: loading(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }

                Input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    disabled: loading(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "auth-page__switch",
                "Don't have an account? "
                Link { to: Route::Register {}, "Sign up" }
            }
        }
    }
}
