//! Registration page view. A successful sign-up performs the implicit
//! first login before navigating away.

use api::NewUser;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input};
use ui::{use_api, use_session, use_toasts, Session};

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let client = use_api();
    let mut session = use_session();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let mut toasts = use_toasts();
    let nav = use_navigator();

    // Already signed in: go to the profile
    if session().is_authenticated() {
        nav.replace(Route::Profile {});
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);

            let username_value = username().trim().to_string();
            let email_value = email().trim().to_string();
            let password_value = password();

            if username_value.is_empty() {
                error.set(Some("Username is required".to_string()));
                return;
            }
            if email_value.is_empty() || !email_value.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if password_value.len() < 8 {
                error.set(Some("Password must be at least 8 characters".to_string()));
                return;
            }
            if password_value != confirm_password() {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            loading.set(true);
            let new_user = NewUser {
                username: username_value,
                email: email_value,
                password: password_value,
            };
            match ui::sign_up(&client, &new_user).await {
                Ok(user) => {
                    session.set(Session::Authenticated(user));
                    toasts.success("Account created!");
                    nav.push(Route::Profile {});
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.message_or("Failed to create account").to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",

            h1 { "Create account" }
            p { class: "auth-page__subtitle", "Sign up for Modzart" }

            form {
                class: "auth-form",
                onsubmit: handle_register,

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                Input {
                    r#type: "text",
                    placeholder: "Username",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }

                Input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                Input {
                    r#type: "password",
                    placeholder: "Password (min 8 characters)",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                Input {
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: confirm_password(),
                    oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                }

                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign up" }
                }
            }

            p {
                class: "auth-page__switch",
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
