use dioxus::prelude::*;

use ui::{use_api, use_session, Navbar, SessionProvider, ToastProvider};
use views::{Discover, Home, Login, ModDetail, Profile, ProjectPublish, Register};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/discover")]
        Discover {},
        #[route("/mods/:id")]
        ModDetail { id: i64 },
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/profile")]
        Profile {},
        #[route("/project-publish/:id")]
        ProjectPublish { id: i64 },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // One shared backend client for every view; the session and all
    // service calls read the same persisted token through it.
    use_context_provider(ui::make_client);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            ToastProvider {
                Router::<Route> {}
            }
        }
    }
}

/// Header shown on every page.
#[component]
fn Shell() -> Element {
    let client = use_api();
    let session = use_session();
    let nav = use_navigator();

    let handle_sign_out = move |_| {
        ui::sign_out(&client, session);
        nav.push(Route::Home {});
    };

    let current = session();

    rsx! {
        Navbar {
            Link { class: "navbar__brand", to: Route::Home {}, "Modzart" }
            Link { to: Route::Discover {}, "Discover" }
            div {
                class: "navbar__spacer",
            }
            if let Some(user) = current.user() {
                Link { to: Route::Profile {}, "{user.username}" }
                button {
                    class: "btn btn--outline",
                    onclick: handle_sign_out,
                    "Sign out"
                }
            } else {
                Link { to: Route::Login {}, "Sign in" }
                Link { class: "btn btn--primary", to: Route::Register {}, "Sign up" }
            }
        }

        Outlet::<Route> {}
    }
}
