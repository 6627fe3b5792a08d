//! Session context and hooks for the UI.
//!
//! The session is a three-state machine owned by a context signal:
//!
//! ```text
//! Hydrating ──(persisted token valid)──▶ Authenticated
//!     │
//!     └─────(no token / token rejected)─▶ Unauthenticated
//! ```
//!
//! Hydration runs once at startup. A persisted token the backend no longer
//! accepts is discarded silently; the user simply starts logged out. Login
//! and registration move to `Authenticated`, logout clears the token and
//! moves back to `Unauthenticated` regardless of anything still in flight.

use api::{ApiClient, ApiError, NewUser, User};
use dioxus::prelude::*;
use std::sync::Arc;
use store::TokenStore;

/// Authentication state for the application.
#[derive(Clone, Debug, PartialEq)]
pub enum Session {
    /// Startup: a persisted token is being checked against the backend.
    Hydrating,
    /// No valid credential; login and register are available.
    Unauthenticated,
    /// A user is signed in.
    Authenticated(User),
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn is_hydrating(&self) -> bool {
        matches!(self, Session::Hydrating)
    }
}

/// Get the current session state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// Get the shared backend client.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

/// Create a platform-appropriate backend client.
///
/// On the web the token lives in `localStorage`; elsewhere an in-memory
/// store backs it (tests construct their own client instead).
pub fn make_client() -> ApiClient {
    let config = store::ClientConfig::default();
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        ApiClient::from_config(&config, Arc::new(store::LocalStorageTokens::new()))
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        ApiClient::from_config(&config, Arc::new(store::MemoryTokens::new()))
    }
}

/// Resolve the persisted token into an initial session state.
///
/// Any failure here (expired token, unreachable backend) lands in
/// `Unauthenticated` with the token discarded; hydration never surfaces an
/// error to the user.
pub async fn hydrate(client: &ApiClient) -> Session {
    if client.tokens().load().is_none() {
        return Session::Unauthenticated;
    }
    match api::auth::current_user(client).await {
        Ok(user) => Session::Authenticated(user),
        Err(err) => {
            tracing::debug!("persisted token rejected, starting unauthenticated: {err}");
            client.tokens().clear();
            Session::Unauthenticated
        }
    }
}

/// Exchange credentials for a token and fetch the signed-in user.
pub async fn sign_in(client: &ApiClient, username: &str, password: &str) -> Result<User, ApiError> {
    api::auth::login(client, username, password).await?;
    api::auth::current_user(client).await
}

/// Create an account, then perform the implicit first login.
pub async fn sign_up(client: &ApiClient, new_user: &NewUser) -> Result<User, ApiError> {
    api::auth::register(client, new_user).await?;
    sign_in(client, &new_user.username, &new_user.password).await
}

/// Clear the persisted token and drop back to `Unauthenticated`.
pub fn sign_out(client: &ApiClient, mut session: Signal<Session>) {
    client.tokens().clear();
    session.set(Session::Unauthenticated);
}

/// Provider component that manages the session state.
/// Wrap the app with this component (inside the client context) to enable
/// authentication.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let client = use_api();
    let mut session = use_signal(|| Session::Hydrating);

    // Check the persisted token on mount
    let _ = use_resource(move || {
        let client = client.clone();
        async move {
            session.set(hydrate(&client).await);
        }
    });

    use_context_provider(|| session);

    rsx! {
        {children}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use store::{MemoryTokens, TokenStore};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_with_token(server: &MockServer, token: Option<&str>) -> ApiClient {
        let tokens = MemoryTokens::new();
        if let Some(token) = token {
            tokens.save(token);
        }
        ApiClient::new(server.uri(), Arc::new(tokens))
    }

    #[tokio::test]
    async fn hydrate_without_token_is_unauthenticated() {
        let server = MockServer::start().await;
        let client = client_with_token(&server, None);
        // No /users/me mock mounted: hydration must not even call it.
        assert_eq!(hydrate(&client).await, Session::Unauthenticated);
    }

    #[tokio::test]
    async fn hydrate_with_valid_token_is_authenticated() {
        let server = MockServer::start().await;
        let client = client_with_token(&server, Some("tok123"));

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(header("authorization", "Bearer tok123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "username": "alice", "email": "alice@example.com"
            })))
            .mount(&server)
            .await;

        let session = hydrate(&client).await;
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("alice"));
    }

    #[tokio::test]
    async fn hydrate_discards_rejected_token_silently() {
        let server = MockServer::start().await;
        let client = client_with_token(&server, Some("stale"));

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})),
            )
            .mount(&server)
            .await;

        assert_eq!(hydrate(&client).await, Session::Unauthenticated);
        assert!(client.tokens().load().is_none());
    }

    #[tokio::test]
    async fn sign_in_fetches_the_user_behind_the_new_token() {
        let server = MockServer::start().await;
        let client = client_with_token(&server, None);

        Mock::given(method("POST"))
            .and(path("/auth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fresh", "token_type": "bearer"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "username": "alice", "email": "alice@example.com"
            })))
            .mount(&server)
            .await;

        let user = sign_in(&client, "alice", "hunter2").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(client.tokens().load().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn sign_up_registers_then_logs_in() {
        let server = MockServer::start().await;
        let client = client_with_token(&server, None);

        Mock::given(method("POST"))
            .and(path("/users/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 2, "username": "bob", "email": "bob@example.com"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "bobtok", "token_type": "bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 2, "username": "bob", "email": "bob@example.com"
            })))
            .mount(&server)
            .await;

        let user = sign_up(
            &client,
            &NewUser {
                username: "bob".to_string(),
                email: "bob@example.com".to_string(),
                password: "hunter2".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(user.id, 2);
        assert_eq!(client.tokens().load().as_deref(), Some("bobtok"));
    }
}
