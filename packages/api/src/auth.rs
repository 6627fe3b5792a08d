//! Authentication and account operations.
//!
//! `login` is the one place a credential enters the system: on success the
//! returned access token is written to the client's token store, so every
//! later request picks it up automatically.

use store::TokenStore;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{NewUser, ProfileUpdate, TokenResponse, User};

/// Exchange credentials for a bearer token and persist it.
///
/// The token endpoint is form-encoded, not JSON.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<TokenResponse> {
    let token: TokenResponse = client
        .post_form(
            "/auth/token",
            &[("username", username), ("password", password)],
        )
        .await?;
    client.tokens().save(&token.access_token);
    Ok(token)
}

/// Create a new account.
pub async fn register(client: &ApiClient, user: &NewUser) -> Result<User> {
    client.post_json("/users/", user).await
}

/// Fetch the user the current token belongs to.
pub async fn current_user(client: &ApiClient) -> Result<User> {
    client.get_json("/users/me").await
}

/// Update the current user's profile fields.
pub async fn update_profile(client: &ApiClient, profile: &ProfileUpdate) -> Result<User> {
    client.put_json("/users/me", profile).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use store::MemoryTokens;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn login_persists_token_for_subsequent_requests() {
        let server = MockServer::start().await;
        let client = ApiClient::new(server.uri(), Arc::new(MemoryTokens::new()));

        Mock::given(method("POST"))
            .and(path("/auth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok456", "token_type": "bearer"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(header("authorization", "Bearer tok456"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "username": "alice", "email": "alice@example.com"
            })))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client.tokens().load().is_none());
        login(&client, "alice", "hunter2").await.unwrap();
        assert_eq!(client.tokens().load().as_deref(), Some("tok456"));

        let user = current_user(&client).await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn rejected_login_does_not_persist_a_token() {
        let server = MockServer::start().await;
        let client = ApiClient::new(server.uri(), Arc::new(MemoryTokens::new()));

        Mock::given(method("POST"))
            .and(path("/auth/token"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let err = login(&client, "alice", "wrong").await.unwrap_err();
        assert_eq!(err.detail(), Some("Invalid credentials"));
        assert!(client.tokens().load().is_none());
    }

    #[tokio::test]
    async fn register_posts_the_user_payload() {
        let server = MockServer::start().await;
        let client = ApiClient::new(server.uri(), Arc::new(MemoryTokens::new()));

        Mock::given(method("POST"))
            .and(path("/users/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 2, "username": "bob", "email": "bob@example.com"
            })))
            .mount(&server)
            .await;

        let user = register(
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
    }
}
