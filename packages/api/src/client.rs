//! # HTTP client wrapper
//!
//! [`ApiClient`] is the single place where requests acquire their shared
//! shape: the configured base address, the JSON content-type default, the
//! per-request deadline, and the bearer token read from the injected
//! [`TokenStore`] at send time. The token store is the only shared mutable
//! resource in the client; reading it on every request means login and
//! logout take effect immediately for all in-flight views.
//!
//! Failures are folded into the [`ApiError`] taxonomy here so call sites
//! only ever see timeout / network / server-error / decode. A network-level
//! failure additionally logs a diagnostic, since the most common cause
//! during development is simply a backend that is not running.

use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use store::{ClientConfig, SharedTokens, TokenStore};

use crate::error::{ApiError, Result};

/// Error body shape the backend uses for structured failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// A configured client for the Modzart backend.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: SharedTokens,
    timeout: Duration,
}

impl ApiClient {
    /// Build a client against the given base address.
    pub fn new(base_url: impl Into<String>, tokens: SharedTokens) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            http,
            base_url,
            tokens,
            timeout: Duration::from_secs(10),
        }
    }

    /// Build a client from a [`ClientConfig`].
    pub fn from_config(config: &ClientConfig, tokens: SharedTokens) -> Self {
        let mut client = Self::new(config.api.base_url.clone(), tokens);
        client.timeout = Duration::from_secs(config.api.timeout_secs);
        client
    }

    /// A copy of this client with a different request deadline.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut client = self.clone();
        client.timeout = timeout;
        client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &SharedTokens {
        &self.tokens
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .timeout(self.timeout);
        if let Some(token) = self.tokens.load() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                tracing::error!("cannot reach the backend: {e}");
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            return Err(ApiError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Self::decode(response).await
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        Self::decode(response).await
    }

    /// POST a form-encoded body (the token endpoint is not JSON).
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .send(self.request(Method::POST, path).form(fields))
            .await?;
        Self::decode(response).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let response = self
            .send(self.request(Method::POST, path).multipart(form))
            .await?;
        Self::decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use store::MemoryTokens;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(server.uri(), Arc::new(MemoryTokens::new()))
    }

    #[tokio::test]
    async fn bearer_token_is_attached_when_present() {
        let server = MockServer::start().await;
        let client = client_for(&server);
        client.tokens().save("tok123");

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(header("authorization", "Bearer tok123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "username": "alice", "email": "alice@example.com"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user: crate::models::User = client.get_json("/users/me").await.unwrap();
        assert_eq!(user.username, "alice");
    }

    struct NoAuthHeader;

    impl wiremock::Match for NoAuthHeader {
        fn matches(&self, request: &wiremock::Request) -> bool {
            !request.headers.contains_key("authorization")
        }
    }

    #[tokio::test]
    async fn cleared_token_stops_bearer_attachment() {
        let server = MockServer::start().await;
        let client = client_for(&server);
        client.tokens().save("tok123");
        client.tokens().clear();

        Mock::given(method("GET"))
            .and(path("/mods/"))
            .and(NoAuthHeader)
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mods: Vec<crate::models::ModRecord> = client.get_json("/mods/").await.unwrap();
        assert!(mods.is_empty());
    }

    #[tokio::test]
    async fn error_status_carries_backend_detail() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        Mock::given(method("GET"))
            .and(path("/mods/99"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Mod not found"})),
            )
            .mount(&server)
            .await;

        let err = client
            .get_json::<crate::models::ModRecord>("/mods/99")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.detail(), Some("Mod not found"));
    }

    #[tokio::test]
    async fn error_status_without_body_has_no_detail() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        Mock::given(method("DELETE"))
            .and(path("/mods/5"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client.delete("/mods/5").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.detail(), None);
    }

    #[tokio::test]
    async fn deadline_expiry_is_a_timeout_error() {
        let server = MockServer::start().await;
        let client = client_for(&server).with_timeout(Duration::from_millis(50));

        Mock::given(method("GET"))
            .and(path("/mods/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = client
            .get_json::<Vec<crate::models::ModRecord>>("/mods/")
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        // Port 9 (discard) is never listening locally.
        let client = ApiClient::new("http://127.0.0.1:9", Arc::new(MemoryTokens::new()));
        let err = client
            .get_json::<Vec<crate::models::ModRecord>>("/mods/")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn form_post_is_urlencoded() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        Mock::given(method("POST"))
            .and(path("/auth/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("username=alice"))
            .and(body_string_contains("password=hunter2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok123", "token_type": "bearer"
            })))
            .mount(&server)
            .await;

        let token: crate::models::TokenResponse = client
            .post_form("/auth/token", &[("username", "alice"), ("password", "hunter2")])
            .await
            .unwrap();
        assert_eq!(token.access_token, "tok123");
    }
}
