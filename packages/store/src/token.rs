//! # Persisted auth token
//!
//! The credential token is the only shared mutable resource in the client:
//! the HTTP layer reads it on every request, the session layer writes it on
//! login/register and clears it on logout. [`TokenStore`] keeps that access
//! behind a trait so the session machinery can be constructed with an
//! in-memory store in tests instead of reaching for ambient browser state.
//!
//! Two implementations:
//!
//! | Store | Platform | Backing |
//! |-------|----------|---------|
//! | [`LocalStorageTokens`] | web (`wasm32` + `web` feature) | `window.localStorage`, key `"token"` |
//! | [`MemoryTokens`] | everywhere | `Arc<Mutex<Option<String>>>` |
//!
//! The localStorage implementation swallows storage errors (a blocked or
//! unavailable storage degrades to "not logged in" rather than crashing).

use std::sync::{Arc, Mutex};

/// Storage key for the persisted bearer token.
pub const TOKEN_KEY: &str = "token";

/// Read/write access to the persisted credential token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// A shareable handle to a token store.
pub type SharedTokens = Arc<dyn TokenStore>;

/// In-memory token store for tests and non-browser targets.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokens {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryTokens {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokens {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap() = None;
    }
}

/// Browser localStorage-backed token store.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
#[derive(Clone, Debug, Default)]
pub struct LocalStorageTokens;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
impl LocalStorageTokens {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
impl TokenStore for LocalStorageTokens {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(TOKEN_KEY).ok()?
    }

    fn save(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}
