//! Bearer-token persistence behind an injectable store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API wrapper and route guards never touch `localStorage` directly; they
//! go through [`TokenStore`]. The browser implementation is hydrate-only and
//! no-ops during SSR, while [`MemoryTokenStore`] keeps session logic testable.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::Mutex;

pub const ACCESS_KEY: &str = "access";
pub const REFRESH_KEY: &str = "refresh";
pub const ROLE_KEY: &str = "user_role";

/// Tokens returned by a successful login or social token exchange.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct TokenPair {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Key/value storage for session credentials.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_KEY).filter(|t| !t.is_empty())
    }

    fn role(&self) -> Option<String> {
        self.get(ROLE_KEY).filter(|r| !r.is_empty())
    }

    /// Persist whichever of the tokens and role are present.
    fn store_session(&self, tokens: &TokenPair, role: Option<&str>) {
        if let Some(access) = tokens.access.as_deref() {
            self.set(ACCESS_KEY, access);
        }
        if let Some(refresh) = tokens.refresh.as_deref() {
            self.set(REFRESH_KEY, refresh);
        }
        if let Some(role) = role.filter(|r| !r.is_empty()) {
            self.set(ROLE_KEY, &normalize_role(role));
        }
    }

    fn clear_session(&self) {
        self.remove(ACCESS_KEY);
        self.remove(REFRESH_KEY);
        self.remove(ROLE_KEY);
    }
}

/// `localStorage`-backed store. Every call resolves the window afresh so the
/// value itself carries no JS handles.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTokenStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for BrowserTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// In-memory store used by tests and by SSR rendering paths.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

/// `"Subsidy Provider"` -> `"subsidy_provider"`.
pub fn normalize_role(role: &str) -> String {
    role.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Landing route after login for a given role.
pub fn redirect_path_for_role(role: Option<&str>) -> &'static str {
    match role.map(normalize_role).as_deref() {
        Some("officer") => "/officer",
        Some("subsidy_provider") => "/provider",
        _ => "/profile",
    }
}
