//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and the navbar to coordinate login redirects and
//! session-dependent rendering. The source of truth is the [`TokenStore`];
//! this struct mirrors it into a signal so views can react.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::LoginResponse;
use crate::util::storage::{TokenPair, TokenStore, normalize_role, redirect_path_for_role};

/// Session state: bearer token, normalized role, and whether storage has
/// been read yet (it cannot be during SSR).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub role: Option<String>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { access_token: None, role: None, loading: true }
    }
}

impl AuthState {
    /// Snapshot the session held by `store`.
    pub fn from_store(store: &dyn TokenStore) -> Self {
        Self { access_token: store.access_token(), role: store.role(), loading: false }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Persist a fresh login and return the resulting state.
    pub fn sign_in(store: &dyn TokenStore, tokens: &TokenPair, role: Option<&str>) -> Self {
        store.store_session(tokens, role);
        Self::from_store(store)
    }

    pub fn sign_out(store: &dyn TokenStore) -> Self {
        store.clear_session();
        Self::from_store(store)
    }
}

/// Persist a token-issuing response. The server's role wins over the role
/// picked in the form. Returns the new state and the post-login route, or
/// `None` when the response carries no access token.
pub fn session_from_login(
    store: &dyn TokenStore,
    resp: &LoginResponse,
    chosen_role: Option<&str>,
) -> Option<(AuthState, &'static str)> {
    resp.access.as_deref().filter(|a| !a.is_empty())?;
    let role = resp
        .role
        .as_deref()
        .filter(|r| !r.is_empty())
        .or(chosen_role)
        .map(normalize_role);
    let tokens = TokenPair { access: resp.access.clone(), refresh: resp.refresh.clone() };
    let state = AuthState::sign_in(store, &tokens, role.as_deref());
    Some((state, redirect_path_for_role(role.as_deref())))
}
