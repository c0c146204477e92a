use super::*;
use crate::util::storage::MemoryTokenStore;

#[test]
fn default_state_is_loading_without_token() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(!state.is_authenticated());
}

#[test]
fn from_store_reads_token_and_role() {
    let store = MemoryTokenStore::default();
    store.set("access", "abc");
    store.set("user_role", "officer");
    let state = AuthState::from_store(&store);
    assert!(!state.loading);
    assert_eq!(state.access_token.as_deref(), Some("abc"));
    assert_eq!(state.role.as_deref(), Some("officer"));
}

#[test]
fn sign_in_then_sign_out_round_trip() {
    let store = MemoryTokenStore::default();
    let tokens = TokenPair { access: Some("a".to_owned()), refresh: Some("r".to_owned()) };
    let state = AuthState::sign_in(&store, &tokens, Some("Farmer"));
    assert!(state.is_authenticated());
    assert_eq!(state.role.as_deref(), Some("farmer"));

    let state = AuthState::sign_out(&store);
    assert!(!state.is_authenticated());
    assert_eq!(state.role, None);
}

#[test]
fn session_from_login_prefers_server_role() {
    let store = MemoryTokenStore::default();
    let resp = LoginResponse {
        access: Some("a".to_owned()),
        refresh: Some("r".to_owned()),
        role: Some("officer".to_owned()),
        message: None,
    };
    let (state, path) = session_from_login(&store, &resp, Some("farmer")).unwrap();
    assert_eq!(path, "/officer");
    assert_eq!(state.role.as_deref(), Some("officer"));
    assert_eq!(store.get("refresh").as_deref(), Some("r"));
}

#[test]
fn session_from_login_falls_back_to_chosen_role() {
    let store = MemoryTokenStore::default();
    let resp = LoginResponse { access: Some("a".to_owned()), ..LoginResponse::default() };
    let (_, path) = session_from_login(&store, &resp, Some("subsidy_provider")).unwrap();
    assert_eq!(path, "/provider");
}

#[test]
fn session_from_login_without_access_token_stores_nothing() {
    let store = MemoryTokenStore::default();
    let resp = LoginResponse { access: Some(String::new()), role: Some("farmer".to_owned()), ..LoginResponse::default() };
    assert!(session_from_login(&store, &resp, None).is_none());
    assert_eq!(store.role(), None);
}
