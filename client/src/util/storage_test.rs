use super::*;

#[test]
fn memory_store_round_trips_and_removes() {
    let store = MemoryTokenStore::default();
    assert_eq!(store.get(ACCESS_KEY), None);
    store.set(ACCESS_KEY, "abc");
    assert_eq!(store.access_token().as_deref(), Some("abc"));
    store.remove(ACCESS_KEY);
    assert_eq!(store.access_token(), None);
}

#[test]
fn empty_access_token_counts_as_missing() {
    let store = MemoryTokenStore::default();
    store.set(ACCESS_KEY, "");
    assert_eq!(store.access_token(), None);
}

#[test]
fn store_session_writes_present_tokens_and_normalized_role() {
    let store = MemoryTokenStore::default();
    let tokens = TokenPair { access: Some("a1".to_owned()), refresh: None };
    store.store_session(&tokens, Some("Subsidy Provider"));
    assert_eq!(store.get(ACCESS_KEY).as_deref(), Some("a1"));
    assert_eq!(store.get(REFRESH_KEY), None);
    assert_eq!(store.role().as_deref(), Some("subsidy_provider"));
}

#[test]
fn clear_session_removes_every_key() {
    let store = MemoryTokenStore::default();
    let tokens = TokenPair { access: Some("a".to_owned()), refresh: Some("r".to_owned()) };
    store.store_session(&tokens, Some("Farmer"));
    store.clear_session();
    assert_eq!(store.get(ACCESS_KEY), None);
    assert_eq!(store.get(REFRESH_KEY), None);
    assert_eq!(store.get(ROLE_KEY), None);
}

#[test]
fn browser_store_is_inert_without_hydrate() {
    let store = BrowserTokenStore;
    store.set(ACCESS_KEY, "ignored");
    #[cfg(not(feature = "hydrate"))]
    assert_eq!(store.access_token(), None);
}

#[test]
fn normalize_role_snake_cases() {
    assert_eq!(normalize_role("Subsidy Provider"), "subsidy_provider");
    assert_eq!(normalize_role("  Officer "), "officer");
    assert_eq!(normalize_role("Farmer"), "farmer");
}

#[test]
fn redirect_path_depends_on_role() {
    assert_eq!(redirect_path_for_role(Some("Officer")), "/officer");
    assert_eq!(redirect_path_for_role(Some("subsidy_provider")), "/provider");
    assert_eq!(redirect_path_for_role(Some("Farmer")), "/profile");
    assert_eq!(redirect_path_for_role(None), "/profile");
}

#[test]
fn token_pair_deserializes_partial_payloads() {
    let pair: TokenPair = serde_json::from_value(serde_json::json!({ "access": "x" })).unwrap();
    assert_eq!(pair.access.as_deref(), Some("x"));
    assert_eq!(pair.refresh, None);
}
