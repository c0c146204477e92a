use super::*;

#[test]
fn should_redirect_unauth_when_not_loading_and_token_missing() {
    let state = AuthState { access_token: None, role: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState { access_token: None, role: None, loading: true };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_token_exists() {
    let state = AuthState { access_token: Some("tok".to_owned()), role: Some("farmer".to_owned()), loading: false };
    assert!(!should_redirect_unauth(&state));
}
