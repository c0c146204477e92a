use super::*;
use crate::util::validate::{PASSWORD_MISMATCH, WEAK_PASSWORD};

#[test]
fn every_field_is_required() {
    assert_eq!(validate_change_password("", "Secret#12", "Secret#12"), Err(FIELDS_REQUIRED));
    assert_eq!(validate_change_password("old", "", "Secret#12"), Err(FIELDS_REQUIRED));
    assert_eq!(validate_change_password("old", "Secret#12", ""), Err(FIELDS_REQUIRED));
}

#[test]
fn mismatch_uses_shared_text() {
    assert_eq!(validate_change_password("old", "Secret#12", "Secret#21"), Err(PASSWORD_MISMATCH));
}

#[test]
fn weak_new_password_is_rejected() {
    assert_eq!(validate_change_password("old", "password", "password"), Err(WEAK_PASSWORD));
}

#[test]
fn strong_matching_pair_passes() {
    assert_eq!(validate_change_password("old", "Secret#12", "Secret#12"), Ok(()));
}
