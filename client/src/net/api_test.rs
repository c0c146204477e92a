use super::*;
use crate::util::storage::{ACCESS_KEY, MemoryTokenStore};

fn client_with_store() -> (ApiClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::default());
    let client = ApiClient::new(api_base_url(None), store.clone());
    (client, store)
}

// =============================================================
// Base URL and paths
// =============================================================

#[test]
fn api_base_url_defaults_to_local_backend() {
    assert_eq!(api_base_url(None), "http://127.0.0.1:8000/api");
    assert_eq!(api_base_url(Some("  ")), "http://127.0.0.1:8000/api");
}

#[test]
fn api_base_url_trims_trailing_slash() {
    assert_eq!(api_base_url(Some("https://portal.example.in/")), "https://portal.example.in/api");
}

#[test]
fn endpoint_joins_base_and_path() {
    let (client, _) = client_with_store();
    assert_eq!(client.endpoint("/profile/"), "http://127.0.0.1:8000/api/profile/");
}

#[test]
fn subsidies_path_carries_page_and_size() {
    assert_eq!(subsidies_path(2), "/subsidies/?page=2&page_size=10");
    assert_eq!(subsidies_path(0), "/subsidies/?page=1&page_size=10");
    assert_eq!(subsidy_reviews_path(9), "/subsidies/9/reviews/");
    assert_eq!(subsidy_path(9), "/subsidies/9/");
}

#[test]
fn application_paths_nest_under_the_collection() {
    assert_eq!(APPLICATIONS_PATH, "/subsidy-applications/");
    assert_eq!(application_path(4), "/subsidy-applications/4/");
    assert_eq!(application_documents_path(4), "/subsidy-applications/4/documents/");
    assert_eq!(application_upload_path(4), "/subsidy-applications/4/upload-document/");
    assert_eq!(application_action_path(4, "mark-under-review"), "/subsidy-applications/4/mark-under-review/");
}

// =============================================================
// Bearer header
// =============================================================

#[test]
fn authorization_header_reflects_token_store() {
    let (client, store) = client_with_store();
    assert_eq!(client.authorization_header(), None);
    store.set(ACCESS_KEY, "tok123");
    assert_eq!(client.authorization_header().as_deref(), Some("Bearer tok123"));
}

// =============================================================
// Bodies
// =============================================================

#[test]
fn signup_body_omits_absent_identifiers() {
    let payload = SignupPayload {
        full_name: "Asha Devi".to_owned(),
        mobile_number: Some("9876543210".to_owned()),
        aadhaar_number: Some(String::new()),
        password: "Secret#12".to_owned(),
        confirm_password: "Secret#12".to_owned(),
        role: "farmer".to_owned(),
        ..SignupPayload::default()
    };
    let body = signup_body(&payload);
    assert_eq!(body["mobile_number"], "9876543210");
    assert_eq!(body["role"], "farmer");
    assert!(body.get("email_address").is_none());
    assert!(body.get("aadhaar_number").is_none());
}

#[test]
fn parse_body_treats_empty_text_as_null() {
    assert_eq!(parse_body("").unwrap(), Value::Null);
    assert_eq!(parse_body("{\"a\":1}").unwrap()["a"], 1);
    assert!(matches!(parse_body("<html>"), Err(ApiError::Decode(_))));
}

#[test]
fn decode_null_into_defaulted_struct() {
    let msg: MessageResponse = decode(Value::Null).unwrap();
    assert_eq!(msg.message, None);
}

#[test]
fn multipart_form_keeps_field_order() {
    let form = MultipartForm::new(vec![("full_name", "A".to_owned()), ("address", "Village road".to_owned())]);
    let keys: Vec<_> = form.fields.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["full_name", "address"]);
}
