use super::*;
use serde_json::json;

fn subsidy_json(id: i64) -> Value {
    json!({
        "id": id,
        "title": format!("Scheme {id}"),
        "amount": "50000.00",
        "application_start_date": "2024-01-01",
        "application_end_date": "2024-02-01",
    })
}

// =============================================================
// Subsidy decoding
// =============================================================

#[test]
fn subsidy_accepts_string_and_number_amounts() {
    let a: Subsidy = serde_json::from_value(subsidy_json(1)).unwrap();
    assert_eq!(a.amount, 50_000.0);
    let b: Subsidy = serde_json::from_value(json!({ "id": 2, "title": "B", "amount": 1250.5 })).unwrap();
    assert_eq!(b.amount, 1_250.5);
}

#[test]
fn subsidy_missing_optionals_default() {
    let s: Subsidy = serde_json::from_value(json!({ "id": "7", "title": "T" })).unwrap();
    assert_eq!(s.id, 7);
    assert_eq!(s.amount, 0.0);
    assert_eq!(s.rating, None);
    assert_eq!(s.review_count(), 0);
    assert!(s.eligibility.is_empty());
}

#[test]
fn subsidy_review_count_reads_ratings_count() {
    let s: Subsidy = serde_json::from_value(json!({ "id": 1, "title": "T", "rating": 4.5, "ratings_count": 12 })).unwrap();
    assert_eq!(s.rating, Some(4.5));
    assert_eq!(s.review_count(), 12);
}

// =============================================================
// Page envelope normalization
// =============================================================

#[test]
fn paginated_envelope_keeps_count() {
    let body = json!({ "count": 25, "results": (1..=10).map(subsidy_json).collect::<Vec<_>>() });
    let page = parse_subsidy_page(body);
    assert!(page.paginated);
    assert_eq!(page.count, 25);
    assert_eq!(page.items.len(), 10);
}

#[test]
fn flat_array_is_not_paginated() {
    let body = Value::Array((1..=14).map(subsidy_json).collect());
    let page = parse_subsidy_page(body);
    assert!(!page.paginated);
    assert_eq!(page.count, 14);
    assert_eq!(page.items.len(), 14);
}

#[test]
fn unexpected_shape_degrades_to_empty_list() {
    // Documented behavior: neither an array nor a `results` envelope is
    // rendered as "no subsidies" instead of an error.
    for body in [json!({ "detail": "oops" }), json!("text"), json!(null), json!({ "results": "x" })] {
        let page = parse_subsidy_page(body);
        assert!(page.items.is_empty());
        assert!(!page.paginated);
    }
}

#[test]
fn malformed_entries_are_skipped() {
    let body = json!([subsidy_json(1), { "title": "no id" }, subsidy_json(3)]);
    let page = parse_subsidy_page(body);
    assert_eq!(page.items.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3]);
}

// =============================================================
// Reviews / profile
// =============================================================

#[test]
fn reviews_accept_list_and_wrapped_shapes() {
    let list = json!([{ "rating": 5, "comment": "Great", "user": "Asha" }]);
    let reviews = parse_reviews(list);
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].text, "Great");
    assert_eq!(reviews[0].user_name.as_deref(), Some("Asha"));

    let wrapped = json!({ "reviews": [{ "rating": "4", "review": "Ok" }] });
    let reviews = parse_reviews(wrapped);
    assert_eq!(reviews[0].rating, Some(4.0));
    assert_eq!(reviews[0].text, "Ok");
}

#[test]
fn profile_tolerates_empty_object_and_numeric_fields() {
    let empty: Profile = serde_json::from_value(json!({})).unwrap();
    assert_eq!(empty, Profile::default());

    let p: Profile = serde_json::from_value(json!({
        "full_name": "Ramesh",
        "mobile_number": 919_876_543_210_i64,
        "land_size": 2.5,
        "photo_url": "https://cdn/x.png",
    }))
    .unwrap();
    assert_eq!(p.mobile_number, "919876543210");
    assert_eq!(p.land_size, "2.5");
    assert_eq!(p.photo_url.as_deref(), Some("https://cdn/x.png"));
}

#[test]
fn otp_challenge_accepts_numeric_user_id() {
    let c: OtpChallenge = serde_json::from_value(json!({ "user_id": 42, "message": "OTP sent" })).unwrap();
    assert_eq!(c.user_id.as_deref(), Some("42"));
}

// =============================================================
// Applications
// =============================================================

#[test]
fn application_decodes_review_fields_and_nested_documents() {
    let app: Application = serde_json::from_value(json!({
        "id": 12,
        "subsidy": 3,
        "subsidy_title": "Drip Irrigation",
        "applicant_name": "Asha Patil",
        "status": "under_review",
        "status_display": "Under Review",
        "document_status": "pending",
        "officer_note": null,
        "documents": [{ "id": "5", "document_type": "land_records", "file_url": "https://cdn/x.pdf", "verified": false }],
    }))
    .unwrap();
    assert_eq!(app.id, 12);
    assert_eq!(app.status, "under_review");
    assert_eq!(app.status_display.as_deref(), Some("Under Review"));
    assert_eq!(app.officer_note, None);
    assert_eq!(app.documents.len(), 1);
    assert_eq!(app.documents[0].id, 5);
}

#[test]
fn application_null_status_becomes_empty() {
    let app: Application = serde_json::from_value(json!({ "id": 1, "status": null })).unwrap();
    assert_eq!(app.status, "");
    assert!(app.documents.is_empty());
}

#[test]
fn application_lists_accept_bare_and_enveloped_shapes() {
    let bare = parse_applications(json!([{ "id": 1 }, { "id": 2 }]));
    assert_eq!(bare.len(), 2);
    let wrapped = parse_applications(json!({ "count": 1, "results": [{ "id": 9 }] }));
    assert_eq!(wrapped[0].id, 9);
    assert!(parse_applications(json!({ "detail": "nope" })).is_empty());
}

#[test]
fn malformed_application_entries_are_skipped() {
    let apps = parse_applications(json!([{ "id": 1 }, "garbage", { "id": 3, "documents": "x" }]));
    assert_eq!(apps.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1]);
}

#[test]
fn application_documents_parse_from_list() {
    let docs = parse_application_documents(json!([{ "id": 4, "document_type": "aadhar_card", "verified": true }]));
    assert_eq!(docs.len(), 1);
    assert!(docs[0].verified);
}
