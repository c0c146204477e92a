use super::*;

fn app(id: i64, status: &str, display: Option<&str>) -> Application {
    Application {
        id,
        subsidy_title: Some("Drip Irrigation".to_owned()),
        applicant_name: Some("Asha Patil".to_owned()),
        status: status.to_owned(),
        status_display: display.map(str::to_owned),
        document_status: "pending".to_owned(),
        submitted_at: Some("2024-03-09T10:15:00Z".to_owned()),
        ..Application::default()
    }
}

fn loaded(apps: Vec<Application>) -> OfficerDashboardState {
    let mut state = OfficerDashboardState::default();
    state.begin_load();
    state.load_succeeded(apps);
    state
}

fn with_open_detail(status: &str, document_status: &str) -> OfficerDashboardState {
    let mut state = loaded(vec![app(4, status, None)]);
    state.open_detail(4);
    let mut detail = app(4, status, None);
    detail.document_status = document_status.to_owned();
    detail.officer_note = Some("Checked land record".to_owned());
    state.detail_loaded(detail, Vec::new());
    state
}

// =============================================================
// Rows and status labels
// =============================================================

#[test]
fn rows_number_from_one_with_app_references() {
    let state = loaded(vec![app(12, "submitted", Some("Submitted")), app(40, "approved", Some("Approved"))]);
    let rows = state.rows();
    assert_eq!(rows[0].sr_no, 1);
    assert_eq!(rows[0].reference, "APP-12");
    assert_eq!(rows[1].sr_no, 2);
    assert_eq!(rows[0].submitted_at, "9/3/2024");
}

#[test]
fn missing_names_render_na() {
    let mut a = app(1, "submitted", None);
    a.applicant_name = None;
    a.subsidy_title = Some("  ".to_owned());
    let rows = loaded(vec![a]).rows();
    assert_eq!(rows[0].farmer_name, "N/A");
    assert_eq!(rows[0].scheme_name, "N/A");
}

#[test]
fn status_label_falls_back_to_title_cased_raw_then_submitted() {
    assert_eq!(status_label(&app(1, "under_review", Some("Under Review"))), "Under Review");
    assert_eq!(status_label(&app(1, "under_review", None)), "Under Review");
    assert_eq!(status_label(&app(1, "rejected", Some(""))), "Rejected");
    assert_eq!(status_label(&app(1, "", None)), "Submitted");
}

// =============================================================
// Counts and filter
// =============================================================

#[test]
fn counts_bucket_rejected_and_submitted_as_pending() {
    let state = loaded(vec![
        app(1, "approved", None),
        app(2, "under_review", None),
        app(3, "submitted", None),
        app(4, "rejected", None),
    ]);
    assert_eq!(state.counts(), StatusCounts { approved: 1, under_review: 1, pending: 2 });
}

#[test]
fn pending_filter_matches_the_pending_count() {
    let mut state = loaded(vec![app(1, "approved", None), app(3, "submitted", None), app(4, "rejected", None)]);
    state.set_filter(Some(StatusBucket::Pending));
    let ids: Vec<i64> = state.visible_rows().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 4]);
    assert_eq!(ids.len(), state.counts().get(StatusBucket::Pending));

    state.set_filter(None);
    assert_eq!(state.visible_rows().len(), 3);
}

#[test]
fn filtered_rows_keep_their_table_numbers() {
    let mut state = loaded(vec![app(1, "submitted", None), app(2, "approved", None)]);
    state.set_filter(Some(StatusBucket::Approved));
    assert_eq!(state.visible_rows()[0].sr_no, 2);
}

#[test]
fn failed_reload_keeps_previous_rows() {
    let mut state = loaded(vec![app(1, "submitted", None)]);
    state.begin_load();
    state.load_failed(LOAD_FAILED.to_owned());
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some(LOAD_FAILED));
    assert_eq!(state.rows().len(), 1);
}

// =============================================================
// Review modal
// =============================================================

#[test]
fn detail_load_merges_documents_and_seeds_note() {
    let mut state = loaded(vec![app(4, "submitted", None)]);
    state.open_detail(4);
    assert!(state.detail.as_ref().unwrap().loading);
    let mut detail = app(4, "submitted", None);
    detail.officer_note = Some("Looks fine".to_owned());
    let docs = vec![ApplicationDocument { id: 9, document_type: "land_records".to_owned(), ..Default::default() }];
    state.detail_loaded(detail, docs);
    let open = state.detail.as_ref().unwrap();
    assert!(!open.loading);
    assert_eq!(open.note, "Looks fine");
    assert_eq!(open.application.as_ref().unwrap().documents.len(), 1);
}

#[test]
fn stale_detail_response_is_ignored() {
    let mut state = loaded(vec![app(4, "submitted", None), app(5, "submitted", None)]);
    state.open_detail(5);
    state.detail_loaded(app(4, "submitted", None), Vec::new());
    state.detail_failed(4, DETAIL_FAILED.to_owned());
    let open = state.detail.as_ref().unwrap();
    assert!(open.application.is_none());
    assert!(open.error.is_none());
}

#[test]
fn actions_follow_application_and_document_status() {
    let state = with_open_detail("submitted", "pending");
    assert_eq!(
        state.available_actions(),
        vec![
            ReviewAction::MarkUnderReview,
            ReviewAction::VerifyDocuments,
            ReviewAction::FlagDocuments,
            ReviewAction::Approve,
            ReviewAction::Reject,
        ]
    );
    let state = with_open_detail("under_review", "verified");
    assert_eq!(state.available_actions(), vec![ReviewAction::Approve, ReviewAction::Reject]);
    assert!(OfficerDashboardState::default().available_actions().is_empty());
}

#[test]
fn action_posts_note_to_its_endpoint() {
    let mut state = with_open_detail("submitted", "pending");
    state.set_note("Field visit done");
    let pending = state.begin_action(ReviewAction::FlagDocuments).unwrap();
    assert_eq!(pending.application_id, 4);
    assert_eq!(pending.action.endpoint(), "verify-documents");
    assert_eq!(pending.body["officer_note"], "Field visit done");
    assert_eq!(pending.body["verified"], false);
    assert_eq!(ReviewAction::Approve.body("x").get("verified"), None);
}

#[test]
fn second_action_is_refused_while_processing() {
    let mut state = with_open_detail("submitted", "pending");
    assert!(state.begin_action(ReviewAction::Approve).is_some());
    assert!(state.begin_action(ReviewAction::Reject).is_none());
    state.action_finished(4, Some(ReviewAction::Approve.failure_message()));
    let open = state.detail.as_ref().unwrap();
    assert!(!open.processing);
    assert_eq!(open.error.as_deref(), Some("Unable to approve."));
    assert!(state.begin_action(ReviewAction::Reject).is_some());
}

#[test]
fn failure_message_spells_out_the_endpoint() {
    assert_eq!(ReviewAction::MarkUnderReview.failure_message(), "Unable to mark under review.");
    assert_eq!(ReviewAction::VerifyDocuments.failure_message(), "Unable to verify documents.");
}

#[test]
fn reload_after_action_keeps_the_shown_application() {
    let mut state = with_open_detail("submitted", "pending");
    assert!(state.begin_detail_reload(4));
    let open = state.detail.as_ref().unwrap();
    assert!(open.loading);
    assert!(open.application.is_some());
    assert!(!state.begin_detail_reload(99));
}
