use super::*;

fn subsidy(id: i64, title: &str) -> Subsidy {
    Subsidy {
        id,
        title: title.to_owned(),
        description: String::new(),
        amount: 50_000.0,
        rating: None,
        ratings_count: None,
        eligibility: Vec::new(),
        documents_required: Vec::new(),
        application_start_date: Some("2024-01-01".to_owned()),
        application_end_date: Some("2024-02-01".to_owned()),
        created_at: None,
    }
}

fn loaded(items: Vec<Subsidy>, count: u64, paginated: bool) -> SubsidyListState {
    let mut state = SubsidyListState::default();
    state.begin_load(1);
    state.load_succeeded(SubsidyPage { items, count, paginated });
    state
}

// =============================================================
// Pagination
// =============================================================

#[test]
fn envelope_of_25_yields_three_pages() {
    let items = (1..=10).map(|i| subsidy(i, "S")).collect();
    let state = loaded(items, 25, true);
    assert_eq!(state.total_pages(), 3);
    assert_eq!(state.page_numbers(), vec![1, 2, 3]);
}

#[test]
fn flat_list_is_always_one_page() {
    let items = (1..=37).map(|i| subsidy(i, "S")).collect();
    let state = loaded(items, 37, false);
    assert_eq!(state.total_pages(), 1);
    assert!(!state.show_previous());
    assert!(!state.show_next());
}

#[test]
fn empty_envelope_still_has_one_page() {
    let state = loaded(Vec::new(), 0, true);
    assert_eq!(state.total_pages(), 1);
}

#[test]
fn previous_and_next_hidden_at_boundaries() {
    let mut state = loaded(vec![subsidy(1, "S")], 25, true);
    assert!(!state.show_previous());
    assert!(state.show_next());

    state.begin_load(3);
    state.load_succeeded(SubsidyPage { items: vec![subsidy(21, "S")], count: 25, paginated: true });
    assert!(state.show_previous());
    assert!(!state.show_next());
}

#[test]
fn page_request_rejects_out_of_range_and_current() {
    let state = loaded(vec![subsidy(1, "S")], 25, true);
    assert_eq!(state.page_request(0), None);
    assert_eq!(state.page_request(1), None);
    assert_eq!(state.page_request(2), Some(2));
    assert_eq!(state.page_request(4), None);
}

#[test]
fn load_failure_sets_message_and_clears_loading() {
    let mut state = SubsidyListState::default();
    assert!(state.loading);
    state.load_failed();
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some(LOAD_FAILED));
    state.begin_load(1);
    assert_eq!(state.error, None);
}

// =============================================================
// Filter
// =============================================================

#[test]
fn filter_is_case_insensitive_substring_over_loaded_page() {
    let mut state = loaded(
        vec![subsidy(1, "Solar Pump Subsidy"), subsidy(2, "Drip Irrigation Support")],
        25,
        true,
    );
    state.set_filter("solar");
    let titles: Vec<_> = state.visible().into_iter().map(|s| s.title).collect();
    assert_eq!(titles, vec!["Solar Pump Subsidy"]);
    assert_eq!(state.total_pages(), 3);

    state.set_filter("tractor");
    assert!(state.visible().is_empty());
    state.set_filter("");
    assert_eq!(state.visible().len(), 2);
}

// =============================================================
// Modals
// =============================================================

#[test]
fn detail_modal_tracks_selection() {
    let mut state = loaded(vec![subsidy(1, "A"), subsidy(2, "B")], 2, false);
    state.select(2);
    assert_eq!(state.selected_subsidy().map(|s| s.title.as_str()), Some("B"));
    state.close_detail();
    assert!(state.selected_subsidy().is_none());
}

#[test]
fn reviews_ignore_responses_for_other_subsidies() {
    let mut state = loaded(vec![subsidy(1, "A"), subsidy(2, "B")], 2, false);
    state.open_reviews(1);
    assert!(state.reviews.loading);
    state.open_reviews(2);
    state.reviews_loaded(1, vec![Review { rating: Some(5.0), text: "x".to_owned(), user_name: None, created_at: None }]);
    assert!(state.reviews.items.is_empty());
    assert!(state.reviews.loading);
    state.reviews_loaded(2, Vec::new());
    assert!(!state.reviews.loading);
    assert_eq!(state.reviews_subsidy().map(|s| s.id), Some(2));
}

#[test]
fn reviews_failure_and_close() {
    let mut state = loaded(vec![subsidy(1, "A")], 1, false);
    state.open_reviews(1);
    state.reviews_failed(1);
    assert_eq!(state.reviews.error.as_deref(), Some(REVIEWS_FAILED));
    state.close_reviews();
    assert_eq!(state.reviews, ReviewsState::default());
}
