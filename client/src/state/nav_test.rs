use super::*;

fn rect(id: &'static str, top: f64, height: f64) -> SectionRect {
    SectionRect { id, top, height }
}

#[test]
fn closest_section_picks_nearest_center() {
    let rects = [rect("home", -600.0, 700.0), rect("subsidy", 100.0, 600.0), rect("news", 700.0, 500.0)];
    assert_eq!(closest_section(&rects, 800.0), Some("subsidy"));
}

#[test]
fn closest_section_prefers_earlier_on_tie() {
    let rects = [rect("home", 0.0, 200.0), rect("subsidy", 200.0, 200.0)];
    assert_eq!(closest_section(&rects, 400.0), Some("home"));
}

#[test]
fn closest_section_empty_is_none() {
    assert_eq!(closest_section(&[], 800.0), None);
}

#[test]
fn section_from_path_maps_routes() {
    assert_eq!(section_from_path("/subsidies"), Some("subsidy"));
    assert_eq!(section_from_path("/faq"), Some("faq"));
    assert_eq!(section_from_path("/profile"), None);
}

#[test]
fn scroll_target_subtracts_header() {
    assert_eq!(scroll_target(500.0, 1000.0), 1436.0);
    assert_eq!(scroll_target(10.0, 0.0), 0.0);
}

#[test]
fn route_change_off_home_uses_path() {
    let mut nav = NavState::default();
    nav.menu_open = true;
    nav.route_changed("/subsidies");
    assert_eq!(nav.active, Some("subsidy"));
    assert!(!nav.menu_open);
    nav.route_changed("/profile");
    assert_eq!(nav.active, None);
}

#[test]
fn scroll_only_updates_on_home() {
    let mut nav = NavState::default();
    let rects = [rect("home", -900.0, 800.0), rect("about", 100.0, 600.0)];
    nav.route_changed("/profile");
    nav.scrolled("/profile", &rects, 800.0);
    assert_eq!(nav.active, None);
    nav.scrolled("/", &rects, 800.0);
    assert_eq!(nav.active, Some("about"));
}

#[test]
fn section_click_off_home_requests_navigation() {
    let mut nav = NavState::default();
    assert!(nav.section_clicked("/profile", "faq"));
    assert_eq!(nav.take_pending_scroll(), Some("faq"));
    assert_eq!(nav.take_pending_scroll(), None);
    assert!(!nav.section_clicked("/", "news"));
    assert_eq!(nav.active, Some("news"));
}
