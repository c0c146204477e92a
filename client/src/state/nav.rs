//! Navbar scroll-spy math.
//!
//! DESIGN
//! ======
//! The navbar component measures section rectangles on animation frames and
//! hands them here; picking the active section and computing scroll targets
//! are pure functions over those measurements.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

/// Fixed header height subtracted from scroll targets.
pub const HEADER_OFFSET_PX: f64 = 64.0;
/// Delay after navigating home before scrolling, so the page can lay out.
pub const SCROLL_SETTLE_MS: u32 = 120;

/// Home-page sections the navbar links to, in page order.
pub const NAV_SECTIONS: [(&str, &str); 6] = [
    ("home", "Home"),
    ("subsidy", "Subsidies"),
    ("news", "News"),
    ("about", "About Us"),
    ("faq", "FAQ"),
    ("contact", "Contact"),
];

/// A section's bounding box relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionRect {
    pub id: &'static str,
    pub top: f64,
    pub height: f64,
}

impl SectionRect {
    fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

pub fn is_home_path(path: &str) -> bool {
    path.is_empty() || path == "/"
}

/// Section whose vertical center is nearest the viewport center. Ties go to
/// the earlier section.
pub fn closest_section(rects: &[SectionRect], viewport_height: f64) -> Option<&'static str> {
    let viewport_center = viewport_height / 2.0;
    rects
        .iter()
        .map(|r| (r.id, (r.center() - viewport_center).abs()))
        .fold(None, |best: Option<(&'static str, f64)>, (id, dist)| match best {
            Some((_, best_dist)) if best_dist <= dist => best,
            _ => Some((id, dist)),
        })
        .map(|(id, _)| id)
}

/// Active entry derived from the route on non-home pages.
pub fn section_from_path(path: &str) -> Option<&'static str> {
    let first = path.trim_start_matches('/').split('/').next().unwrap_or_default();
    match first {
        "" => Some("home"),
        "subsidies" | "subsidy" => Some("subsidy"),
        "news" => Some("news"),
        "about" => Some("about"),
        "faq" => Some("faq"),
        "contact" => Some("contact"),
        _ => None,
    }
}

/// Document-relative scroll offset that puts a section just under the header.
pub fn scroll_target(section_top_in_viewport: f64, current_scroll_y: f64) -> f64 {
    (current_scroll_y + section_top_in_viewport - HEADER_OFFSET_PX).max(0.0)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavState {
    pub active: Option<&'static str>,
    pub menu_open: bool,
    /// Section to scroll to once the home page has rendered.
    pub pending_scroll: Option<&'static str>,
}

impl Default for NavState {
    fn default() -> Self {
        Self { active: Some("home"), menu_open: false, pending_scroll: None }
    }
}

impl NavState {
    /// Route changed: non-home routes take their highlight from the path.
    pub fn route_changed(&mut self, path: &str) {
        self.menu_open = false;
        if !is_home_path(path) {
            self.active = section_from_path(path);
        }
    }

    pub fn scrolled(&mut self, path: &str, rects: &[SectionRect], viewport_height: f64) {
        if is_home_path(path)
            && let Some(id) = closest_section(rects, viewport_height)
        {
            self.active = Some(id);
        }
    }

    /// A section link was clicked. Returns `true` when the caller must first
    /// navigate home; the scroll then happens after the settle delay.
    pub fn section_clicked(&mut self, path: &str, id: &'static str) -> bool {
        self.menu_open = false;
        self.active = Some(id);
        if is_home_path(path) {
            self.pending_scroll = None;
            false
        } else {
            self.pending_scroll = Some(id);
            true
        }
    }

    pub fn take_pending_scroll(&mut self) -> Option<&'static str> {
        self.pending_scroll.take()
    }
}
