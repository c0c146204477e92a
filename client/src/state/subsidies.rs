//! Subsidy list view state: current page, client-side filter, and the detail
//! and reviews modals.
//!
//! DESIGN
//! ======
//! The server pages results; the filter only narrows the page already loaded
//! and never triggers a fetch. A flat (non-envelope) response is one page.

#[cfg(test)]
#[path = "subsidies_test.rs"]
mod subsidies_test;

use crate::net::api::SUBSIDY_PAGE_SIZE;
use crate::net::types::{Review, Subsidy, SubsidyPage};

pub const LOAD_FAILED: &str = "Failed to load Subsidies. Try again later.";
pub const REVIEWS_FAILED: &str = "Failed to load reviews.";

#[derive(Clone, Debug, PartialEq)]
pub struct SubsidyListState {
    pub items: Vec<Subsidy>,
    pub count: u64,
    pub paginated: bool,
    /// 1-based page currently shown.
    pub page: u32,
    pub filter: String,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: Option<i64>,
    pub reviews: ReviewsState,
}

impl Default for SubsidyListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
            paginated: false,
            page: 1,
            filter: String::new(),
            loading: true,
            error: None,
            selected: None,
            reviews: ReviewsState::default(),
        }
    }
}

/// Reviews modal for one subsidy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewsState {
    pub subsidy_id: Option<i64>,
    pub items: Vec<Review>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SubsidyListState {
    pub fn begin_load(&mut self, page: u32) {
        self.page = page.max(1);
        self.loading = true;
        self.error = None;
    }

    pub fn load_succeeded(&mut self, page: SubsidyPage) {
        self.items = page.items;
        self.count = page.count;
        self.paginated = page.paginated;
        if !self.paginated {
            self.page = 1;
        }
        self.loading = false;
        self.error = None;
    }

    pub fn load_failed(&mut self) {
        self.loading = false;
        self.error = Some(LOAD_FAILED.to_owned());
    }

    /// `ceil(count / 10)` for envelopes (at least 1); always 1 for flat lists.
    pub fn total_pages(&self) -> u32 {
        if !self.paginated {
            return 1;
        }
        let pages = self.count.div_ceil(u64::from(SUBSIDY_PAGE_SIZE)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn page_numbers(&self) -> Vec<u32> {
        (1..=self.total_pages()).collect()
    }

    pub fn show_previous(&self) -> bool {
        self.page > 1
    }

    pub fn show_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Page to fetch for a pagination click, or `None` when out of range or
    /// already showing it.
    pub fn page_request(&self, target: u32) -> Option<u32> {
        (target >= 1 && target <= self.total_pages() && target != self.page).then_some(target)
    }

    pub fn set_filter(&mut self, value: &str) {
        self.filter = value.to_owned();
    }

    /// Loaded subsidies whose title contains the filter, case-insensitively.
    pub fn visible(&self) -> Vec<Subsidy> {
        let needle = self.filter.trim().to_lowercase();
        self.items
            .iter()
            .filter(|s| needle.is_empty() || s.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn select(&mut self, id: i64) {
        self.selected = Some(id);
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected_subsidy(&self) -> Option<&Subsidy> {
        let id = self.selected?;
        self.items.iter().find(|s| s.id == id)
    }

    pub fn open_reviews(&mut self, subsidy_id: i64) {
        self.reviews = ReviewsState { subsidy_id: Some(subsidy_id), loading: true, ..ReviewsState::default() };
    }

    /// Store fetched reviews if the modal still shows the same subsidy.
    pub fn reviews_loaded(&mut self, subsidy_id: i64, items: Vec<Review>) {
        if self.reviews.subsidy_id == Some(subsidy_id) {
            self.reviews.items = items;
            self.reviews.loading = false;
        }
    }

    pub fn reviews_failed(&mut self, subsidy_id: i64) {
        if self.reviews.subsidy_id == Some(subsidy_id) {
            self.reviews.loading = false;
            self.reviews.error = Some(REVIEWS_FAILED.to_owned());
        }
    }

    pub fn close_reviews(&mut self) {
        self.reviews = ReviewsState::default();
    }

    pub fn reviews_subsidy(&self) -> Option<&Subsidy> {
        let id = self.reviews.subsidy_id?;
        self.items.iter().find(|s| s.id == id)
    }
}
