//! Officer application dashboard: the application table, status filter, and
//! the review modal with its decision actions.
//!
//! DESIGN
//! ======
//! Rows are derived from the loaded applications on every render; nothing is
//! cached. Counts and the filter use the same three buckets, so every row is
//! reachable from exactly one filter besides `All`.

#[cfg(test)]
#[path = "officer_test.rs"]
mod officer_test;

use serde_json::{Value, json};

use crate::net::types::{Application, ApplicationDocument};
use crate::state::application::application_reference;
use crate::util::format::format_date;

pub const LOAD_FAILED: &str = "Unable to load applications.";
pub const DETAIL_FAILED: &str = "Unable to load application details.";
pub const EMPTY_FILTER: &str = "No applications found for this filter.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusBucket {
    Approved,
    UnderReview,
    Pending,
}

impl StatusBucket {
    pub const ALL: [Self; 3] = [Self::Approved, Self::UnderReview, Self::Pending];

    pub fn label(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::UnderReview => "Under Review",
            Self::Pending => "Pending",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Approved => "status-badge status-badge--approved",
            Self::UnderReview => "status-badge status-badge--review",
            Self::Pending => "status-badge status-badge--pending",
        }
    }

    /// Anything neither approved nor under review counts as pending,
    /// rejected applications included.
    pub fn for_status(label: &str) -> Self {
        if label.contains("Approved") {
            Self::Approved
        } else if label.contains("Under Review") {
            Self::UnderReview
        } else {
            Self::Pending
        }
    }
}

/// Display status: the server's label, else the raw status title-cased,
/// else `Submitted`.
pub fn status_label(application: &Application) -> String {
    if let Some(display) = application.status_display.as_deref().filter(|s| !s.trim().is_empty()) {
        return display.to_owned();
    }
    let raw = application.status.trim();
    if raw.is_empty() {
        return "Submitted".to_owned();
    }
    raw.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApplicationRow {
    pub sr_no: usize,
    pub id: i64,
    pub reference: String,
    pub farmer_name: String,
    pub scheme_name: String,
    pub status: String,
    pub bucket: StatusBucket,
    pub submitted_at: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub approved: usize,
    pub under_review: usize,
    pub pending: usize,
}

impl StatusCounts {
    pub fn get(&self, bucket: StatusBucket) -> usize {
        match bucket {
            StatusBucket::Approved => self.approved,
            StatusBucket::UnderReview => self.under_review,
            StatusBucket::Pending => self.pending,
        }
    }
}

/// Officer decisions, each posted to its own endpoint with the officer note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReviewAction {
    MarkUnderReview,
    VerifyDocuments,
    FlagDocuments,
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::MarkUnderReview => "mark-under-review",
            Self::VerifyDocuments | Self::FlagDocuments => "verify-documents",
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MarkUnderReview => "Mark Under Review",
            Self::VerifyDocuments => "Mark Documents Verified",
            Self::FlagDocuments => "Flag Documents (Reject)",
            Self::Approve => "Approve",
            Self::Reject => "Reject",
        }
    }

    pub fn button_class(self) -> &'static str {
        match self {
            Self::Approve | Self::VerifyDocuments => "btn btn--primary",
            Self::Reject | Self::FlagDocuments => "btn btn--danger",
            Self::MarkUnderReview => "btn",
        }
    }

    pub fn body(self, officer_note: &str) -> Value {
        let mut body = json!({ "officer_note": officer_note });
        match self {
            Self::VerifyDocuments => body["verified"] = json!(true),
            Self::FlagDocuments => body["verified"] = json!(false),
            _ => {}
        }
        body
    }

    /// `Unable to mark under review.` and friends.
    pub fn failure_message(self) -> String {
        format!("Unable to {}.", self.endpoint().replace('-', " "))
    }
}

/// The review modal for one application.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewDetail {
    pub application_id: i64,
    /// Last loaded copy; kept while a reload is in flight.
    pub application: Option<Application>,
    pub loading: bool,
    pub error: Option<String>,
    pub note: String,
    pub processing: bool,
}

/// A decision ready to post.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingAction {
    pub application_id: i64,
    pub action: ReviewAction,
    pub body: Value,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OfficerDashboardState {
    pub applications: Vec<Application>,
    pub loading: bool,
    pub error: Option<String>,
    /// `None` shows every application.
    pub filter: Option<StatusBucket>,
    pub detail: Option<ReviewDetail>,
}

impl Default for OfficerDashboardState {
    fn default() -> Self {
        Self { applications: Vec::new(), loading: true, error: None, filter: None, detail: None }
    }
}

impl OfficerDashboardState {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn load_succeeded(&mut self, applications: Vec<Application>) {
        self.applications = applications;
        self.loading = false;
        self.error = None;
    }

    /// Keeps the previously loaded table beneath the error banner.
    pub fn load_failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    // =============================================================
    // Table
    // =============================================================

    pub fn rows(&self) -> Vec<ApplicationRow> {
        self.applications
            .iter()
            .enumerate()
            .map(|(index, app)| {
                let status = status_label(app);
                ApplicationRow {
                    sr_no: index + 1,
                    id: app.id,
                    reference: application_reference(app.id),
                    farmer_name: non_empty_or_na(app.applicant_name.as_deref()),
                    scheme_name: non_empty_or_na(app.subsidy_title.as_deref()),
                    bucket: StatusBucket::for_status(&status),
                    status,
                    submitted_at: format_date(app.submitted_at.as_deref()),
                }
            })
            .collect()
    }

    pub fn visible_rows(&self) -> Vec<ApplicationRow> {
        let mut rows = self.rows();
        if let Some(bucket) = self.filter {
            rows.retain(|r| r.bucket == bucket);
        }
        rows
    }

    pub fn counts(&self) -> StatusCounts {
        self.rows().iter().fold(StatusCounts::default(), |mut counts, row| {
            match row.bucket {
                StatusBucket::Approved => counts.approved += 1,
                StatusBucket::UnderReview => counts.under_review += 1,
                StatusBucket::Pending => counts.pending += 1,
            }
            counts
        })
    }

    pub fn set_filter(&mut self, filter: Option<StatusBucket>) {
        self.filter = filter;
    }

    // =============================================================
    // Review modal
    // =============================================================

    pub fn open_detail(&mut self, application_id: i64) {
        self.detail = Some(ReviewDetail { application_id, loading: true, ..ReviewDetail::default() });
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Start a reload of the open modal's application, keeping what it shows.
    pub fn begin_detail_reload(&mut self, application_id: i64) -> bool {
        match self.detail.as_mut().filter(|d| d.application_id == application_id) {
            Some(detail) => {
                detail.loading = true;
                true
            }
            None => false,
        }
    }

    /// Store a fetched application with its documents; the note is reset to
    /// the server's officer note. Ignored when the modal moved on.
    pub fn detail_loaded(&mut self, mut application: Application, documents: Vec<ApplicationDocument>) {
        let Some(detail) = self.detail.as_mut().filter(|d| d.application_id == application.id) else {
            return;
        };
        application.documents = documents;
        detail.note = application.officer_note.clone().unwrap_or_default();
        detail.application = Some(application);
        detail.loading = false;
    }

    pub fn detail_failed(&mut self, application_id: i64, message: String) {
        if let Some(detail) = self.detail.as_mut().filter(|d| d.application_id == application_id) {
            detail.loading = false;
            detail.error = Some(message);
        }
    }

    pub fn set_note(&mut self, note: &str) {
        if let Some(detail) = self.detail.as_mut() {
            detail.note = note.to_owned();
        }
    }

    /// Decisions offered for the loaded application, in button order.
    pub fn available_actions(&self) -> Vec<ReviewAction> {
        let Some(app) = self.detail.as_ref().and_then(|d| d.application.as_ref()) else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        if app.status == "submitted" {
            actions.push(ReviewAction::MarkUnderReview);
        }
        if app.document_status != "verified" {
            actions.extend([ReviewAction::VerifyDocuments, ReviewAction::FlagDocuments]);
        }
        actions.extend([ReviewAction::Approve, ReviewAction::Reject]);
        actions
    }

    /// Mark the modal busy and build the request, or `None` when another
    /// decision is in flight or nothing is loaded.
    pub fn begin_action(&mut self, action: ReviewAction) -> Option<PendingAction> {
        let detail = self.detail.as_mut().filter(|d| !d.processing && d.application.is_some())?;
        detail.processing = true;
        detail.error = None;
        Some(PendingAction { application_id: detail.application_id, action, body: action.body(&detail.note) })
    }

    pub fn action_finished(&mut self, application_id: i64, error: Option<String>) {
        if let Some(detail) = self.detail.as_mut().filter(|d| d.application_id == application_id) {
            detail.processing = false;
            detail.error = error;
        }
    }
}

fn non_empty_or_na(value: Option<&str>) -> String {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("N/A").to_owned()
}
