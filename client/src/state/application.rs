//! Subsidy application wizard: four steps (personal, land, bank, documents)
//! over one shared form, with documents staged locally until submit.
//!
//! SYSTEM CONTEXT
//! ==============
//! The apply page prefills the form from the farmer profile, walks the steps
//! with per-step validation, then creates the application and uploads each
//! staged document to it. Browser `File` handles stay in the page keyed by
//! [`StagedDocument::id`]; this module only sees their metadata.
//!
//! DESIGN
//! ======
//! Field errors follow the blur-then-live pattern: a field is checked on blur
//! or when its step is submitted, and re-checked on every edit once it has an
//! error showing.

#[cfg(test)]
#[path = "application_test.rs"]
mod application_test;

use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::net::types::Profile;
use crate::state::profile::{BANK_ACCOUNT_MAX_DIGITS, FileMeta, MAX_UPLOAD_BYTES};
use crate::util::validate::{self, digits_only};

pub const FIX_ERRORS: &str = "Please fix the highlighted fields.";
pub const SUBMIT_FAILED: &str = "Failed to submit application.";
pub const SUBMITTED: &str = "Application submitted successfully!";
pub const DOCUMENT_NUMBER_REQUIRED: &str = "Document number is required.";
pub const DOCUMENT_NUMBER_TOO_LONG: &str = "Too long";
pub const DOCUMENT_FILE_REQUIRED: &str = "Please select a file.";
pub const DOCUMENT_FILE_TOO_LARGE: &str = "File must be less than 5MB.";
pub const DOCUMENT_TYPE_REQUIRED: &str = "Select document type";

pub const DOCUMENT_NUMBER_MAX_CHARS: usize = 40;

/// `APP-<id>`, the reference shown to farmers and officers.
pub fn application_reference(id: i64) -> String {
    format!("APP-{id}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Personal,
    Land,
    Bank,
    Documents,
}

impl Step {
    pub const ALL: [Self; 4] = [Self::Personal, Self::Land, Self::Bank, Self::Documents];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Personal => "Personal Information",
            Self::Land => "Land Information",
            Self::Bank => "Bank Details",
            Self::Documents => "Documents",
        }
    }

    pub fn fields(self) -> impl Iterator<Item = Field> {
        Field::ALL.into_iter().filter(move |f| f.step() == self)
    }

    fn next(self) -> Self {
        Self::ALL.get(self.index() + 1).copied().unwrap_or(self)
    }

    fn previous(self) -> Self {
        self.index().checked_sub(1).and_then(|i| Self::ALL.get(i).copied()).unwrap_or(self)
    }
}

/// Form fields, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FullName,
    Mobile,
    Email,
    Aadhaar,
    State,
    District,
    Taluka,
    Village,
    Address,
    LandArea,
    Unit,
    SoilType,
    Ownership,
    BankName,
    AccountNumber,
    Ifsc,
}

impl Field {
    pub const ALL: [Self; 16] = [
        Self::FullName,
        Self::Mobile,
        Self::Email,
        Self::Aadhaar,
        Self::State,
        Self::District,
        Self::Taluka,
        Self::Village,
        Self::Address,
        Self::LandArea,
        Self::Unit,
        Self::SoilType,
        Self::Ownership,
        Self::BankName,
        Self::AccountNumber,
        Self::Ifsc,
    ];

    pub fn step(self) -> Step {
        match self {
            Self::FullName
            | Self::Mobile
            | Self::Email
            | Self::Aadhaar
            | Self::State
            | Self::District
            | Self::Taluka
            | Self::Village
            | Self::Address => Step::Personal,
            Self::LandArea | Self::Unit | Self::SoilType | Self::Ownership => Step::Land,
            Self::BankName | Self::AccountNumber | Self::Ifsc => Step::Bank,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Mobile => "Mobile Number",
            Self::Email => "Email",
            Self::Aadhaar => "Aadhaar Number",
            Self::State => "State",
            Self::District => "District",
            Self::Taluka => "Taluka",
            Self::Village => "Village",
            Self::Address => "Address",
            Self::LandArea => "Land Area",
            Self::Unit => "Unit",
            Self::SoilType => "Soil Type",
            Self::Ownership => "Ownership",
            Self::BankName => "Bank Name",
            Self::AccountNumber => "Account Number",
            Self::Ifsc => "IFSC Code",
        }
    }

    /// Key in the create-application body.
    pub fn body_key(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Mobile => "mobile",
            Self::Email => "email",
            Self::Aadhaar => "aadhaar",
            Self::State => "state",
            Self::District => "district",
            Self::Taluka => "taluka",
            Self::Village => "village",
            Self::Address => "address",
            Self::LandArea => "land_area",
            Self::Unit => "land_unit",
            Self::SoilType => "soil_type",
            Self::Ownership => "ownership",
            Self::BankName => "bank_name",
            Self::AccountNumber => "account_number",
            Self::Ifsc => "ifsc",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn sanitize(self, raw: &str) -> String {
        match self {
            Self::Mobile => digits_only(raw, 10),
            Self::Aadhaar => digits_only(raw, 12),
            Self::LandArea => validate::decimal_only(raw),
            Self::AccountNumber => digits_only(raw, BANK_ACCOUNT_MAX_DIGITS),
            Self::Ifsc => raw.trim().to_ascii_uppercase(),
            _ => raw.to_owned(),
        }
    }

    fn check(self, value: &str) -> Result<(), &'static str> {
        let required = |message| if value.trim().is_empty() { Err(message) } else { Ok(()) };
        match self {
            Self::FullName => required("Full name is required"),
            Self::Mobile => {
                let leading_ok = value.bytes().next().is_some_and(|b| (b'6'..=b'9').contains(&b));
                if leading_ok && validate::is_valid_mobile(value) {
                    Ok(())
                } else {
                    Err("Enter a valid 10-digit mobile number")
                }
            }
            Self::Email => {
                if validate::is_valid_email(value) {
                    Ok(())
                } else {
                    Err("Enter a valid email")
                }
            }
            Self::Aadhaar => {
                if validate::is_valid_aadhaar(value) {
                    Ok(())
                } else {
                    Err("Aadhaar must be 12 digits")
                }
            }
            Self::State => required("Enter state"),
            Self::District => required("Enter district"),
            Self::Taluka => required("Enter taluka"),
            Self::Village => required("Enter village"),
            Self::Address => required("Address required"),
            Self::LandArea => required("Enter land area"),
            Self::Unit => required("Select unit"),
            Self::SoilType => required("Select soil type"),
            Self::Ownership => required("Select ownership type"),
            Self::BankName => required("Enter bank name"),
            Self::AccountNumber => required("Enter account number"),
            Self::Ifsc => required("Enter IFSC").and_then(|()| validate::validate_ifsc(value)),
        }
    }

    fn from_profile(self, profile: &Profile) -> String {
        match self {
            Self::FullName => profile.full_name.clone(),
            Self::Mobile => validate::last_ten_digits(&profile.mobile_number),
            Self::Email => profile.email_address.clone(),
            Self::Aadhaar => profile.aadhaar_number.clone(),
            Self::State => profile.state.clone(),
            Self::District => profile.district.clone(),
            Self::Taluka => profile.taluka.clone(),
            Self::Village => profile.village.clone(),
            Self::Address => profile.address.clone(),
            Self::LandArea => profile.land_size.clone(),
            Self::Unit => profile.unit.clone(),
            Self::SoilType => profile.soil_type.clone(),
            Self::Ownership => profile.ownership_type.clone(),
            Self::BankName => profile.bank_name.clone(),
            Self::AccountNumber => profile.bank_account_number.clone(),
            Self::Ifsc => profile.ifsc_code.clone(),
        }
    }
}

/// Supporting documents an application can carry, one of each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocumentType {
    AadhaarCard,
    BankPassbook,
    LandRecords,
}

impl DocumentType {
    pub const ALL: [Self; 3] = [Self::AadhaarCard, Self::BankPassbook, Self::LandRecords];

    /// Wire value sent as `document_type`.
    pub fn value(self) -> &'static str {
        match self {
            Self::AadhaarCard => "aadhar_card",
            Self::BankPassbook => "bank_passbook",
            Self::LandRecords => "land_records",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AadhaarCard => "Aadhaar Card",
            Self::BankPassbook => "Bank Passbook / Cancelled Cheque",
            Self::LandRecords => "Copy of 7/12 and 8-A",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.value() == value)
    }
}

/// Label for a `document_type` as stored on the server; unknown values are
/// shown with underscores as spaces.
pub fn document_type_label(value: &str) -> String {
    DocumentType::from_value(value).map_or_else(|| value.replace('_', " "), |t| t.label().to_owned())
}

pub fn validate_document_number(number: &str) -> Result<(), &'static str> {
    let number = number.trim();
    if number.is_empty() {
        return Err(DOCUMENT_NUMBER_REQUIRED);
    }
    if number.chars().count() > DOCUMENT_NUMBER_MAX_CHARS {
        return Err(DOCUMENT_NUMBER_TOO_LONG);
    }
    Ok(())
}

pub fn validate_document_file(file: Option<&FileMeta>) -> Result<(), &'static str> {
    match file {
        None => Err(DOCUMENT_FILE_REQUIRED),
        Some(meta) if meta.size > MAX_UPLOAD_BYTES => Err(DOCUMENT_FILE_TOO_LARGE),
        Some(_) => Ok(()),
    }
}

/// A document waiting to be uploaded with the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedDocument {
    pub id: u64,
    pub document_type: DocumentType,
    pub number: String,
    pub file: FileMeta,
}

impl StagedDocument {
    /// Text parts of the upload; the page appends the file as `file`.
    pub fn upload_fields(&self) -> Vec<(&'static str, String)> {
        vec![("document_type", self.document_type.value().to_owned()), ("document_number", self.number.trim().to_owned())]
    }
}

/// The add/edit document dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentDraft {
    /// Staged document being edited; `None` when adding.
    pub editing: Option<u64>,
    pub document_type: Option<DocumentType>,
    pub number: String,
    pub file: Option<FileMeta>,
    pub type_error: Option<&'static str>,
    pub number_error: Option<&'static str>,
    pub file_error: Option<&'static str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftSaved {
    Added(u64),
    /// `file_replaced` is set when the edit picked a new file.
    Updated { id: u64, file_replaced: bool },
}

/// Result of a completed submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub application_id: i64,
    pub failed_uploads: Vec<DocumentType>,
}

impl Submission {
    pub fn reference(&self) -> String {
        application_reference(self.application_id)
    }

    pub fn message(&self) -> String {
        if self.failed_uploads.is_empty() {
            return SUBMITTED.to_owned();
        }
        let labels: Vec<&str> = self.failed_uploads.iter().map(|t| t.label()).collect();
        format!("Application submitted, but these documents failed to upload: {}.", labels.join(", "))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationWizard {
    pub subsidy_id: i64,
    pub subsidy_title: Option<String>,
    pub step: Step,
    values: [String; 16],
    errors: BTreeMap<Field, &'static str>,
    pub note: String,
    pub documents: Vec<StagedDocument>,
    pub draft: Option<DocumentDraft>,
    pub pending_delete: Option<u64>,
    next_document_id: u64,
    pub submitting: bool,
    pub submission: Option<Submission>,
}

impl ApplicationWizard {
    pub fn new(subsidy_id: i64) -> Self {
        Self {
            subsidy_id,
            subsidy_title: None,
            step: Step::Personal,
            values: Default::default(),
            errors: BTreeMap::new(),
            note: String::new(),
            documents: Vec::new(),
            draft: None,
            pending_delete: None,
            next_document_id: 1,
            submitting: false,
            submission: None,
        }
    }

    pub fn heading(&self) -> String {
        match self.subsidy_title.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(title) => format!("{title} Application Form"),
            None => "Subsidy Application Form".to_owned(),
        }
    }

    pub fn progress_label(&self) -> String {
        format!("Step {} of {}", self.step.index() + 1, Step::ALL.len())
    }

    // =============================================================
    // Fields
    // =============================================================

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Store a sanitized edit; a field already showing an error is re-checked.
    pub fn set(&mut self, field: Field, raw: &str) {
        self.values[field.index()] = field.sanitize(raw);
        if self.errors.contains_key(&field) {
            self.blur(field);
        }
    }

    pub fn blur(&mut self, field: Field) {
        match field.check(self.value(field)) {
            Ok(()) => self.errors.remove(&field),
            Err(message) => self.errors.insert(field, message),
        };
    }

    /// Fill still-empty fields from the farmer profile; typed values win.
    pub fn prefill(&mut self, profile: &Profile) {
        for field in Field::ALL {
            if self.value(field).is_empty() {
                self.values[field.index()] = field.sanitize(&field.from_profile(profile));
            }
        }
    }

    // =============================================================
    // Steps
    // =============================================================

    /// Check every field of `step`, leaving errors on the failing ones.
    pub fn validate_step(&mut self, step: Step) -> bool {
        let mut valid = true;
        for field in step.fields() {
            self.blur(field);
            valid &= !self.errors.contains_key(&field);
        }
        valid
    }

    /// Advance when the current step validates.
    pub fn next(&mut self) -> bool {
        if !self.validate_step(self.step) {
            return false;
        }
        self.step = self.step.next();
        true
    }

    pub fn back(&mut self) {
        self.step = self.step.previous();
    }

    pub fn can_go_back(&self) -> bool {
        self.step != Step::Personal
    }

    pub fn is_last_step(&self) -> bool {
        self.step == Step::Documents
    }

    // =============================================================
    // Documents
    // =============================================================

    /// Types not yet staged, in display order.
    pub fn available_types(&self) -> Vec<DocumentType> {
        DocumentType::ALL
            .into_iter()
            .filter(|t| !self.documents.iter().any(|d| d.document_type == *t))
            .collect()
    }

    pub fn can_add_document(&self) -> bool {
        !self.available_types().is_empty()
    }

    pub fn open_add(&mut self) {
        if self.can_add_document() {
            self.draft = Some(DocumentDraft::default());
        }
    }

    /// Edit keeps the type; the number and optionally the file change.
    pub fn open_edit(&mut self, id: u64) {
        if let Some(doc) = self.documents.iter().find(|d| d.id == id) {
            self.draft = Some(DocumentDraft {
                editing: Some(id),
                document_type: Some(doc.document_type),
                number: doc.number.clone(),
                ..DocumentDraft::default()
            });
        }
    }

    pub fn close_draft(&mut self) {
        self.draft = None;
    }

    pub fn set_draft_type(&mut self, value: &str) {
        if let Some(draft) = self.draft.as_mut().filter(|d| d.editing.is_none()) {
            draft.document_type = DocumentType::from_value(value);
            draft.type_error = None;
        }
    }

    pub fn set_draft_number(&mut self, value: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.number = value.to_owned();
            if draft.number_error.is_some() {
                draft.number_error = validate_document_number(&draft.number).err();
            }
        }
    }

    pub fn pick_draft_file(&mut self, meta: FileMeta) {
        if let Some(draft) = self.draft.as_mut() {
            draft.file_error = validate_document_file(Some(&meta)).err();
            draft.file = Some(meta);
        }
    }

    /// Validate the dialog and stage or update its document. On failure the
    /// dialog stays open with inline errors and `None` is returned.
    pub fn save_draft(&mut self) -> Option<DraftSaved> {
        let draft = self.draft.as_mut()?;
        draft.number_error = validate_document_number(&draft.number).err();
        let editing = draft.editing;
        draft.file_error = match (editing, draft.file.as_ref()) {
            (Some(_), None) => None,
            (_, file) => validate_document_file(file).err(),
        };
        let already_staged =
            |t: DocumentType| editing.is_none() && self.documents.iter().any(|d| d.document_type == t);
        draft.type_error = match draft.document_type {
            Some(t) if !already_staged(t) => None,
            _ => Some(DOCUMENT_TYPE_REQUIRED),
        };
        if draft.number_error.or(draft.file_error).or(draft.type_error).is_some() {
            return None;
        }
        let draft = self.draft.take()?;
        let number = draft.number.trim().to_owned();
        match editing {
            Some(id) => {
                let doc = self.documents.iter_mut().find(|d| d.id == id)?;
                doc.number = number;
                let file_replaced = draft.file.is_some();
                if let Some(file) = draft.file {
                    doc.file = file;
                }
                Some(DraftSaved::Updated { id, file_replaced })
            }
            None => {
                let document_type = draft.document_type?;
                let file = draft.file?;
                let id = self.next_document_id;
                self.next_document_id += 1;
                self.documents.push(StagedDocument { id, document_type, number, file });
                Some(DraftSaved::Added(id))
            }
        }
    }

    pub fn request_delete(&mut self, id: u64) {
        if self.documents.iter().any(|d| d.id == id) {
            self.pending_delete = Some(id);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Remove the document awaiting confirmation; returns its id.
    pub fn confirm_delete(&mut self) -> Option<u64> {
        let id = self.pending_delete.take()?;
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        (self.documents.len() < before).then_some(id)
    }

    // =============================================================
    // Submit
    // =============================================================

    /// Re-check every form step; on failure jump to the first failing one.
    pub fn validate_for_submit(&mut self) -> Result<(), &'static str> {
        let mut first_invalid = None;
        for step in [Step::Personal, Step::Land, Step::Bank] {
            if !self.validate_step(step) && first_invalid.is_none() {
                first_invalid = Some(step);
            }
        }
        match first_invalid {
            Some(step) => {
                self.step = step;
                Err(FIX_ERRORS)
            }
            None => Ok(()),
        }
    }

    pub fn begin_submit(&mut self) -> bool {
        if self.submitting || self.submission.is_some() {
            return false;
        }
        self.submitting = true;
        true
    }

    /// JSON body for `POST /subsidy-applications/`.
    pub fn submit_body(&self) -> Value {
        let mut body = json!({
            "subsidy": self.subsidy_id,
            "application_note": self.note.trim(),
        });
        for field in Field::ALL {
            body[field.body_key()] = json!(self.value(field).trim());
        }
        body
    }

    pub fn submit_failed(&mut self) {
        self.submitting = false;
    }

    pub fn submit_succeeded(&mut self, submission: Submission) {
        self.submitting = false;
        self.submission = Some(submission);
    }
}
