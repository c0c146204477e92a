//! Profile editor state: editable fields, blur validators, and the four
//! document upload slots.
//!
//! SYSTEM CONTEXT
//! ==============
//! The profile page loads a [`Profile`] once, edits it here, and submits the
//! result as multipart form data. Browser `File` handles stay in the page; this
//! module only sees their metadata and object URLs so validation and preview
//! rules are testable natively.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use crate::net::types::Profile;
use crate::util::format::format_file_size;
use crate::util::validate::{self, digits_only};

/// 5 MiB upload ceiling shared by every document slot.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
pub const ACCEPTED_MIME_TYPES: [&str; 4] = ["application/pdf", "image/jpeg", "image/jpg", "image/png"];
pub const ACCEPT_ATTR: &str = ".pdf,.jpg,.jpeg,.png";

pub const FILE_TOO_LARGE: &str = "File is too large. Maximum size is 5MB.";
pub const INVALID_FILE_TYPE: &str = "Invalid file type. Only PDF, JPG and PNG files are allowed.";
pub const LOAD_FAILED: &str = "Failed to load profile.";
pub const SAVE_FAILED: &str = "Failed to update profile.";
pub const SAVED: &str = "Profile updated successfully!";

pub const BANK_ACCOUNT_MAX_DIGITS: usize = 18;

pub const UNIT_OPTIONS: [(&str, &str); 2] = [("acres", "Acres"), ("hectares", "Hectares")];
pub const SOIL_TYPE_OPTIONS: [&str; 9] = [
    "Alluvial",
    "Black",
    "Red & Yellow",
    "Laterite",
    "Arid",
    "Forest & Mountain",
    "Saline & Alkaline",
    "Peaty",
    "Marshy",
];
pub const OWNERSHIP_OPTIONS: [(&str, &str); 2] = [("owned", "Owned"), ("leased", "Leased")];

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Document upload slots, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileField {
    LandProof,
    PanCard,
    AadhaarCard,
    Photo,
}

impl FileField {
    pub const ALL: [Self; 4] = [Self::LandProof, Self::PanCard, Self::AadhaarCard, Self::Photo];

    /// Multipart key for newly attached files.
    pub fn form_key(self) -> &'static str {
        match self {
            Self::LandProof => "land_proof",
            Self::PanCard => "pan_card",
            Self::AadhaarCard => "aadhaar_card",
            Self::Photo => "photo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LandProof => "Land Proof",
            Self::PanCard => "PAN Card",
            Self::AadhaarCard => "Aadhaar Card",
            Self::Photo => "Photo",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::LandProof => 0,
            Self::PanCard => 1,
            Self::AadhaarCard => 2,
            Self::Photo => 3,
        }
    }

    fn server_url(self, profile: &Profile) -> Option<&str> {
        match self {
            Self::LandProof => profile.land_proof_url.as_deref(),
            Self::PanCard => profile.pan_card_url.as_deref(),
            Self::AadhaarCard => profile.aadhaar_card_url.as_deref(),
            Self::Photo => profile.photo_url.as_deref(),
        }
    }
}

/// What the browser reports about a picked or dropped file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl FileMeta {
    pub fn size_label(&self) -> String {
        format_file_size(self.size)
    }

    fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Rendered preview for an upload slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilePreview {
    /// Shown as `<img src>`; `local` marks object URLs this page created.
    Image { src: String, name: String, local: bool },
    /// Shown by file name, linked when a URL is known.
    Document { name: String, href: Option<String>, local: bool },
}

impl FilePreview {
    pub fn name(&self) -> &str {
        match self {
            Self::Image { name, .. } | Self::Document { name, .. } => name,
        }
    }

    /// Object URL owned by this page, to revoke once replaced.
    pub fn local_url(&self) -> Option<&str> {
        match self {
            Self::Image { src, local: true, .. } => Some(src),
            Self::Document { href: Some(href), local: true, .. } => Some(href),
            _ => None,
        }
    }
}

/// Size is checked before type, so an oversize file reports size regardless
/// of its MIME type.
pub fn validate_upload(meta: &FileMeta) -> Result<(), &'static str> {
    if meta.size > MAX_UPLOAD_BYTES {
        return Err(FILE_TOO_LARGE);
    }
    if !ACCEPTED_MIME_TYPES.contains(&meta.mime.as_str()) {
        return Err(INVALID_FILE_TYPE);
    }
    Ok(())
}

pub fn preview_for_upload(meta: &FileMeta, object_url: String) -> FilePreview {
    if meta.is_image() {
        FilePreview::Image { src: object_url, name: meta.name.clone(), local: true }
    } else {
        FilePreview::Document { name: meta.name.clone(), href: Some(object_url), local: true }
    }
}

/// Preview for a document reference stored on the server. Absolute URLs to
/// images render as images; other URLs and bare file names render by name.
pub fn preview_from_server(reference: &str) -> Option<FilePreview> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    let is_url = reference.starts_with("http://") || reference.starts_with("https://") || reference.starts_with('/');
    if !is_url {
        return Some(FilePreview::Document { name: reference.to_owned(), href: None, local: false });
    }
    let path = reference.split(['?', '#']).next().unwrap_or(reference);
    let name = path.rsplit('/').next().filter(|n| !n.is_empty()).unwrap_or(path).to_owned();
    let is_image = name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    Some(if is_image {
        FilePreview::Image { src: reference.to_owned(), name, local: false }
    } else {
        FilePreview::Document { name, href: Some(reference.to_owned()), local: false }
    })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileSlot {
    pub preview: Option<FilePreview>,
    /// Set once the user attaches a new file in this session.
    pub attached: Option<FileMeta>,
    pub error: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileForm {
    pub profile: Profile,
    pub slots: [FileSlot; 4],
    pub ifsc_error: Option<&'static str>,
    pub aadhaar_error: Option<&'static str>,
    pub loading: bool,
    pub load_error: Option<String>,
    pub submitting: bool,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            slots: Default::default(),
            ifsc_error: None,
            aadhaar_error: None,
            loading: true,
            load_error: None,
            submitting: false,
        }
    }
}

impl ProfileForm {
    /// Replace the form with a freshly loaded profile. Edits, blur errors and
    /// attachments from before the load are discarded.
    ///
    /// Returns the page-owned object URLs the old previews held, for
    /// revocation.
    pub fn load_succeeded(&mut self, mut profile: Profile) -> Vec<String> {
        profile.mobile_number = validate::last_ten_digits(&profile.mobile_number);
        let mut released = Vec::new();
        for field in FileField::ALL {
            let slot = &mut self.slots[field.index()];
            if let Some(url) = slot.preview.as_ref().and_then(FilePreview::local_url) {
                released.push(url.to_owned());
            }
            *slot = FileSlot { preview: field.server_url(&profile).and_then(preview_from_server), ..FileSlot::default() };
        }
        self.profile = profile;
        self.ifsc_error = None;
        self.aadhaar_error = None;
        self.loading = false;
        self.load_error = None;
        released
    }

    pub fn load_failed(&mut self, message: String) {
        self.loading = false;
        self.load_error = Some(message);
    }

    pub fn slot(&self, field: FileField) -> &FileSlot {
        &self.slots[field.index()]
    }

    // =============================================================
    // Field filters and blur validators
    // =============================================================

    pub fn set_land_size(&mut self, raw: &str) {
        self.profile.land_size = validate::decimal_only(raw);
    }

    pub fn set_bank_account(&mut self, raw: &str) {
        self.profile.bank_account_number = digits_only(raw, BANK_ACCOUNT_MAX_DIGITS);
    }

    pub fn set_aadhaar(&mut self, raw: &str) {
        self.profile.aadhaar_number = digits_only(raw, 12);
    }

    pub fn set_ifsc(&mut self, raw: &str) {
        self.profile.ifsc_code = raw.trim().to_ascii_uppercase();
    }

    pub fn set_mobile(&mut self, raw: &str) {
        self.profile.mobile_number = digits_only(raw, 10);
    }

    pub fn blur_ifsc(&mut self) {
        self.ifsc_error = validate::validate_ifsc(&self.profile.ifsc_code).err();
    }

    pub fn blur_aadhaar(&mut self) {
        self.aadhaar_error = validate::validate_aadhaar(&self.profile.aadhaar_number).err();
    }

    // =============================================================
    // Uploads
    // =============================================================

    /// Attach a picked file. On rejection the previous preview stays and the
    /// slot shows the error; `make_object_url` is only called on acceptance.
    ///
    /// Returns the replaced page-owned object URL, if any, for revocation.
    pub fn attach<F>(&mut self, field: FileField, meta: FileMeta, make_object_url: F) -> Result<Option<String>, &'static str>
    where
        F: FnOnce() -> Option<String>,
    {
        let slot = &mut self.slots[field.index()];
        if let Err(message) = validate_upload(&meta) {
            slot.error = Some(message);
            return Err(message);
        }
        let replaced = slot.preview.as_ref().and_then(FilePreview::local_url).map(str::to_owned);
        slot.preview = match make_object_url() {
            Some(url) => Some(preview_for_upload(&meta, url)),
            None => Some(FilePreview::Document { name: meta.name.clone(), href: None, local: false }),
        };
        slot.attached = Some(meta);
        slot.error = None;
        Ok(replaced)
    }

    pub fn attached_fields(&self) -> Vec<FileField> {
        FileField::ALL.into_iter().filter(|f| self.slot(*f).attached.is_some()).collect()
    }

    // =============================================================
    // Submit
    // =============================================================

    /// Re-run blur validators on filled fields before submitting.
    pub fn validate_for_submit(&mut self) -> Result<(), &'static str> {
        if !self.profile.ifsc_code.is_empty() {
            self.blur_ifsc();
        }
        if !self.profile.aadhaar_number.is_empty() {
            self.blur_aadhaar();
        }
        match self.ifsc_error.or(self.aadhaar_error) {
            Some(message) => Err(message),
            None => Ok(()),
        }
    }

    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    /// Re-enable the submit button after success or failure.
    pub fn submit_finished(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            for slot in &mut self.slots {
                slot.attached = None;
            }
        }
    }

    /// Every text field, in multipart order.
    pub fn multipart_fields(&self) -> Vec<(&'static str, String)> {
        let p = &self.profile;
        vec![
            ("full_name", p.full_name.clone()),
            ("email_address", p.email_address.clone()),
            ("mobile_number", p.mobile_number.clone()),
            ("aadhaar_number", p.aadhaar_number.clone()),
            ("state", p.state.clone()),
            ("district", p.district.clone()),
            ("taluka", p.taluka.clone()),
            ("village", p.village.clone()),
            ("address", p.address.clone()),
            ("land_size", p.land_size.clone()),
            ("unit", p.unit.clone()),
            ("soil_type", p.soil_type.clone()),
            ("ownership_type", p.ownership_type.clone()),
            ("bank_account_number", p.bank_account_number.clone()),
            ("ifsc_code", p.ifsc_code.clone()),
            ("bank_name", p.bank_name.clone()),
        ]
    }
}
