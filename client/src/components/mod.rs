//! Reusable UI components for the portal screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render state owned by `state::*` signals and report user intent
//! through callbacks or state transitions; network calls stay in the auth forms
//! and pages that own the flow.

pub mod application_review_modal;
pub mod file_upload;
pub mod forgot_password_form;
pub mod login_form;
pub mod navbar;
pub mod password_input;
pub mod reviews_modal;
pub mod role_dropdown;
pub mod signup_form;
pub mod social_login;
pub mod subsidy_detail_modal;
pub mod toast_host;
