use super::*;
use crate::util::validate::{INVALID_EMAIL, MOBILE_LENGTH, PASSWORD_MISMATCH, WEAK_PASSWORD};

fn filled_wizard() -> AuthWizard {
    let mut w = AuthWizard::default();
    w.select_role(Role::Farmer);
    w.set_login_identifier("farmer@example.com");
    w.login.password = "Secret#12".to_owned();
    w.set_login_mobile("9876543210");
    w.login.otp = "1234".to_owned();
    w.set_signup_name("Asha Devi");
    w.set_signup_email("asha@example.com");
    w.set_signup_mobile("9123456780");
    w.set_signup_aadhaar("123456789012");
    w.set_signup_password("Secret#12");
    w.set_signup_confirm("Secret#12");
    w.signup.otp = "9999".to_owned();
    w.forgot.email = "asha@example.com".to_owned();
    w.forgot.otp = "5555".to_owned();
    w
}

fn login_is_empty(d: &LoginDraft) -> bool {
    d.identifier.is_empty() && d.password.is_empty() && d.mobile.is_empty() && d.otp.is_empty() && d.user_id.is_none()
}

fn signup_is_empty(d: &SignupDraft) -> bool {
    d.full_name.is_empty()
        && d.email.is_empty()
        && d.mobile.is_empty()
        && d.aadhaar.is_empty()
        && d.password.is_empty()
        && d.confirm_password.is_empty()
        && d.otp.is_empty()
        && d.stage == SignupStage::Details
}

fn forgot_is_empty(d: &ForgotDraft) -> bool {
    d.email.is_empty()
        && d.otp.is_empty()
        && d.new_password.is_empty()
        && d.confirm_password.is_empty()
        && d.step == ForgotStep::Email
        && d.error.is_none()
}

// =============================================================
// Mode switches empty drafts
// =============================================================

#[test]
fn select_tab_resets_every_draft_and_role() {
    for target in [AuthMode::Login, AuthMode::Signup] {
        let mut w = filled_wizard();
        w.toggle_login_method();
        w.select_tab(target);
        assert_eq!(w.mode, target);
        assert!(login_is_empty(&w.login));
        assert!(signup_is_empty(&w.signup));
        assert!(forgot_is_empty(&w.forgot));
        assert_eq!(w.role, None);
        assert_eq!(w.login_method, LoginMethod::Password);
        assert_eq!(w.signup_method, SignupMethod::Email);
    }
}

#[test]
fn toggling_login_method_resets_only_login_draft() {
    let mut w = filled_wizard();
    let signup_before = w.signup.clone();
    w.toggle_login_method();
    assert_eq!(w.login_method, LoginMethod::MobileOtp);
    assert!(login_is_empty(&w.login));
    assert_eq!(w.signup, signup_before);
    assert_eq!(w.role, Some(Role::Farmer));
}

#[test]
fn toggling_signup_method_resets_only_signup_draft() {
    let mut w = filled_wizard();
    let login_before = w.login.clone();
    w.toggle_signup_method();
    assert_eq!(w.signup_method, SignupMethod::MobileOtp);
    assert!(signup_is_empty(&w.signup));
    assert_eq!(w.login, login_before);
}

#[test]
fn opening_forgot_password_leaves_login_empty() {
    let mut w = filled_wizard();
    w.open_forgot_password();
    assert_eq!(w.mode, AuthMode::ForgotPassword);
    assert!(login_is_empty(&w.login));
    assert!(forgot_is_empty(&w.forgot));
}

#[test]
fn back_to_login_resets_forgot_draft() {
    let mut w = AuthWizard::default();
    w.open_forgot_password();
    w.forgot.email = "a@b.co".to_owned();
    w.forgot_step_succeeded();
    w.back_to_login();
    assert_eq!(w.mode, AuthMode::Login);
    assert!(forgot_is_empty(&w.forgot));
}

// =============================================================
// Role gating
// =============================================================

#[test]
fn submit_disabled_until_role_selected() {
    let mut w = AuthWizard::default();
    assert!(!w.submit_enabled());
    w.toggle_role_menu();
    assert!(w.role_menu_open);
    w.select_role(Role::SubsidyProvider);
    assert!(!w.role_menu_open);
    assert!(w.submit_enabled());
    assert!(w.begin_request());
    assert!(!w.submit_enabled());
    assert!(!w.begin_request());
}

#[test]
fn password_login_requires_role() {
    let mut w = AuthWizard::default();
    w.set_login_identifier("farmer@example.com");
    assert_eq!(w.validate_password_login(), Err(ROLE_REQUIRED));
    w.select_role(Role::Officer);
    assert_eq!(w.validate_password_login(), Ok(Role::Officer));
}

#[test]
fn role_api_values_are_snake_case() {
    let values: Vec<_> = Role::ALL.iter().map(|r| r.api_value()).collect();
    assert_eq!(values, vec!["farmer", "officer", "admin", "subsidy_provider"]);
    assert_eq!(Role::SubsidyProvider.label(), "Subsidy Provider");
}

// =============================================================
// Login form
// =============================================================

#[test]
fn login_identifier_live_errors_follow_input_kind() {
    let mut w = AuthWizard::default();
    w.set_login_identifier("98765");
    assert_eq!(w.login.identifier_error, Some(MOBILE_LENGTH));
    w.set_login_identifier("asha@");
    assert_eq!(w.login.identifier_error, Some(INVALID_EMAIL));
    w.set_login_identifier("");
    assert_eq!(w.login.identifier_error, None);
}

#[test]
fn login_identifier_rejects_short_mobile_on_submit() {
    let mut w = AuthWizard::default();
    w.select_role(Role::Farmer);
    w.set_login_identifier("987654321");
    assert_eq!(w.validate_password_login(), Err(validate::INVALID_LOGIN_IDENTIFIER));
}

#[test]
fn mobile_otp_request_validates_ten_digits() {
    let mut w = AuthWizard::default();
    w.select_role(Role::Farmer);
    w.set_login_mobile("98765-4321");
    assert_eq!(w.login.mobile, "987654321");
    assert_eq!(w.validate_login_otp_request(), Err(INVALID_MOBILE));
    w.set_login_mobile("98765432109");
    assert_eq!(w.login.mobile, "9876543210");
    assert_eq!(w.validate_login_otp_request(), Ok(Role::Farmer));
}

#[test]
fn login_otp_flow_tracks_user_id_and_cooldown() {
    let mut w = AuthWizard::default();
    assert_eq!(w.validate_login_otp_verify(), Err(OTP_REQUIRED));
    w.login_otp_sent("42".to_owned());
    assert!(w.login.otp_sent());
    assert_eq!(w.login.resend_cooldown, RESEND_COOLDOWN_SECS);
    assert_eq!(w.validate_login_otp_verify(), Err(OTP_REQUIRED));
    w.login.otp = "1234".to_owned();
    assert_eq!(w.validate_login_otp_verify(), Ok("42".to_owned()));
}

#[test]
fn login_success_clears_draft_and_role() {
    let mut w = filled_wizard();
    w.login_succeeded();
    assert!(login_is_empty(&w.login));
    assert_eq!(w.role, None);
}

// =============================================================
// Signup form
// =============================================================

#[test]
fn signup_password_mismatch_uses_fixed_text() {
    let mut w = filled_wizard();
    w.set_signup_confirm("Secret#13");
    assert_eq!(w.signup.password_error, Some(PASSWORD_MISMATCH));
    assert_eq!(w.validate_signup(), Err(PASSWORD_MISMATCH));
}

#[test]
fn signup_weak_password_is_rejected() {
    let mut w = filled_wizard();
    w.set_signup_password("abcdefgh");
    w.set_signup_confirm("abcdefgh");
    assert_eq!(w.signup.password_error, Some(WEAK_PASSWORD));
    assert_eq!(w.validate_signup(), Err(WEAK_PASSWORD));
}

#[test]
fn signup_checks_identifier_for_active_method() {
    let mut w = filled_wizard();
    w.set_signup_email("nope");
    assert_eq!(w.validate_signup(), Err(INVALID_EMAIL));

    w.toggle_signup_method();
    w.set_signup_name("Asha Devi");
    w.set_signup_mobile("12345");
    w.set_signup_password("Secret#12");
    w.set_signup_confirm("Secret#12");
    assert_eq!(w.validate_signup(), Err(validate::INVALID_MOBILE));
    w.set_signup_mobile("9123456780");
    assert_eq!(w.validate_signup(), Ok(Role::Farmer));
}

#[test]
fn signup_requires_role_and_name() {
    let mut w = filled_wizard();
    w.role = None;
    assert_eq!(w.validate_signup(), Err(ROLE_REQUIRED));
    w.select_role(Role::Farmer);
    w.set_signup_name("");
    assert_eq!(w.validate_signup(), Err(NAME_REQUIRED));
}

#[test]
fn signup_payload_sends_only_active_identifier() {
    let mut w = filled_wizard();
    let payload = w.signup_payload(Role::SubsidyProvider);
    assert_eq!(payload.email_address.as_deref(), Some("asha@example.com"));
    assert_eq!(payload.mobile_number, None);
    assert_eq!(payload.aadhaar_number.as_deref(), Some("123456789012"));
    assert_eq!(payload.role, "subsidy_provider");

    w.toggle_signup_method();
    w.set_signup_mobile("9123456780");
    let payload = w.signup_payload(Role::Farmer);
    assert_eq!(payload.email_address, None);
    assert_eq!(payload.mobile_number.as_deref(), Some("9123456780"));
    assert_eq!(payload.aadhaar_number, None);
}

#[test]
fn signup_otp_stage_then_completion_returns_to_login() {
    let mut w = filled_wizard();
    w.signup_otp_sent(Some("7".to_owned()));
    assert_eq!(w.signup.stage, SignupStage::VerifyOtp);
    assert_eq!(w.signup.user_id.as_deref(), Some("7"));
    assert_eq!(w.validate_signup_otp(), Err(OTP_REQUIRED));
    w.signup.otp = "1111".to_owned();
    assert_eq!(w.validate_signup_otp(), Ok(()));
    w.signup_completed();
    assert_eq!(w.mode, AuthMode::Login);
    assert!(signup_is_empty(&w.signup));
}

#[test]
fn cooldown_counts_down_to_zero() {
    let mut w = AuthWizard::default();
    w.signup_otp_sent(None);
    for _ in 0..RESEND_COOLDOWN_SECS {
        assert!(w.cooldown_active());
        w.tick_cooldown();
    }
    assert!(!w.cooldown_active());
    w.tick_cooldown();
    assert_eq!(w.signup.resend_cooldown, 0);
    w.restart_signup_cooldown();
    assert_eq!(w.signup.resend_cooldown, RESEND_COOLDOWN_SECS);
}

// =============================================================
// Forgot password steps
// =============================================================

#[test]
fn forgot_step_advances_on_success() {
    let mut w = AuthWizard::default();
    w.open_forgot_password();
    assert_eq!(w.forgot.step.number(), 1);
    w.forgot_step_succeeded();
    assert_eq!(w.forgot.step, ForgotStep::Otp);
    w.forgot_step_succeeded();
    assert_eq!(w.forgot.step, ForgotStep::NewPassword);
    w.forgot_step_succeeded();
    assert_eq!(w.mode, AuthMode::Login);
    assert!(forgot_is_empty(&w.forgot));
}

#[test]
fn forgot_step_failure_keeps_step_and_fields() {
    let mut w = AuthWizard::default();
    w.open_forgot_password();
    w.forgot.email = "asha@example.com".to_owned();
    w.forgot_step_succeeded();
    w.forgot.otp = "0000".to_owned();
    assert!(w.begin_request());
    w.forgot_step_failed("Invalid OTP".to_owned());
    assert_eq!(w.forgot.step, ForgotStep::Otp);
    assert_eq!(w.forgot.otp, "0000");
    assert_eq!(w.forgot.error.as_deref(), Some("Invalid OTP"));
    assert!(!w.pending);
}

#[test]
fn forgot_step_validation_per_step() {
    let mut w = AuthWizard::default();
    w.open_forgot_password();
    w.forgot.email = "bad".to_owned();
    assert_eq!(w.validate_forgot_step(), Err(INVALID_EMAIL));
    assert_eq!(w.forgot.error.as_deref(), Some(INVALID_EMAIL));
    w.forgot.email = "asha@example.com".to_owned();
    assert_eq!(w.validate_forgot_step(), Ok(()));
    assert_eq!(w.forgot.error, None);

    w.forgot_step_succeeded();
    assert_eq!(w.validate_forgot_step(), Err(FORGOT_OTP_REQUIRED));

    w.forgot_step_succeeded();
    w.set_forgot_new_password("Secret#12");
    w.set_forgot_confirm("Secret#1");
    assert_eq!(w.forgot.error.as_deref(), Some(PASSWORD_MISMATCH));
    assert_eq!(w.validate_forgot_step(), Err(PASSWORD_MISMATCH));
    w.set_forgot_confirm("Secret#12");
    assert_eq!(w.validate_forgot_step(), Ok(()));
}
