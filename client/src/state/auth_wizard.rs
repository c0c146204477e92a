//! Login / signup / forgot-password wizard state.
//!
//! DESIGN
//! ======
//! One [`AuthWizard`] value holds every draft the auth screen can show. Views
//! mutate it only through the transition methods below, which enforce two
//! rules: exactly one [`AuthMode`] is active, and the drafts of whatever form is
//! being left are emptied on every mode or method switch.
//!
//! Network calls live in the components; they report back through the
//! `*_succeeded` / `*_failed` transitions so step advancement stays here.

#[cfg(test)]
#[path = "auth_wizard_test.rs"]
mod auth_wizard_test;

use crate::net::api::SignupPayload;
use crate::util::validate::{self, INVALID_MOBILE, email_typing_error, login_identifier_filter, mobile_typing_error};

pub const ROLE_REQUIRED: &str = "Please select a role.";
pub const OTP_REQUIRED: &str = "Enter the OTP sent to you.";
pub const FORGOT_OTP_REQUIRED: &str = "Enter the OTP sent to your email.";
pub const NAME_REQUIRED: &str = "Full name is required.";

/// Seconds before an OTP may be resent.
pub const RESEND_COOLDOWN_SECS: u32 = 30;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
    ForgotPassword,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginMethod {
    #[default]
    Password,
    MobileOtp,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignupMethod {
    #[default]
    Email,
    MobileOtp,
}

/// Account role chosen in the role dropdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Farmer,
    Officer,
    Admin,
    SubsidyProvider,
}

impl Role {
    pub const ALL: [Self; 4] = [Self::Farmer, Self::Officer, Self::Admin, Self::SubsidyProvider];

    pub fn label(self) -> &'static str {
        match self {
            Self::Farmer => "Farmer",
            Self::Officer => "Officer",
            Self::Admin => "Admin",
            Self::SubsidyProvider => "Subsidy Provider",
        }
    }

    /// Snake-case value sent to the API and stored in the session.
    pub fn api_value(self) -> &'static str {
        match self {
            Self::Farmer => "farmer",
            Self::Officer => "officer",
            Self::Admin => "admin",
            Self::SubsidyProvider => "subsidy_provider",
        }
    }
}

/// Forgot-password progress marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ForgotStep {
    #[default]
    Email,
    Otp,
    NewPassword,
}

impl ForgotStep {
    pub fn number(self) -> u8 {
        match self {
            Self::Email => 1,
            Self::Otp => 2,
            Self::NewPassword => 3,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginDraft {
    /// Email or mobile for password login.
    pub identifier: String,
    pub password: String,
    pub mobile: String,
    pub otp: String,
    /// Set once the OTP has been sent; the form then shows the OTP field.
    pub user_id: Option<String>,
    pub identifier_error: Option<&'static str>,
    pub mobile_error: Option<&'static str>,
    pub resend_cooldown: u32,
}

impl LoginDraft {
    pub fn otp_sent(&self) -> bool {
        self.user_id.is_some()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignupStage {
    #[default]
    Details,
    VerifyOtp,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupDraft {
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub aadhaar: String,
    pub password: String,
    pub confirm_password: String,
    pub otp: String,
    pub user_id: Option<String>,
    pub stage: SignupStage,
    pub name_error: Option<&'static str>,
    pub email_error: Option<&'static str>,
    pub mobile_error: Option<&'static str>,
    pub password_error: Option<&'static str>,
    pub resend_cooldown: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForgotDraft {
    pub step: ForgotStep,
    pub email: String,
    pub otp: String,
    pub new_password: String,
    pub confirm_password: String,
    pub error: Option<String>,
}

/// Everything the auth screen renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthWizard {
    pub mode: AuthMode,
    pub login_method: LoginMethod,
    pub signup_method: SignupMethod,
    pub role: Option<Role>,
    pub role_menu_open: bool,
    pub pending: bool,
    pub login: LoginDraft,
    pub signup: SignupDraft,
    pub forgot: ForgotDraft,
}

impl AuthWizard {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode, ..Self::default() }
    }

    // =============================================================
    // Mode transitions
    // =============================================================

    /// Switch between the Login and Signup tabs, resetting every draft.
    pub fn select_tab(&mut self, mode: AuthMode) {
        *self = Self::new(mode);
    }

    pub fn toggle_login_method(&mut self) {
        self.login_method = match self.login_method {
            LoginMethod::Password => LoginMethod::MobileOtp,
            LoginMethod::MobileOtp => LoginMethod::Password,
        };
        self.login = LoginDraft::default();
    }

    pub fn toggle_signup_method(&mut self) {
        self.signup_method = match self.signup_method {
            SignupMethod::Email => SignupMethod::MobileOtp,
            SignupMethod::MobileOtp => SignupMethod::Email,
        };
        self.signup = SignupDraft::default();
    }

    pub fn open_forgot_password(&mut self) {
        self.mode = AuthMode::ForgotPassword;
        self.login = LoginDraft::default();
        self.forgot = ForgotDraft::default();
        self.role_menu_open = false;
        self.pending = false;
    }

    pub fn back_to_login(&mut self) {
        self.mode = AuthMode::Login;
        self.forgot = ForgotDraft::default();
        self.pending = false;
    }

    // =============================================================
    // Role
    // =============================================================

    pub fn toggle_role_menu(&mut self) {
        self.role_menu_open = !self.role_menu_open;
    }

    pub fn select_role(&mut self, role: Role) {
        self.role = Some(role);
        self.role_menu_open = false;
    }

    /// Login and signup submission stay disabled until a role is chosen.
    pub fn submit_enabled(&self) -> bool {
        self.role.is_some() && !self.pending
    }

    fn require_role(&self) -> Result<Role, &'static str> {
        self.role.ok_or(ROLE_REQUIRED)
    }

    // =============================================================
    // Login form
    // =============================================================

    pub fn set_login_identifier(&mut self, raw: &str) {
        let value = login_identifier_filter(raw);
        self.login.identifier_error = if value.chars().all(|c| c.is_ascii_digit()) {
            mobile_typing_error(&value)
        } else {
            email_typing_error(&value)
        };
        self.login.identifier = value;
    }

    pub fn set_login_mobile(&mut self, raw: &str) {
        let value = validate::digits_only(raw, 10);
        self.login.mobile_error = mobile_typing_error(&value);
        self.login.mobile = value;
    }

    pub fn validate_password_login(&mut self) -> Result<Role, &'static str> {
        let role = self.require_role()?;
        if let Err(message) = validate::validate_login_identifier(&self.login.identifier) {
            self.login.identifier_error = Some(message);
            return Err(message);
        }
        self.login.identifier_error = None;
        Ok(role)
    }

    pub fn validate_login_otp_request(&mut self) -> Result<Role, &'static str> {
        if !validate::is_valid_mobile(&self.login.mobile) {
            self.login.mobile_error = Some(INVALID_MOBILE);
            return Err(INVALID_MOBILE);
        }
        self.login.mobile_error = None;
        self.require_role()
    }

    pub fn validate_login_otp_verify(&self) -> Result<String, &'static str> {
        let user_id = self.login.user_id.clone().ok_or(OTP_REQUIRED)?;
        if self.login.otp.trim().is_empty() {
            return Err(OTP_REQUIRED);
        }
        Ok(user_id)
    }

    pub fn login_otp_sent(&mut self, user_id: String) {
        self.login.user_id = Some(user_id);
        self.login.resend_cooldown = RESEND_COOLDOWN_SECS;
        self.pending = false;
    }

    /// Successful login clears the login draft and the chosen role.
    pub fn login_succeeded(&mut self) {
        self.login = LoginDraft::default();
        self.login_method = LoginMethod::Password;
        self.role = None;
        self.pending = false;
    }

    // =============================================================
    // Signup form
    // =============================================================

    pub fn set_signup_name(&mut self, value: &str) {
        self.signup.name_error = if value.is_empty() { None } else { validate::validate_full_name(value).err() };
        self.signup.full_name = value.to_owned();
    }

    pub fn set_signup_email(&mut self, value: &str) {
        self.signup.email_error = email_typing_error(value);
        self.signup.email = value.to_owned();
    }

    pub fn set_signup_mobile(&mut self, raw: &str) {
        let value = validate::digits_only(raw, 10);
        self.signup.mobile_error = mobile_typing_error(&value);
        self.signup.mobile = value;
    }

    pub fn set_signup_aadhaar(&mut self, raw: &str) {
        self.signup.aadhaar = validate::digits_only(raw, 12);
    }

    pub fn set_signup_password(&mut self, value: &str) {
        self.signup.password = value.to_owned();
        self.signup.password_error = live_password_error(&self.signup.password, &self.signup.confirm_password);
    }

    pub fn set_signup_confirm(&mut self, value: &str) {
        self.signup.confirm_password = value.to_owned();
        self.signup.password_error = live_password_error(&self.signup.password, &self.signup.confirm_password);
    }

    /// Checks run before `/signup/`. Both methods require the password pair.
    pub fn validate_signup(&mut self) -> Result<Role, &'static str> {
        let role = self.require_role()?;
        if self.signup.full_name.trim().is_empty() {
            self.signup.name_error = Some(NAME_REQUIRED);
            return Err(NAME_REQUIRED);
        }
        if let Err(message) = validate::validate_full_name(&self.signup.full_name) {
            self.signup.name_error = Some(message);
            return Err(message);
        }
        match self.signup_method {
            SignupMethod::Email => {
                if let Err(message) = validate::validate_email(&self.signup.email) {
                    self.signup.email_error = Some(message);
                    return Err(message);
                }
            }
            SignupMethod::MobileOtp => {
                if let Err(message) = validate::validate_mobile(&self.signup.mobile) {
                    self.signup.mobile_error = Some(message);
                    return Err(message);
                }
            }
        }
        if !self.signup.aadhaar.is_empty() {
            validate::validate_aadhaar(&self.signup.aadhaar)?;
        }
        if let Err(message) = validate::validate_new_password(&self.signup.password, &self.signup.confirm_password) {
            self.signup.password_error = Some(message);
            return Err(message);
        }
        self.signup.password_error = None;
        Ok(role)
    }

    /// Submission body for the active signup method. Only that method's
    /// identifier is sent.
    pub fn signup_payload(&self, role: Role) -> SignupPayload {
        let d = &self.signup;
        let (email_address, mobile_number) = match self.signup_method {
            SignupMethod::Email => (Some(d.email.trim().to_owned()), None),
            SignupMethod::MobileOtp => (None, Some(d.mobile.clone())),
        };
        SignupPayload {
            full_name: d.full_name.trim().to_owned(),
            email_address,
            mobile_number,
            aadhaar_number: Some(d.aadhaar.clone()).filter(|a| !a.is_empty()),
            password: d.password.clone(),
            confirm_password: d.confirm_password.clone(),
            role: role.api_value().to_owned(),
        }
    }

    pub fn validate_signup_otp(&self) -> Result<(), &'static str> {
        if self.signup.otp.trim().is_empty() { Err(OTP_REQUIRED) } else { Ok(()) }
    }

    /// Account created; the server sent an OTP to the chosen identifier.
    pub fn signup_otp_sent(&mut self, user_id: Option<String>) {
        self.signup.user_id = user_id;
        self.signup.stage = SignupStage::VerifyOtp;
        self.signup.otp.clear();
        self.signup.resend_cooldown = RESEND_COOLDOWN_SECS;
        self.pending = false;
    }

    /// Signup verified; return to a clean login tab.
    pub fn signup_completed(&mut self) {
        self.select_tab(AuthMode::Login);
    }

    // =============================================================
    // Forgot password
    // =============================================================

    pub fn set_forgot_new_password(&mut self, value: &str) {
        self.forgot.new_password = value.to_owned();
        self.forgot.error = live_password_error(&self.forgot.new_password, &self.forgot.confirm_password)
            .map(str::to_owned);
    }

    pub fn set_forgot_confirm(&mut self, value: &str) {
        self.forgot.confirm_password = value.to_owned();
        self.forgot.error = live_password_error(&self.forgot.new_password, &self.forgot.confirm_password)
            .map(str::to_owned);
    }

    /// Client-side check for the current forgot-password step.
    pub fn validate_forgot_step(&mut self) -> Result<(), &'static str> {
        let result = match self.forgot.step {
            ForgotStep::Email => validate::validate_email(&self.forgot.email),
            ForgotStep::Otp => {
                if self.forgot.otp.trim().is_empty() { Err(FORGOT_OTP_REQUIRED) } else { Ok(()) }
            }
            ForgotStep::NewPassword => {
                validate::validate_new_password(&self.forgot.new_password, &self.forgot.confirm_password)
            }
        };
        self.forgot.error = result.err().map(str::to_owned);
        result
    }

    /// Server accepted the current step. The final step returns to login.
    pub fn forgot_step_succeeded(&mut self) {
        self.pending = false;
        self.forgot.error = None;
        let next = match self.forgot.step {
            ForgotStep::Email => ForgotStep::Otp,
            ForgotStep::Otp => ForgotStep::NewPassword,
            ForgotStep::NewPassword => {
                self.back_to_login();
                return;
            }
        };
        self.forgot.step = next;
    }

    /// Server rejected the current step; the step and its fields stay put.
    pub fn forgot_step_failed(&mut self, message: String) {
        self.pending = false;
        self.forgot.error = Some(message);
    }

    // =============================================================
    // Shared
    // =============================================================

    pub fn begin_request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn request_failed(&mut self) {
        self.pending = false;
    }

    /// Advance both resend countdowns by one second.
    pub fn tick_cooldown(&mut self) {
        self.login.resend_cooldown = self.login.resend_cooldown.saturating_sub(1);
        self.signup.resend_cooldown = self.signup.resend_cooldown.saturating_sub(1);
    }

    pub fn cooldown_active(&self) -> bool {
        self.login.resend_cooldown > 0 || self.signup.resend_cooldown > 0
    }

    pub fn restart_login_cooldown(&mut self) {
        self.login.resend_cooldown = RESEND_COOLDOWN_SECS;
    }

    pub fn restart_signup_cooldown(&mut self) {
        self.signup.resend_cooldown = RESEND_COOLDOWN_SECS;
    }
}

/// Inline message while typing a new password pair: strength first, then a
/// mismatch once the confirmation has content.
fn live_password_error(password: &str, confirm: &str) -> Option<&'static str> {
    if !password.is_empty() && !validate::is_strong_password(password) {
        return Some(validate::WEAK_PASSWORD);
    }
    if !confirm.is_empty() && password != confirm {
        return Some(validate::PASSWORD_MISMATCH);
    }
    None
}
