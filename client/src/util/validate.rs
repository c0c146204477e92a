//! Field validators and input filters shared by the auth and profile forms.
//!
//! Validators return `Err(&'static str)` with the exact inline message shown
//! under the field, so every form renders identical wording for the same rule.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::sync::LazyLock;

use regex::Regex;

pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const INVALID_MOBILE: &str = "Please enter a valid 10-digit mobile number.";
pub const MOBILE_LENGTH: &str = "Mobile number must be exactly 10 digits.";
pub const INVALID_LOGIN_IDENTIFIER: &str = "Enter a valid 10-digit mobile number or email.";
pub const WEAK_PASSWORD: &str =
    "Password must be at least 8 characters, include 1 letter, 1 digit, and 1 special character.";
pub const INVALID_IFSC: &str = "IFSC code must be exactly 11 characters.";
pub const INVALID_AADHAAR: &str = "Aadhaar number must be exactly 12 digits.";
pub const INVALID_NAME: &str = "Name may only contain letters and spaces.";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("name pattern compiles"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn is_all_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Exactly 10 ASCII digits; anything else (9 or 11 digits, spaces, `+91`) fails.
pub fn is_valid_mobile(value: &str) -> bool {
    is_all_digits(value, 10)
}

pub fn is_valid_aadhaar(value: &str) -> bool {
    is_all_digits(value, 12)
}

/// At least 8 characters with one ASCII letter, one digit, and one
/// non-alphanumeric character.
pub fn is_strong_password(value: &str) -> bool {
    value.chars().count() >= 8
        && value.chars().any(|c| c.is_ascii_alphabetic())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// Byte-equal comparison of a password pair.
pub fn validate_password_pair(password: &str, confirm: &str) -> Result<(), &'static str> {
    if password.as_bytes() == confirm.as_bytes() { Ok(()) } else { Err(PASSWORD_MISMATCH) }
}

/// Validate a new password pair: mismatch first, then emptiness, then strength.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), &'static str> {
    validate_password_pair(password, confirm)?;
    if password.is_empty() {
        return Err("Please fill both fields.");
    }
    if !is_strong_password(password) {
        return Err(WEAK_PASSWORD);
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), &'static str> {
    if is_valid_email(value) { Ok(()) } else { Err(INVALID_EMAIL) }
}

pub fn validate_mobile(value: &str) -> Result<(), &'static str> {
    if is_valid_mobile(value) { Ok(()) } else { Err(INVALID_MOBILE) }
}

/// Password login accepts either a 10-digit mobile number or an email.
pub fn validate_login_identifier(value: &str) -> Result<(), &'static str> {
    if is_valid_mobile(value) || is_valid_email(value) { Ok(()) } else { Err(INVALID_LOGIN_IDENTIFIER) }
}

pub fn validate_full_name(value: &str) -> Result<(), &'static str> {
    if NAME_RE.is_match(value) { Ok(()) } else { Err(INVALID_NAME) }
}

/// Blur validator for the IFSC field.
pub fn validate_ifsc(value: &str) -> Result<(), &'static str> {
    if value.chars().count() == 11 { Ok(()) } else { Err(INVALID_IFSC) }
}

/// Blur validator for the Aadhaar field.
pub fn validate_aadhaar(value: &str) -> Result<(), &'static str> {
    if is_valid_aadhaar(value) { Ok(()) } else { Err(INVALID_AADHAAR) }
}

/// Live inline message for the mobile field while typing: silent when empty.
pub fn mobile_typing_error(value: &str) -> Option<&'static str> {
    if value.is_empty() || value.len() == 10 { None } else { Some(MOBILE_LENGTH) }
}

/// Live inline message for an email field while typing: silent when empty.
pub fn email_typing_error(value: &str) -> Option<&'static str> {
    if value.is_empty() || is_valid_email(value) { None } else { Some(INVALID_EMAIL) }
}

/// Strip non-digits and cap at `max_len` characters.
pub fn digits_only(raw: &str, max_len: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(max_len).collect()
}

/// Keep digits and at most one decimal point.
pub fn decimal_only(raw: &str) -> String {
    let mut seen_dot = false;
    raw.chars()
        .filter(|c| {
            if c.is_ascii_digit() {
                true
            } else if *c == '.' && !seen_dot {
                seen_dot = true;
                true
            } else {
                false
            }
        })
        .collect()
}

/// Characters permitted in an email-or-mobile login identifier.
pub fn login_identifier_filter(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '-'))
        .collect()
}

/// Last ten digits of a stored mobile number (`919876543210` -> `9876543210`).
pub fn last_ten_digits(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    let start = digits.len().saturating_sub(10);
    digits[start..].iter().collect()
}
