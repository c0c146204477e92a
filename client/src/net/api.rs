//! REST client for the portal API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: every call resolves to
//! [`ApiError::Unavailable`], since these endpoints are only meaningful in the
//! browser.
//!
//! DESIGN
//! ======
//! [`ApiClient`] owns the base URL and an injected [`TokenStore`]; the bearer
//! header is attached whenever the store holds an access token. Request bodies
//! are built by plain functions so payload shape is testable without a browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Status`] carrying the server's message
//! when the body has one. Callers choose a fallback via `user_message`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::error::ApiError;
use super::types::{
    Application, ApplicationDocument, LoginResponse, MessageResponse, OtpChallenge, Profile, Review, Subsidy,
    SubsidyPage, parse_application_documents, parse_applications, parse_reviews, parse_subsidy_page,
};
use crate::util::storage::{BrowserTokenStore, REFRESH_KEY, TokenStore};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const SUBSIDY_PAGE_SIZE: u32 = 10;

/// Resolve the API root: `raw` (or the default host) without a trailing
/// slash, plus `/api`.
pub fn api_base_url(raw: Option<&str>) -> String {
    let host = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_API_BASE_URL);
    format!("{}/api", host.trim_end_matches('/'))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
}

/// Fields of a signup submission. Exactly one identifier is normally set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupPayload {
    pub full_name: String,
    pub email_address: Option<String>,
    pub mobile_number: Option<String>,
    pub aadhaar_number: Option<String>,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
}

pub fn signup_body(payload: &SignupPayload) -> Value {
    let mut body = json!({
        "full_name": payload.full_name,
        "password": payload.password,
        "confirm_password": payload.confirm_password,
        "role": payload.role,
    });
    for (key, value) in [
        ("email_address", &payload.email_address),
        ("mobile_number", &payload.mobile_number),
        ("aadhaar_number", &payload.aadhaar_number),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            body[key] = json!(value);
        }
    }
    body
}

pub fn subsidies_path(page: u32) -> String {
    format!("/subsidies/?page={}&page_size={SUBSIDY_PAGE_SIZE}", page.max(1))
}

pub fn subsidy_reviews_path(subsidy_id: i64) -> String {
    format!("/subsidies/{subsidy_id}/reviews/")
}

pub fn subsidy_path(subsidy_id: i64) -> String {
    format!("/subsidies/{subsidy_id}/")
}

pub const APPLICATIONS_PATH: &str = "/subsidy-applications/";

pub fn application_path(application_id: i64) -> String {
    format!("{APPLICATIONS_PATH}{application_id}/")
}

pub fn application_documents_path(application_id: i64) -> String {
    format!("{APPLICATIONS_PATH}{application_id}/documents/")
}

pub fn application_upload_path(application_id: i64) -> String {
    format!("{APPLICATIONS_PATH}{application_id}/upload-document/")
}

/// Officer review endpoint, e.g. `approve` or `mark-under-review`.
pub fn application_action_path(application_id: i64, action: &str) -> String {
    format!("{APPLICATIONS_PATH}{application_id}/{action}/")
}

/// Multipart body: text fields plus browser files.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: Vec<(&'static str, String)>,
    #[cfg(feature = "hydrate")]
    pub files: Vec<(&'static str, web_sys::File)>,
}

impl MultipartForm {
    pub fn new(fields: Vec<(&'static str, String)>) -> Self {
        Self {
            fields,
            #[cfg(feature = "hydrate")]
            files: Vec::new(),
        }
    }

    #[cfg(feature = "hydrate")]
    pub fn attach(&mut self, key: &'static str, file: web_sys::File) {
        self.files.push((key, file));
    }

    #[cfg(feature = "hydrate")]
    fn to_form_data(&self) -> Result<web_sys::FormData, ApiError> {
        let form = web_sys::FormData::new().map_err(|_| ApiError::Network("FormData unavailable".to_owned()))?;
        for (key, value) in &self.fields {
            form.append_with_str(key, value)
                .map_err(|_| ApiError::Network(format!("failed to append field {key}")))?;
        }
        for (key, file) in &self.files {
            form.append_with_blob_and_filename(key, file, &file.name())
                .map_err(|_| ApiError::Network(format!("failed to append file {key}")))?;
        }
        Ok(form)
    }
}

/// Portal API handle, cheap to clone and shared through context.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { base_url: base_url.into(), tokens }
    }

    /// Browser client configured from `PORTAL_API_BASE_URL` at build time.
    pub fn from_build_env() -> Self {
        Self::new(api_base_url(option_env!("PORTAL_API_BASE_URL")), Arc::new(BrowserTokenStore))
    }

    pub fn tokens(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.tokens)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn authorization_header(&self) -> Option<String> {
        self.tokens.access_token().map(|token| format!("Bearer {token}"))
    }

    // =============================================================
    // Signup
    // =============================================================

    pub async fn signup(&self, payload: &SignupPayload) -> Result<OtpChallenge, ApiError> {
        self.send(Method::Post, "/signup/", Some(signup_body(payload))).await
    }

    pub async fn verify_signup_email(&self, email: &str, otp: &str) -> Result<MessageResponse, ApiError> {
        let body = json!({ "email_address": email, "otp": otp });
        self.send(Method::Post, "/verify-email/", Some(body)).await
    }

    pub async fn verify_signup_mobile(&self, user_id: &str, otp: &str) -> Result<MessageResponse, ApiError> {
        let body = json!({ "user_id": user_id, "otp": otp });
        self.send(Method::Post, "/verify-mobile-otp/", Some(body)).await
    }

    pub async fn resend_email_otp(&self, email: &str) -> Result<MessageResponse, ApiError> {
        self.send(Method::Post, "/resend-email-otp/", Some(json!({ "email_address": email }))).await
    }

    pub async fn resend_mobile_otp(&self, user_id: &str) -> Result<MessageResponse, ApiError> {
        self.send(Method::Post, "/resend-mobile-otp/", Some(json!({ "user_id": user_id }))).await
    }

    // =============================================================
    // Login
    // =============================================================

    /// Password login. `identifier` is an email address or 10-digit mobile.
    pub async fn login_with_password(
        &self,
        identifier: &str,
        password: &str,
        role: &str,
    ) -> Result<LoginResponse, ApiError> {
        let body = json!({ "email_address": identifier, "password": password, "role": role });
        self.send(Method::Post, "/token/", Some(body)).await
    }

    pub async fn request_login_otp(&self, mobile: &str, role: &str) -> Result<OtpChallenge, ApiError> {
        let body = json!({ "mobile_number": mobile, "role": role });
        self.send(Method::Post, "/login/", Some(body)).await
    }

    pub async fn verify_login_otp(&self, user_id: &str, otp: &str) -> Result<LoginResponse, ApiError> {
        let body = json!({ "user_id": user_id, "otp": otp });
        self.send(Method::Post, "/verify-otp/", Some(body)).await
    }

    /// Exchange an identity-provider credential for portal tokens.
    pub async fn exchange_social_token(&self, credential: &str) -> Result<LoginResponse, ApiError> {
        self.send(Method::Post, "/google-login/", Some(json!({ "token": credential }))).await
    }

    // =============================================================
    // Password recovery / account
    // =============================================================

    pub async fn forgot_password_send_otp(&self, email: &str) -> Result<MessageResponse, ApiError> {
        self.send(Method::Post, "/forgot-password/", Some(json!({ "email": email }))).await
    }

    pub async fn forgot_password_verify_otp(&self, email: &str, otp: &str) -> Result<MessageResponse, ApiError> {
        let body = json!({ "email": email, "otp": otp });
        self.send(Method::Post, "/forgot-password/verify-otp/", Some(body)).await
    }

    pub async fn forgot_password_reset(&self, email: &str, new_password: &str) -> Result<MessageResponse, ApiError> {
        let body = json!({ "email": email, "new_password": new_password });
        self.send(Method::Post, "/forgot-password/reset-password/", Some(body)).await
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let body = json!({
            "old_password": old_password,
            "new_password": new_password,
            "confirm_password": confirm_password,
        });
        self.send(Method::Post, "/change-password/", Some(body)).await
    }

    /// Best-effort server logout; local tokens are cleared regardless.
    pub async fn logout(&self) {
        let body = json!({ "refresh": self.tokens.get(REFRESH_KEY) });
        if let Err(e) = self.send::<Value>(Method::Post, "/logout/", Some(body)).await {
            leptos::logging::warn!("logout request failed: {e}");
        }
        self.tokens.clear_session();
    }

    // =============================================================
    // Subsidies / profile
    // =============================================================

    pub async fn fetch_subsidies(&self, page: u32) -> Result<SubsidyPage, ApiError> {
        let body: Value = self.send(Method::Get, &subsidies_path(page), None).await?;
        Ok(parse_subsidy_page(body))
    }

    pub async fn fetch_reviews(&self, subsidy_id: i64) -> Result<Vec<Review>, ApiError> {
        let body: Value = self.send(Method::Get, &subsidy_reviews_path(subsidy_id), None).await?;
        Ok(parse_reviews(body))
    }

    pub async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        self.send(Method::Get, "/profile/", None).await
    }

    pub async fn update_profile(&self, form: &MultipartForm) -> Result<MessageResponse, ApiError> {
        self.send_form(Method::Put, "/profile/", form).await
    }

    // =============================================================
    // Applications
    // =============================================================

    pub async fn fetch_subsidy(&self, subsidy_id: i64) -> Result<Subsidy, ApiError> {
        self.send(Method::Get, &subsidy_path(subsidy_id), None).await
    }

    pub async fn create_application(&self, body: Value) -> Result<Application, ApiError> {
        self.send(Method::Post, APPLICATIONS_PATH, Some(body)).await
    }

    /// Attach one document (`document_type` + `file`) to an application.
    pub async fn upload_application_document(
        &self,
        application_id: i64,
        form: &MultipartForm,
    ) -> Result<ApplicationDocument, ApiError> {
        self.send_form(Method::Post, &application_upload_path(application_id), form).await
    }

    pub async fn fetch_applications(&self) -> Result<Vec<Application>, ApiError> {
        let body: Value = self.send(Method::Get, APPLICATIONS_PATH, None).await?;
        Ok(parse_applications(body))
    }

    pub async fn fetch_application(&self, application_id: i64) -> Result<Application, ApiError> {
        self.send(Method::Get, &application_path(application_id), None).await
    }

    pub async fn fetch_application_documents(&self, application_id: i64) -> Result<Vec<ApplicationDocument>, ApiError> {
        let body: Value = self.send(Method::Get, &application_documents_path(application_id), None).await?;
        Ok(parse_application_documents(body))
    }

    /// Officer decision on an application; `action` is the endpoint slug.
    pub async fn review_application(&self, application_id: i64, action: &str, body: Value) -> Result<Value, ApiError> {
        self.send(Method::Post, &application_action_path(application_id, action), Some(body)).await
    }

    async fn send_form<T: DeserializeOwned>(&self, method: Method, path: &str, form: &MultipartForm) -> Result<T, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let form_data = form.to_form_data()?;
            let url = self.endpoint(path);
            let mut builder = match method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
            };
            if let Some(auth) = self.authorization_header() {
                builder = builder.header("Authorization", &auth);
            }
            let request = builder.body(form_data).map_err(|e| ApiError::Network(e.to_string()))?;
            let body = read_response(request).await?;
            decode(body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (method, path, form);
            Err(ApiError::Unavailable)
        }
    }

    async fn send<T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let url = self.endpoint(path);
            let mut builder = match method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
            };
            if let Some(auth) = self.authorization_header() {
                builder = builder.header("Authorization", &auth);
            }
            let request = match body {
                Some(body) => builder.json(&body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;
            let body = read_response(request).await?;
            decode(body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (method, path, body);
            Err(ApiError::Unavailable)
        }
    }
}

#[cfg(feature = "hydrate")]
async fn read_response(request: gloo_net::http::Request) -> Result<Value, ApiError> {
    let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
    let status = resp.status();
    let text = resp.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
    if !resp.ok() {
        return Err(ApiError::from_status_body(status, &text));
    }
    parse_body(&text)
}

/// Parse a success body; empty bodies (204, bare 200) decode as `null`.
fn parse_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    let body = if body.is_null() { json!({}) } else { body };
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}
