//! Wire DTOs for the portal REST API.
//!
//! DESIGN
//! ======
//! The API serializes decimals as strings (`"50000.00"`) and is loose about
//! optional fields, so numeric fields accept either JSON numbers or numeric
//! strings and most fields default when absent.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A subsidy scheme as listed by `/subsidies/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subsidy {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Maximum amount in rupees.
    #[serde(default, deserialize_with = "deserialize_f64_lenient")]
    pub amount: f64,
    /// Average rating, absent when the scheme has no reviews.
    #[serde(default, deserialize_with = "deserialize_opt_f64_lenient")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_opt_f64_lenient")]
    pub ratings_count: Option<f64>,
    #[serde(default)]
    pub eligibility: Vec<String>,
    #[serde(default)]
    pub documents_required: Vec<String>,
    #[serde(default)]
    pub application_start_date: Option<String>,
    #[serde(default)]
    pub application_end_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Subsidy {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn review_count(&self) -> u64 {
        self.ratings_count.filter(|c| c.is_finite() && *c > 0.0).map_or(0, |c| c as u64)
    }
}

/// A farmer review of a subsidy scheme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, deserialize_with = "deserialize_opt_f64_lenient")]
    pub rating: Option<f64>,
    #[serde(default, alias = "review", alias = "comment")]
    pub text: String,
    #[serde(default, alias = "user", alias = "farmer_name")]
    pub user_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One page of subsidies after envelope normalization.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubsidyPage {
    pub items: Vec<Subsidy>,
    /// Total item count across all pages (envelope `count`, or list length).
    pub count: u64,
    /// Whether the response was a paginated envelope.
    pub paginated: bool,
}

/// Normalize a subsidy list response.
///
/// Accepts `{ "results": [...], "count": n }` or a bare array. Any other shape
/// yields an empty, non-paginated page. Entries that fail to decode are skipped.
pub fn parse_subsidy_page(body: Value) -> SubsidyPage {
    match body {
        Value::Array(items) => {
            let items = decode_subsidies(items);
            let count = items.len() as u64;
            SubsidyPage { items, count, paginated: false }
        }
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => {
                let items = decode_subsidies(items);
                let count = map.get("count").and_then(Value::as_u64).unwrap_or(items.len() as u64);
                SubsidyPage { items, count, paginated: true }
            }
            _ => SubsidyPage::default(),
        },
        _ => SubsidyPage::default(),
    }
}

fn decode_subsidies(items: Vec<Value>) -> Vec<Subsidy> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Subsidy>(item) {
            Ok(subsidy) => Some(subsidy),
            Err(e) => {
                leptos::logging::warn!("skipping malformed subsidy: {e}");
                None
            }
        })
        .collect()
}

/// Reviews arrive either as a bare list or wrapped in `results`/`reviews`.
pub fn parse_reviews(body: Value) -> Vec<Review> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("results").or_else(|| map.remove("reviews")) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    items.into_iter().filter_map(|item| serde_json::from_value(item).ok()).collect()
}

/// The farmer profile returned by `GET /profile/`.
///
/// Every field is optional on the wire; missing values become empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub full_name: String,
    pub email_address: String,
    #[serde(deserialize_with = "deserialize_string_lenient")]
    pub mobile_number: String,
    #[serde(deserialize_with = "deserialize_string_lenient")]
    pub aadhaar_number: String,
    pub state: String,
    pub district: String,
    pub taluka: String,
    pub village: String,
    pub address: String,
    #[serde(deserialize_with = "deserialize_string_lenient")]
    pub land_size: String,
    pub unit: String,
    pub soil_type: String,
    pub ownership_type: String,
    #[serde(deserialize_with = "deserialize_string_lenient")]
    pub bank_account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub land_proof_url: Option<String>,
    pub pan_card_url: Option<String>,
    pub aadhaar_card_url: Option<String>,
    pub photo_url: Option<String>,
}

/// Response of the mobile-login and mobile-signup OTP send calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct OtpChallenge {
    #[serde(default, deserialize_with = "deserialize_opt_string_lenient")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of the token-issuing calls; tokens plus the account role.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// A subsidy application as serialized by `/subsidy-applications/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Application {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    pub subsidy_title: Option<String>,
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
    pub assigned_officer_name: Option<String>,
    /// `submitted`, `under_review`, `approved` or `rejected`.
    #[serde(deserialize_with = "deserialize_string_lenient")]
    pub status: String,
    pub status_display: Option<String>,
    /// `pending`, `verified` or `rejected`.
    #[serde(deserialize_with = "deserialize_string_lenient")]
    pub document_status: String,
    pub document_status_display: Option<String>,
    pub application_note: Option<String>,
    pub officer_note: Option<String>,
    pub submitted_at: Option<String>,
    pub documents: Vec<ApplicationDocument>,
}

/// A file attached to an application.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApplicationDocument {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    pub document_type: String,
    pub file_url: Option<String>,
    pub verified: bool,
    pub uploaded_at: Option<String>,
}

/// Application lists arrive as a bare array or a paginated `results` envelope.
/// Entries that fail to decode are skipped.
pub fn parse_applications(body: Value) -> Vec<Application> {
    list_items(body)
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Application>(item) {
            Ok(application) => Some(application),
            Err(e) => {
                leptos::logging::warn!("skipping malformed application: {e}");
                None
            }
        })
        .collect()
}

pub fn parse_application_documents(body: Value) -> Vec<ApplicationDocument> {
    list_items(body).into_iter().filter_map(|item| serde_json::from_value(item).ok()).collect()
}

fn list_items(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(number) => number.as_i64().ok_or_else(|| D::Error::custom("expected integer id")),
        Value::String(s) => s.trim().parse().map_err(|_| D::Error::custom(format!("invalid integer {s:?}"))),
        _ => Err(D::Error::custom("expected number")),
    }
}

fn deserialize_i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(number) => number.as_i64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    })
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn deserialize_f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_f64(&Value::deserialize(deserializer)?).unwrap_or(0.0))
}

fn deserialize_opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_f64(&Value::deserialize(deserializer)?))
}

fn value_as_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn deserialize_string_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_string(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn deserialize_opt_string_lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_string(Value::deserialize(deserializer)?))
}
