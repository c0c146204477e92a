//! Display formatting for amounts, dates, ratings and file sizes.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use chrono::NaiveDate;

const BYTES_PER_KIB: f64 = 1024.0;
const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Group an integer string Indian-style: last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Format a rupee amount with `en-IN` digit grouping (`100000` -> `1,00,000`).
///
/// Fractions are rounded to paise and trailing zeros dropped.
#[allow(clippy::cast_possible_truncation)]
pub fn format_amount_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_owned();
    }
    let paise = (amount.abs() * 100.0).round() as i64;
    let rupees = paise / 100;
    let fraction = paise % 100;
    let sign = if amount < 0.0 && paise != 0 { "-" } else { "" };
    let grouped = group_indian(&rupees.to_string());
    match fraction {
        0 => format!("{sign}{grouped}"),
        f if f % 10 == 0 => format!("{sign}{grouped}.{}", f / 10),
        f => format!("{sign}{grouped}.{f:02}"),
    }
}

/// Parse the date part of an ISO date or timestamp.
pub fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// `2024-01-05` -> `5/1/2024`; missing or unparsable dates render `N/A`.
pub fn format_date(raw: Option<&str>) -> String {
    use chrono::Datelike;

    raw.and_then(parse_api_date)
        .map_or_else(|| "N/A".to_owned(), |d| format!("{}/{}/{}", d.day(), d.month(), d.year()))
}

pub fn format_date_range(start: Option<&str>, end: Option<&str>) -> String {
    format!("{} to {}", format_date(start), format_date(end))
}

pub fn format_rating(rating: Option<f64>) -> String {
    format!("{:.1}", rating.unwrap_or(0.0))
}

#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    let bytes = bytes as f64;
    if bytes >= BYTES_PER_MIB {
        format!("{:.1} MB", bytes / BYTES_PER_MIB)
    } else {
        format!("{:.1} KB", bytes / BYTES_PER_KIB)
    }
}
