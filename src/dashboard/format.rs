//! Display formatting for amounts and dates

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Shown where a date cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Format as US dollars: `$1,234.56`, `-$12.50`
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$NaN".to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // -0.001 rounds to zero and prints unsigned
    let negative = amount < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));
    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, cents)
}

/// Chart axis label, `Jan 5`
pub fn chart_date_label(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%b %-d").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Transaction list date, `1/5/2024`
pub fn list_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Calendar date of a backend timestamp.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` and plain `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
