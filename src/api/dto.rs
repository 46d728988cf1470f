//! Data Transfer Objects
//!
//! Request and response bodies of the finance backend. Numeric fields are
//! coerced leniently: the backend formats some amounts as currency strings
//! (`"$1,234.56"`) and omits fields when there is no data yet.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================
// Responses
// ============================================

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Headline numbers for the stat cards
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct QuickStats {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_spending: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub monthly_average: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub largest_expense: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub transaction_count: u64,
}

/// A recorded transaction. Negative amounts are expenses.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "predicted_category")]
    pub category: String,
    /// ISO 8601 timestamp as sent by the backend
    #[serde(default)]
    pub date: Option<String>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}

/// Daily spending series for the trend chart
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SpendingTrends {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default, deserialize_with = "lenient_amounts")]
    pub amounts: Vec<f64>,
}

/// Response of the analysis endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SpendingAnalysis {
    #[serde(default)]
    pub spending_trends: SpendingTrends,
    /// Spending per category, in the order the backend sent them
    #[serde(default, deserialize_with = "lenient_totals")]
    pub category_totals: IndexMap<String, f64>,
}

/// Outcome of the auth probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    Authenticated,
    Unauthenticated,
}

/// Error body returned by the login endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct LoginFailure {
    #[serde(default)]
    pub detail: Option<String>,
}

// ============================================
// Requests
// ============================================

/// Body of `POST /api/transactions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    pub amount: f64,
    pub description: String,
    pub category: String,
}

impl NewTransaction {
    /// Build from raw form values.
    ///
    /// The amount is coerced like a browser's `parseFloat`: the longest
    /// numeric prefix is used, and anything unparseable becomes NaN for the
    /// backend to reject.
    pub fn from_form(amount: &str, description: &str, category: &str) -> Self {
        Self {
            amount: parse_float_prefix(amount),
            description: description.to_string(),
            category: category.to_string(),
        }
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Aggregation window for the analysis endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    #[default]
    Month,
    Year,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Week, Period::Month, Period::Year];

    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Period::Week => "Week",
            Period::Month => "Month",
            Period::Year => "Year",
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(format!("Unknown period: {}", other)),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================
// Coercion
// ============================================

/// Parse the longest leading float, `parseFloat` style. Returns NaN when no
/// digits lead the string.
pub fn parse_float_prefix(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut last_good = 0;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                last_good = end + 1;
            }
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => {
                seen_exp = true;
                if matches!(bytes.get(end + 1), Some(b'+') | Some(b'-')) {
                    end += 1;
                }
            }
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return f64::NAN;
    }
    s[..last_good].parse().unwrap_or(f64::NAN)
}

/// Parse a currency-formatted amount such as `"$1,234.56"` or `"-$12.50"`
pub fn parse_currency(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    let (negative, digits) = match cleaned.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner.to_string()),
        None => (false, cleaned),
    };
    let value: f64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Null(()),
}

impl RawAmount {
    fn coerce(self) -> f64 {
        match self {
            RawAmount::Number(n) => n,
            RawAmount::Text(s) => parse_currency(&s).unwrap_or(0.0),
            RawAmount::Null(()) => 0.0,
        }
    }
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawAmount::deserialize(deserializer)?.coerce())
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = RawAmount::deserialize(deserializer)?.coerce();
    Ok(if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    })
}

fn lenient_amounts<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawAmount>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(RawAmount::coerce).collect())
}

fn lenient_totals<'de, D>(deserializer: D) -> Result<IndexMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, RawAmount>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.coerce())).collect())
}
