use chrono::Month;
use serde::de::{self, Deserializer};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single sales record as exported by the dashboard.
///
/// Only the fields the aggregation reads are modelled; anything else in the
/// source object is ignored on deserialization. Numeric fields are optional
/// because exports routinely leave them blank.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Missing or `null` reads as empty and is skipped by the grouper.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub payment_date: String,
    #[serde(default, deserialize_with = "amount")]
    pub payment_value: Option<f64>,
    #[serde(default, deserialize_with = "amount")]
    pub discount_amount: Option<f64>,
    #[serde(default, deserialize_with = "amount")]
    pub discount_percentage: Option<f64>,
    #[serde(default, deserialize_with = "amount")]
    pub mrp_post_tax: Option<f64>,
    #[serde(default)]
    pub customer_email: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Amounts arrive as JSON numbers or as quoted text from sheet exports.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<RawAmount>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawAmount::Number(v)) => Ok(Some(v)),
        Some(RawAmount::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawAmount::Text(text)) => parse_amount(&text)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("cannot parse amount '{text}'"))),
    }
}

/// Parse a money cell, tolerating thousands separators and a trailing `%`.
pub(crate) fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.trim().parse().ok()
}

impl Transaction {
    /// Discount amount, absent or non-finite ⇒ 0.
    pub fn discount(&self) -> f64 {
        finite_or_zero(self.discount_amount)
    }

    /// Payment value, absent or non-finite ⇒ 0.
    pub fn revenue(&self) -> f64 {
        finite_or_zero(self.payment_value)
    }

    /// `mrpPostTax` when set and non-zero, otherwise the payment value.
    pub fn potential_revenue(&self) -> f64 {
        let mrp = finite_or_zero(self.mrp_post_tax);
        if mrp == 0.0 {
            self.revenue()
        } else {
            mrp
        }
    }

    pub fn discount_pct(&self) -> f64 {
        finite_or_zero(self.discount_percentage)
    }

    /// Customer identity used for distinct counting. Missing emails share
    /// the empty identity.
    pub fn customer(&self) -> &str {
        self.customer_email.as_deref().unwrap_or("")
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

/// Metrics for one comparison year, either for a single month or summed
/// over all months.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YearMetrics {
    pub transactions: u64,
    pub discount: f64,
    pub revenue: f64,
    pub potential_revenue: f64,
    pub customers: u64,
    pub atv: f64,
}

/// Year-over-year percentage changes. Always finite.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Changes {
    pub transaction_change: f64,
    pub discount_change: f64,
    pub revenue_change: f64,
    pub atv_change: f64,
}

/// One calendar month compared across the baseline and current year.
///
/// Serializes flat, with the year suffixed to each metric:
/// `{"month": "March", "transactions2024": 1, "atv2025": 0.0, ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    pub month: Month,
    pub baseline_year: i32,
    pub current_year: i32,
    pub baseline: YearMetrics,
    pub current: YearMetrics,
    pub changes: Changes,
}

/// Footer row: all twelve months combined. Serialized with `month: "TOTAL"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TotalsRow {
    pub baseline_year: i32,
    pub current_year: i32,
    pub baseline: YearMetrics,
    pub current: YearMetrics,
    pub changes: Changes,
}

pub const TOTAL_LABEL: &str = "TOTAL";

impl Serialize for MonthRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_row(
            serializer,
            self.month.name(),
            [(self.baseline_year, &self.baseline), (self.current_year, &self.current)],
            &self.changes,
        )
    }
}

impl Serialize for TotalsRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_row(
            serializer,
            TOTAL_LABEL,
            [(self.baseline_year, &self.baseline), (self.current_year, &self.current)],
            &self.changes,
        )
    }
}

fn serialize_row<S: Serializer>(
    serializer: S,
    label: &str,
    years: [(i32, &YearMetrics); 2],
    changes: &Changes,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(17))?;
    map.serialize_entry("month", label)?;
    for (year, m) in years {
        map.serialize_entry(&format!("transactions{year}"), &m.transactions)?;
        map.serialize_entry(&format!("discount{year}"), &m.discount)?;
        map.serialize_entry(&format!("revenue{year}"), &m.revenue)?;
        map.serialize_entry(&format!("potentialRevenue{year}"), &m.potential_revenue)?;
        map.serialize_entry(&format!("customers{year}"), &m.customers)?;
        map.serialize_entry(&format!("atv{year}"), &m.atv)?;
    }
    map.serialize_entry("transactionChange", &changes.transaction_change)?;
    map.serialize_entry("discountChange", &changes.discount_change)?;
    map.serialize_entry("revenueChange", &changes.revenue_change)?;
    map.serialize_entry("atvChange", &changes.atv_change)?;
    map.end()
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YoySummary {
    pub discount_baseline: f64,
    pub discount_current: f64,
    /// `None` when there was no baseline discount to compare against.
    pub discount_change: Option<f64>,
    pub revenue_impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YoyMeta {
    pub baseline_year: i32,
    pub current_year: i32,
    pub engine_version: String,
    pub input_count: usize,
    pub discounted_count: usize,
    pub skipped_dates: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YoyReport {
    pub meta: YoyMeta,
    pub rows: Vec<MonthRow>,
    pub totals: TotalsRow,
    pub summary: YoySummary,
}

impl YoyReport {
    pub fn row(&self, month: Month) -> &MonthRow {
        &self.rows[month.number_from_month() as usize - 1]
    }
}
