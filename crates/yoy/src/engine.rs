use std::path::Path;

use crate::bucket::{discounted, group_by_month_year};
use crate::config::{ColumnMapping, YoyConfig};
use crate::error::YoyError;
use crate::model::{parse_amount, Transaction, YoyMeta, YoyReport};
use crate::rows::{build_month_rows, build_summary, build_totals};

/// Run the year-on-year comparison. Never fails: bad dates are skipped and
/// counted in `meta.skipped_dates`.
pub fn run(config: &YoyConfig, transactions: &[Transaction]) -> YoyReport {
    if let Some(filters) = &config.filters {
        log::debug!("ignoring {} filter option(s); filters are not applied", filters.len());
    }

    let kept = discounted(transactions);
    let discounted_count = kept.len();
    let buckets = group_by_month_year(kept);

    let rows = build_month_rows(&buckets, config.baseline_year, config.current_year);
    let totals = build_totals(&rows, config.baseline_year, config.current_year);
    let summary = build_summary(&totals);

    log::debug!(
        "yoy {} vs {}: {} input, {} discounted, {} skipped",
        config.baseline_year,
        config.current_year,
        transactions.len(),
        discounted_count,
        buckets.skipped,
    );

    YoyReport {
        meta: YoyMeta {
            baseline_year: config.baseline_year,
            current_year: config.current_year,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            input_count: transactions.len(),
            discounted_count,
            skipped_dates: buckets.skipped,
        },
        rows,
        totals,
        summary,
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Pick a format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Load transactions in the given format.
pub fn load_transactions(
    data: &str,
    format: InputFormat,
    columns: &ColumnMapping,
) -> Result<Vec<Transaction>, YoyError> {
    match format {
        InputFormat::Csv => load_csv_transactions(data, columns),
        InputFormat::Json => load_json_transactions(data),
    }
}

/// Load a JSON array of transaction objects.
pub fn load_json_transactions(json: &str) -> Result<Vec<Transaction>, YoyError> {
    serde_json::from_str(json).map_err(|e| YoyError::Json(e.to_string()))
}

/// Load CSV rows into transactions using the column mapping.
///
/// Only the payment date column is required; any other mapped column that is
/// missing from the header reads as absent on every row.
pub fn load_csv_transactions(
    csv_data: &str,
    columns: &ColumnMapping,
) -> Result<Vec<Transaction>, YoyError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| YoyError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &str| headers.iter().position(|h| h == name);

    let date_idx = idx(&columns.payment_date).ok_or_else(|| YoyError::MissingColumn {
        column: columns.payment_date.clone(),
    })?;
    let value_idx = idx(&columns.payment_value);
    let discount_idx = idx(&columns.discount_amount);
    let pct_idx = idx(&columns.discount_percentage);
    let mrp_idx = idx(&columns.mrp_post_tax);
    let email_idx = idx(&columns.customer_email);

    let mut transactions = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| YoyError::Csv(e.to_string()))?;
        let row = i + 1;

        let cell = |col: Option<usize>| col.and_then(|c| record.get(c)).filter(|v| !v.is_empty());
        let amount = |col: Option<usize>, name: &str| -> Result<Option<f64>, YoyError> {
            cell(col)
                .map(|v| {
                    parse_amount(v).ok_or_else(|| YoyError::AmountParse {
                        row,
                        column: name.into(),
                        value: v.into(),
                    })
                })
                .transpose()
        };

        transactions.push(Transaction {
            payment_date: record.get(date_idx).unwrap_or("").to_string(),
            payment_value: amount(value_idx, &columns.payment_value)?,
            discount_amount: amount(discount_idx, &columns.discount_amount)?,
            discount_percentage: amount(pct_idx, &columns.discount_percentage)?,
            mrp_post_tax: amount(mrp_idx, &columns.mrp_post_tax)?,
            customer_email: cell(email_idx).map(str::to_string),
        });
    }

    Ok(transactions)
}
