use serde::Deserialize;

use crate::error::YoyError;

pub const DEFAULT_BASELINE_YEAR: i32 = 2024;
pub const DEFAULT_CURRENT_YEAR: i32 = 2025;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YoyConfig {
    /// Earlier year; denominator of every change percentage.
    #[serde(default = "default_baseline_year")]
    pub baseline_year: i32,
    #[serde(default = "default_current_year")]
    pub current_year: i32,
    #[serde(default)]
    pub columns: ColumnMapping,
    /// Reserved for dashboard filters. Accepted so existing configs keep
    /// parsing; the engine does not read any option from it.
    #[serde(default)]
    pub filters: Option<toml::Table>,
}

impl Default for YoyConfig {
    fn default() -> Self {
        Self {
            baseline_year: DEFAULT_BASELINE_YEAR,
            current_year: DEFAULT_CURRENT_YEAR,
            columns: ColumnMapping::default(),
            filters: None,
        }
    }
}

fn default_baseline_year() -> i32 {
    DEFAULT_BASELINE_YEAR
}

fn default_current_year() -> i32 {
    DEFAULT_CURRENT_YEAR
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// CSV header names for each transaction field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub payment_date: String,
    pub payment_value: String,
    pub discount_amount: String,
    pub discount_percentage: String,
    pub mrp_post_tax: String,
    pub customer_email: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            payment_date: "paymentDate".into(),
            payment_value: "paymentValue".into(),
            discount_amount: "discountAmount".into(),
            discount_percentage: "discountPercentage".into(),
            mrp_post_tax: "mrpPostTax".into(),
            customer_email: "customerEmail".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl YoyConfig {
    pub fn from_toml(input: &str) -> Result<Self, YoyError> {
        let config: YoyConfig =
            toml::from_str(input).map_err(|e| YoyError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), YoyError> {
        for (name, year) in [
            ("baseline_year", self.baseline_year),
            ("current_year", self.current_year),
        ] {
            if !(1..=9999).contains(&year) {
                return Err(YoyError::ConfigValidation(format!(
                    "{name} must be a four-digit year, got {year}"
                )));
            }
        }

        if self.baseline_year == self.current_year {
            return Err(YoyError::ConfigValidation(format!(
                "baseline_year and current_year must differ, both are {}",
                self.baseline_year
            )));
        }

        if self.columns.payment_date.is_empty() {
            return Err(YoyError::ConfigValidation(
                "columns.payment_date must not be empty".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
