/// Percentage change from `baseline` to `current`.
///
/// A baseline that is not strictly positive yields 0, never NaN or infinity.
pub fn percent_change(baseline: f64, current: f64) -> f64 {
    if baseline > 0.0 {
        finite((current - baseline) / baseline * 100.0)
    } else {
        0.0
    }
}

/// Average transaction value; 0 when there are no transactions.
pub fn atv(revenue: f64, transactions: u64) -> f64 {
    if transactions > 0 {
        finite(revenue / transactions as f64)
    } else {
        0.0
    }
}

// Overflowed sums would otherwise leak infinity into the ratios.
fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
