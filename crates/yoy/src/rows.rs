use chrono::Month;

use crate::bucket::{MonthYearBucket, MonthlyBuckets};
use crate::change::{atv, percent_change};
use crate::model::{Changes, MonthRow, TotalsRow, YearMetrics, YoySummary};

pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

fn metrics(bucket: Option<&MonthYearBucket>) -> YearMetrics {
    let Some(b) = bucket else {
        return YearMetrics::default();
    };
    YearMetrics {
        transactions: b.transactions,
        discount: b.discount,
        revenue: b.revenue,
        potential_revenue: b.potential_revenue,
        customers: b.unique_customers(),
        atv: atv(b.revenue, b.transactions),
    }
}

/// One row per calendar month, January first, whether or not the month has
/// data.
///
/// `revenue_change` is derived from the ATV pair here, while the totals row
/// derives it from raw revenue. Downstream consumers depend on both.
pub fn build_month_rows(buckets: &MonthlyBuckets, baseline_year: i32, current_year: i32) -> Vec<MonthRow> {
    MONTHS
        .iter()
        .enumerate()
        .map(|(month0, &month)| {
            let baseline = metrics(buckets.get(month0, baseline_year));
            let current = metrics(buckets.get(month0, current_year));
            let atv_change = percent_change(baseline.atv, current.atv);
            MonthRow {
                month,
                baseline_year,
                current_year,
                baseline,
                current,
                changes: Changes {
                    transaction_change: percent_change(
                        baseline.transactions as f64,
                        current.transactions as f64,
                    ),
                    discount_change: percent_change(baseline.discount, current.discount),
                    revenue_change: atv_change,
                    atv_change,
                },
            }
        })
        .collect()
}

fn add(acc: &mut YearMetrics, m: &YearMetrics) {
    acc.transactions += m.transactions;
    acc.discount += m.discount;
    acc.revenue += m.revenue;
    acc.potential_revenue += m.potential_revenue;
    // Summed per month: a customer active in two months counts twice.
    acc.customers += m.customers;
}

/// Sum the month rows and recompute every change from the sums.
pub fn build_totals(rows: &[MonthRow], baseline_year: i32, current_year: i32) -> TotalsRow {
    let mut baseline = YearMetrics::default();
    let mut current = YearMetrics::default();
    for row in rows {
        add(&mut baseline, &row.baseline);
        add(&mut current, &row.current);
    }
    baseline.atv = atv(baseline.revenue, baseline.transactions);
    current.atv = atv(current.revenue, current.transactions);

    let atv_change = if baseline.transactions > 0
        && baseline.revenue > 0.0
        && current.transactions > 0
        && current.revenue > 0.0
    {
        percent_change(baseline.atv, current.atv)
    } else {
        0.0
    };

    TotalsRow {
        baseline_year,
        current_year,
        baseline,
        current,
        changes: Changes {
            transaction_change: percent_change(
                baseline.transactions as f64,
                current.transactions as f64,
            ),
            discount_change: percent_change(baseline.discount, current.discount),
            revenue_change: percent_change(baseline.revenue, current.revenue),
            atv_change,
        },
    }
}

pub fn build_summary(totals: &TotalsRow) -> YoySummary {
    let discount_change = (totals.baseline.discount > 0.0)
        .then(|| percent_change(totals.baseline.discount, totals.current.discount));
    YoySummary {
        discount_baseline: totals.baseline.discount,
        discount_current: totals.current.discount,
        discount_change,
        revenue_impact: totals.current.revenue - totals.baseline.revenue,
    }
}
