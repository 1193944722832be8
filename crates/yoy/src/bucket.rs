use std::collections::{BTreeMap, HashSet};

use chrono::Datelike;

use crate::date::parse_payment_date;
use crate::model::Transaction;

/// Running totals for one (month, year).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthYearBucket {
    pub transactions: u64,
    pub discount: f64,
    pub revenue: f64,
    pub potential_revenue: f64,
    pub customers: HashSet<String>,
    pub discount_percentages: Vec<f64>,
}

impl MonthYearBucket {
    fn add(&mut self, txn: &Transaction) {
        self.transactions += 1;
        self.discount += txn.discount();
        self.revenue += txn.revenue();
        self.potential_revenue += txn.potential_revenue();
        self.customers.insert(txn.customer().to_string());
        self.discount_percentages.push(txn.discount_pct());
    }

    pub fn unique_customers(&self) -> u64 {
        self.customers.len() as u64
    }
}

/// Buckets indexed by zero-based month, each keyed by year.
#[derive(Debug, Default)]
pub struct MonthlyBuckets {
    pub months: [BTreeMap<i32, MonthYearBucket>; 12],
    /// Records dropped because their payment date did not parse.
    pub skipped: usize,
}

impl MonthlyBuckets {
    pub fn get(&self, month0: usize, year: i32) -> Option<&MonthYearBucket> {
        self.months[month0].get(&year)
    }
}

/// Transactions that carry a discount. Absent amounts count as 0 and are
/// dropped.
pub fn discounted(transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions.iter().filter(|t| t.discount() > 0.0).collect()
}

/// Group transactions by calendar month, then by year.
///
/// Every year present in the input gets a bucket, including years outside
/// the comparison; the row builder picks the two it reports on.
pub fn group_by_month_year<'a, I>(transactions: I) -> MonthlyBuckets
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buckets = MonthlyBuckets::default();

    for txn in transactions {
        let Some(date) = parse_payment_date(&txn.payment_date) else {
            log::warn!(
                "skipping transaction with unparseable payment date '{}'",
                txn.payment_date
            );
            buckets.skipped += 1;
            continue;
        };

        buckets.months[date.month0() as usize]
            .entry(date.year())
            .or_default()
            .add(txn);
    }

    buckets
}
