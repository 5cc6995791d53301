// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Expense aggregation over an in-memory transaction snapshot.
//!
//! Every function here is pure and total: no I/O, no locking, no failure
//! modes. Callers hand in a stable snapshot (typically
//! `TransactionStore::all_for_user`) and get plain value types back. Only
//! `expense`-kind transactions contribute to any sum; income is excluded
//! everywhere.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::models::{CategorySum, MonthlySummary, Transaction, TransactionKind};

/// Per-category expense totals over the whole collection, keyed by display
/// name.
pub fn sum_by_category(transactions: &[Transaction]) -> HashMap<String, Decimal> {
    name_keyed(expense_buckets(transactions.iter()))
}

/// Per-category expense totals restricted to the calendar month of `month`.
pub fn sum_by_category_for_month(
    transactions: &[Transaction],
    month: NaiveDate,
) -> HashMap<String, Decimal> {
    name_keyed(expense_buckets(
        transactions.iter().filter(|t| same_month(t.date, month)),
    ))
}

/// Per-category expense totals for the current calendar month.
pub fn sum_by_category_current_month(transactions: &[Transaction]) -> HashMap<String, Decimal> {
    sum_by_category_for_month(transactions, Utc::now().date_naive())
}

/// Total expenses in the calendar month of `month`.
pub fn total_expenses_for_month(transactions: &[Transaction], month: NaiveDate) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && same_month(t.date, month))
        .map(|t| t.amount)
        .sum()
}

/// Trailing 12-month summaries ending at the current calendar month, top 3
/// categories per month, most recent month first.
pub fn trailing_monthly_summaries(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    trailing_monthly_summaries_from(transactions, Utc::now().date_naive(), 12, 3)
}

/// One summary per month for the `month_count` months ending at the month of
/// `today`, most recent first. Months without matching transactions still
/// produce an entry (zero total, empty top list), so the result always has
/// exactly `month_count` elements.
pub fn trailing_monthly_summaries_from(
    transactions: &[Transaction],
    today: NaiveDate,
    month_count: usize,
    top_n: usize,
) -> Vec<MonthlySummary> {
    let mut results = Vec::with_capacity(month_count);
    for back in 0..month_count {
        let start = months_back(today, back as u32);
        let buckets = expense_buckets(
            transactions.iter().filter(|t| same_month(t.date, start)),
        );
        let total: Decimal = buckets.values().map(|c| c.amount).sum();

        let mut ranked: Vec<CategorySum> = buckets.into_values().collect();
        ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
        ranked.truncate(top_n);

        results.push(MonthlySummary {
            month: start,
            label: start.format("%B %Y").to_string(),
            total,
            top_categories: ranked,
        });
    }
    results
}

/// Accumulates expense amounts into per-category buckets keyed by category
/// id, keeping the display name for presentation.
fn expense_buckets<'a, I>(transactions: I) -> HashMap<String, CategorySum>
where
    I: Iterator<Item = &'a Transaction>,
{
    let mut buckets: HashMap<String, CategorySum> = HashMap::new();
    for t in transactions.filter(|t| t.kind == TransactionKind::Expense) {
        buckets
            .entry(t.category.id.clone())
            .and_modify(|c| c.amount += t.amount)
            .or_insert_with(|| CategorySum {
                category_id: t.category.id.clone(),
                name: t.category.name.clone(),
                amount: t.amount,
            });
    }
    buckets
}

// Distinct ids sharing a display name collapse into one map entry here,
// which sums the same amounts either way.
fn name_keyed(buckets: HashMap<String, CategorySum>) -> HashMap<String, Decimal> {
    let mut out: HashMap<String, Decimal> = HashMap::new();
    for c in buckets.into_values() {
        *out.entry(c.name).or_insert(Decimal::ZERO) += c.amount;
    }
    out
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// First day of the month `back` months before the month of `from`.
fn months_back(from: NaiveDate, back: u32) -> NaiveDate {
    let total = from.year() * 12 + from.month0() as i32 - back as i32;
    let (y, m0) = (total.div_euclid(12), total.rem_euclid(12));
    NaiveDate::from_ymd_opt(y, m0 as u32 + 1, 1).unwrap_or(from)
}
