// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use outlay::models::{Category, Transaction, TransactionKind};
use outlay::report;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn cat(id: &str, name: &str) -> Category {
    Category {
        id: id.into(),
        name: name.into(),
        icon: format!("icon_{}", id),
    }
}

fn tx(amount: &str, kind: TransactionKind, category: Category, date: NaiveDate) -> Transaction {
    Transaction {
        id: format!("t-{}-{}-{}", category.id, amount, date),
        user_id: "u1".into(),
        amount: dec(amount),
        date,
        category,
        details: None,
        kind,
    }
}

#[test]
fn sum_by_category_excludes_income() {
    let txs = vec![
        tx("100", TransactionKind::Expense, cat("food", "Food"), d(2024, 3, 5)),
        tx("50", TransactionKind::Income, cat("food", "Food"), d(2024, 3, 5)),
    ];
    let sums = report::sum_by_category(&txs);
    assert_eq!(sums.len(), 1);
    assert_eq!(sums["Food"], dec("100"));

    // Removing income entries must not change the result
    let expenses_only: Vec<_> = txs
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
        .cloned()
        .collect();
    assert_eq!(report::sum_by_category(&expenses_only), sums);
}

#[test]
fn sum_by_category_conserves_expense_total() {
    let txs = vec![
        tx("12.50", TransactionKind::Expense, cat("food", "Food"), d(2024, 1, 2)),
        tx("7.25", TransactionKind::Expense, cat("car", "Car"), d(2024, 2, 9)),
        tx("30", TransactionKind::Expense, cat("food", "Food"), d(2024, 6, 20)),
        tx("999", TransactionKind::Income, cat("food", "Food"), d(2024, 6, 21)),
    ];
    let sums = report::sum_by_category(&txs);
    let total: Decimal = sums.values().copied().sum();
    assert_eq!(total, dec("49.75"));
    assert_eq!(sums["Food"], dec("42.50"));
    assert_eq!(sums["Car"], dec("7.25"));
}

#[test]
fn sum_by_category_for_month_filters_by_calendar_month() {
    let txs = vec![
        tx("10", TransactionKind::Expense, cat("food", "Food"), d(2024, 3, 1)),
        tx("20", TransactionKind::Expense, cat("food", "Food"), d(2024, 3, 31)),
        tx("40", TransactionKind::Expense, cat("food", "Food"), d(2024, 4, 1)),
        tx("80", TransactionKind::Expense, cat("food", "Food"), d(2023, 3, 15)),
    ];
    let sums = report::sum_by_category_for_month(&txs, d(2024, 3, 15));
    assert_eq!(sums["Food"], dec("30"));
}

#[test]
fn empty_input_yields_empty_results() {
    let txs: Vec<Transaction> = Vec::new();
    assert!(report::sum_by_category(&txs).is_empty());
    assert_eq!(report::total_expenses_for_month(&txs, d(2024, 5, 1)), Decimal::ZERO);

    let summaries = report::trailing_monthly_summaries_from(&txs, d(2024, 5, 17), 12, 3);
    assert_eq!(summaries.len(), 12);
    for s in &summaries {
        assert_eq!(s.total, Decimal::ZERO);
        assert!(s.top_categories.is_empty());
    }
}

#[test]
fn trailing_summaries_fixed_length_and_ordering() {
    let txs = vec![
        tx("30", TransactionKind::Expense, cat("car", "Car"), d(2024, 3, 10)),
        tx("70", TransactionKind::Expense, cat("food", "Food"), d(2024, 3, 12)),
        tx("15", TransactionKind::Expense, cat("pets", "Pets"), d(2023, 11, 2)),
    ];
    let summaries = report::trailing_monthly_summaries_from(&txs, d(2024, 3, 20), 12, 3);
    assert_eq!(summaries.len(), 12);

    // Most recent month first, descending chronologically
    assert_eq!(summaries[0].month, d(2024, 3, 1));
    assert_eq!(summaries[1].month, d(2024, 2, 1));
    assert_eq!(summaries[11].month, d(2023, 4, 1));
    assert_eq!(summaries[0].label, "March 2024");

    // Month with data: total and ranked top categories
    assert_eq!(summaries[0].total, dec("100"));
    let top = &summaries[0].top_categories;
    assert_eq!(top.len(), 2);
    assert_eq!((top[0].name.as_str(), top[0].amount), ("Food", dec("70")));
    assert_eq!((top[1].name.as_str(), top[1].amount), ("Car", dec("30")));

    // Zero months still present
    assert_eq!(summaries[1].total, Decimal::ZERO);
    assert!(summaries[1].top_categories.is_empty());

    // Every top list is capped and non-increasing
    for s in &summaries {
        assert!(s.top_categories.len() <= 3);
        for pair in s.top_categories.windows(2) {
            assert!(pair[0].amount >= pair[1].amount);
        }
    }
}

#[test]
fn trailing_summaries_truncate_to_top_n() {
    let month = d(2024, 7, 1);
    let txs = vec![
        tx("5", TransactionKind::Expense, cat("food", "Food"), month),
        tx("4", TransactionKind::Expense, cat("car", "Car"), month),
        tx("3", TransactionKind::Expense, cat("pets", "Pets"), month),
        tx("2", TransactionKind::Expense, cat("habits", "Habits"), month),
        tx("1", TransactionKind::Expense, cat("health", "Health"), month),
    ];
    let summaries = report::trailing_monthly_summaries_from(&txs, d(2024, 7, 15), 1, 3);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total, dec("15"));
    let names: Vec<&str> = summaries[0]
        .top_categories
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, ["Food", "Car", "Pets"]);
}

#[test]
fn distinct_ids_with_same_name_stay_separate_in_rankings() {
    let month = d(2024, 8, 1);
    let txs = vec![
        tx("40", TransactionKind::Expense, cat("food", "Food"), month),
        tx("35", TransactionKind::Expense, cat("food2", "Food"), month),
        tx("50", TransactionKind::Expense, cat("car", "Car"), month),
    ];
    let summaries = report::trailing_monthly_summaries_from(&txs, d(2024, 8, 20), 1, 3);
    let top = &summaries[0].top_categories;
    // Buckets key on category id, so the two Food categories rank separately
    assert_eq!(top.len(), 3);
    assert_eq!(top[0].name, "Car");
    assert_eq!(top[0].amount, dec("50"));

    // The name-keyed map merges them, same sum either way
    let sums = report::sum_by_category(&txs);
    assert_eq!(sums["Food"], dec("75"));
}

#[test]
fn total_expenses_for_month_ignores_income_and_other_months() {
    let txs = vec![
        tx("10", TransactionKind::Expense, cat("food", "Food"), d(2024, 3, 5)),
        tx("20", TransactionKind::Expense, cat("car", "Car"), d(2024, 3, 28)),
        tx("500", TransactionKind::Income, cat("food", "Food"), d(2024, 3, 1)),
        tx("40", TransactionKind::Expense, cat("food", "Food"), d(2024, 4, 2)),
    ];
    assert_eq!(report::total_expenses_for_month(&txs, d(2024, 3, 15)), dec("30"));
}

#[test]
fn aggregations_are_idempotent() {
    let txs = vec![
        tx("30", TransactionKind::Expense, cat("car", "Car"), d(2024, 3, 10)),
        tx("70", TransactionKind::Expense, cat("food", "Food"), d(2024, 3, 12)),
    ];
    assert_eq!(report::sum_by_category(&txs), report::sum_by_category(&txs));
    assert_eq!(
        report::trailing_monthly_summaries_from(&txs, d(2024, 3, 20), 12, 3),
        report::trailing_monthly_summaries_from(&txs, d(2024, 3, 20), 12, 3)
    );
}
