// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::report;
use crate::session::Session;
use crate::store::TransactionStore;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("spend-by-category", sub)) => spend_by_category(conn, sub)?,
        Some(("history", sub)) => history(conn, sub)?,
        Some(("total", sub)) => total(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct SpendRow {
    category: String,
    spent: String,
}

fn spend_by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = Session::new(conn).require_current()?;
    let snapshot = TransactionStore::new(conn).all_for_user(&user.id)?;

    let sums = if sub.get_flag("all") {
        report::sum_by_category(&snapshot)
    } else if let Some(s) = sub.get_one::<String>("month") {
        report::sum_by_category_for_month(&snapshot, parse_month(s)?)
    } else {
        report::sum_by_category_current_month(&snapshot)
    };

    let mut items: Vec<_> = sums.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    let data: Vec<SpendRow> = items
        .into_iter()
        .map(|(category, amount)| SpendRow {
            category,
            spent: fmt_money(&amount),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| vec![r.category.clone(), r.spent.clone()])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn history(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = Session::new(conn).require_current()?;
    let snapshot = TransactionStore::new(conn).all_for_user(&user.id)?;

    let summaries = report::trailing_monthly_summaries(&snapshot);
    if !maybe_print_json(json_flag, jsonl_flag, &summaries)? {
        let rows = summaries
            .iter()
            .map(|s| {
                let top = s
                    .top_categories
                    .iter()
                    .map(|c| format!("{} {}", c.name, fmt_money(&c.amount)))
                    .collect::<Vec<_>>()
                    .join(", ");
                vec![s.label.clone(), fmt_money(&s.total), top]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Total", "Top categories"], rows));
    }
    Ok(())
}

fn total(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = Session::new(conn).require_current()?;
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let snapshot = TransactionStore::new(conn).all_for_user(&user.id)?;
    let total = report::total_expenses_for_month(&snapshot, month);
    println!("{} total: {}", month.format("%B %Y"), fmt_money(&total));
    Ok(())
}
