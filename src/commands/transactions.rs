// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use chrono::{Datelike, Utc};
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Transaction, TransactionKind};
use crate::session::Session;
use crate::store::TransactionStore;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, parse_month, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let session = Session::new(conn);
    let user = session.require_current()?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = session.category_by_name(&user.id, sub.get_one::<String>("category").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let details = sub.get_one::<String>("details").map(|s| s.to_string());
    let kind = TransactionKind::parse(sub.get_one::<String>("kind").unwrap())?;

    let t = Transaction {
        id: Uuid::new_v4().to_string(),
        user_id: user.id.clone(),
        amount,
        date,
        category,
        details,
        kind,
    };
    TransactionStore::new(conn).add(&t)?;
    println!(
        "Recorded {} {} '{}' on {}",
        t.kind.as_str(),
        fmt_money(&t.amount),
        t.category.name,
        t.date
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub details: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let session = Session::new(conn);
    let user = session.require_current()?;

    let month = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;
    let category = sub.get_one::<String>("category");
    let limit = sub.get_one::<usize>("limit").copied();

    let snapshot = TransactionStore::new(conn).all_for_user(&user.id)?;
    let mut data: Vec<TransactionRow> = snapshot
        .iter()
        .rev()
        .filter(|t| {
            month.map_or(true, |m| {
                t.date.year() == m.year() && t.date.month() == m.month()
            })
        })
        .filter(|t| category.map_or(true, |c| &t.category.name == c))
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            kind: t.kind.as_str().to_string(),
            amount: fmt_money(&t.amount),
            category: t.category.name.clone(),
            details: t.details.clone().unwrap_or_default(),
        })
        .collect();
    if let Some(n) = limit {
        data.truncate(n);
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.details.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Kind", "Amount", "Category", "Details"], rows)
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let session = Session::new(conn);
    let user = session.require_current()?;
    let id = sub.get_one::<String>("id").unwrap();
    let store = TransactionStore::new(conn);

    let snapshot = store.all_for_user(&user.id)?;
    let Some(mut t) = snapshot.into_iter().find(|t| &t.id == id) else {
        bail!("Transaction '{}' not found", id);
    };

    if let Some(s) = sub.get_one::<String>("amount") {
        t.amount = parse_amount(s)?;
    }
    if let Some(s) = sub.get_one::<String>("category") {
        t.category = session.category_by_name(&user.id, s)?;
    }
    if let Some(s) = sub.get_one::<String>("date") {
        t.date = parse_date(s)?;
    }
    if let Some(s) = sub.get_one::<String>("details") {
        t.details = Some(s.to_string());
    }
    if let Some(s) = sub.get_one::<String>("kind") {
        t.kind = TransactionKind::parse(s)?;
    }

    store.replace(&t)?;
    println!("Updated transaction {}", t.id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = Session::new(conn).require_current()?;
    let id = sub.get_one::<String>("id").unwrap();
    if TransactionStore::new(conn).remove(&user.id, id)? {
        println!("Removed transaction {}", id);
    } else {
        bail!("Transaction '{}' not found", id);
    }
    Ok(())
}
