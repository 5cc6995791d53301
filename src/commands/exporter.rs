// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

use crate::session::Session;
use crate::store::TransactionStore;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let user = Session::new(conn).require_current()?;
    let snapshot = TransactionStore::new(conn).all_for_user(&user.id)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "kind", "amount", "category", "details"])?;
            for t in &snapshot {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_string(),
                    t.kind.as_str().to_string(),
                    t.amount.to_string(),
                    t.category.name.clone(),
                    t.details.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = snapshot
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.date,
                        "kind": t.kind,
                        "amount": t.amount,
                        "category": t.category.name,
                        "details": t.details,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported {} transactions to {}", snapshot.len(), out);
    Ok(())
}
