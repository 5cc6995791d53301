// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::utils::pretty_table;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = collect_issues(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn collect_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Categories sharing a display name within one user: their sums merge
    // in name-keyed report output.
    let mut stmt = conn.prepare(
        "SELECT user_id, name, COUNT(*) FROM categories
         GROUP BY user_id, name HAVING COUNT(*) > 1",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let name: String = r.get(1)?;
        let n: i64 = r.get(2)?;
        rows.push(vec![
            "duplicate_category_name".into(),
            format!("'{}' used by {} categories", name, n),
        ]);
    }

    // 2) Transactions owned by a user with no profile row
    let mut stmt2 = conn.prepare(
        "SELECT id, user_id FROM transactions
         WHERE user_id NOT IN (SELECT id FROM users)",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: String = r.get(0)?;
        let uid: String = r.get(1)?;
        rows.push(vec![
            "orphaned_transaction".into(),
            format!("{} (user {})", id, uid),
        ]);
    }

    // 3) Non-positive or unparseable stored amounts
    let mut stmt3 = conn.prepare("SELECT id, amount FROM transactions")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: String = r.get(0)?;
        let amount: String = r.get(1)?;
        match amount.parse::<Decimal>() {
            Ok(d) if d > Decimal::ZERO => {}
            _ => rows.push(vec![
                "bad_amount".into(),
                format!("{} amount '{}'", id, amount),
            ]),
        }
    }

    Ok(rows)
}
