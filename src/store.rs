// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::models::{Category, Transaction, TransactionKind};
use crate::utils::{get_setting, parse_date, parse_decimal, set_setting};

const REVISION_KEY: &str = "data_revision";

/// Transaction persistence, constructed around a borrowed connection and
/// passed by reference to whoever needs it. Reads hand out owned snapshots;
/// every write bumps `data_revision` so callers can detect interleaved
/// mutations (see `commands::sync`).
pub struct TransactionStore<'a> {
    conn: &'a Connection,
}

impl<'a> TransactionStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        TransactionStore { conn }
    }

    /// Snapshot of one user's transactions in insertion order.
    pub fn all_for_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.id, t.user_id, t.amount, t.date, t.details, t.kind,
                    c.id, c.name, c.icon
             FROM transactions t
             JOIN categories c ON c.id = t.category_id AND c.user_id = t.user_id
             WHERE t.user_id = ?1
             ORDER BY t.rowid",
        )?;
        let mut rows = stmt.query(params![user_id])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let amount_s: String = r.get(2)?;
            let date_s: String = r.get(3)?;
            let kind_s: String = r.get(5)?;
            out.push(Transaction {
                id: r.get(0)?,
                user_id: r.get(1)?,
                amount: parse_decimal(&amount_s)
                    .with_context(|| format!("Stored amount '{}' is corrupt", amount_s))?,
                date: parse_date(&date_s)?,
                details: r.get(4)?,
                kind: TransactionKind::parse(&kind_s)?,
                category: Category {
                    id: r.get(6)?,
                    name: r.get(7)?,
                    icon: r.get(8)?,
                },
            });
        }
        Ok(out)
    }

    pub fn add(&self, t: &Transaction) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO transactions(id, user_id, amount, date, category_id, details, kind)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    t.id,
                    t.user_id,
                    t.amount.to_string(),
                    t.date.to_string(),
                    t.category.id,
                    t.details,
                    t.kind.as_str()
                ],
            )
            .with_context(|| format!("Insert transaction '{}'", t.id))?;
        self.bump_revision()
    }

    /// In-place correction: replaces the stored record with the same id.
    /// Returns false when no record matched.
    pub fn replace(&self, t: &Transaction) -> Result<bool> {
        let n = self.conn.execute(
            "UPDATE transactions
             SET amount=?2, date=?3, category_id=?4, details=?5, kind=?6
             WHERE id=?1 AND user_id=?7",
            params![
                t.id,
                t.amount.to_string(),
                t.date.to_string(),
                t.category.id,
                t.details,
                t.kind.as_str(),
                t.user_id
            ],
        )?;
        if n > 0 {
            self.bump_revision()?;
        }
        Ok(n > 0)
    }

    pub fn remove(&self, user_id: &str, id: &str) -> Result<bool> {
        let n = self.conn.execute(
            "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
            params![id, user_id],
        )?;
        if n > 0 {
            self.bump_revision()?;
        }
        Ok(n > 0)
    }

    /// Drops every transaction of one user (logout path).
    pub fn clear_user(&self, user_id: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM transactions WHERE user_id=?1", params![user_id])?;
        self.bump_revision()
    }

    pub fn revision(&self) -> Result<i64> {
        let v = get_setting(self.conn, REVISION_KEY)?;
        Ok(v.map(|s| s.parse::<i64>().unwrap_or(0)).unwrap_or(0))
    }

    fn bump_revision(&self) -> Result<()> {
        let next = self.revision()? + 1;
        set_setting(self.conn, REVISION_KEY, &next.to_string())
    }
}
