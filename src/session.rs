// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::models::{default_categories, Category, Gender, User, UserSource};
use crate::store::TransactionStore;
use crate::utils::{get_setting, set_setting, unset_setting};

const CURRENT_USER_KEY: &str = "current_user";

/// Profile lifecycle, replacing the app-wide user singleton: constructed at
/// startup, queried for the active user, torn down on logout.
pub struct Session<'a> {
    conn: &'a Connection,
}

impl<'a> Session<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Session { conn }
    }

    pub fn current(&self) -> Result<Option<User>> {
        match get_setting(self.conn, CURRENT_USER_KEY)? {
            Some(id) => self.load_user(&id),
            None => Ok(None),
        }
    }

    /// The active user, or an error telling the caller to sign up first.
    pub fn require_current(&self) -> Result<User> {
        match self.current()? {
            Some(u) => Ok(u),
            None => bail!("No active profile. Run 'outlay user signup' first."),
        }
    }

    /// Creates a local profile seeded with the default categories and makes
    /// it the active one.
    pub fn create_local_user(&self, name: &str, email: &str, gender: Gender) -> Result<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            gender,
            photo_path: None,
            email: email.to_string(),
            categories: default_categories(),
            source: UserSource::Local,
        };
        self.set_current(&user)?;
        Ok(user)
    }

    /// Upserts the profile (with its categories) and marks it active. Also
    /// the landing point for profiles pulled from the remote store.
    pub fn set_current(&self, user: &User) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO users(id, name, gender, photo_path, email, source)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(id) DO UPDATE SET
                    name=excluded.name, gender=excluded.gender,
                    photo_path=excluded.photo_path, email=excluded.email,
                    source=excluded.source",
                params![
                    user.id,
                    user.name,
                    user.gender.as_str(),
                    user.photo_path,
                    user.email,
                    user.source.as_str()
                ],
            )
            .with_context(|| format!("Save profile '{}'", user.email))?;
        for cat in &user.categories {
            self.upsert_category(&user.id, cat)?;
        }
        set_setting(self.conn, CURRENT_USER_KEY, &user.id)
    }

    /// Drops the active profile and clears its transactions.
    pub fn logout(&self, transactions: &TransactionStore) -> Result<()> {
        if let Some(user) = self.current()? {
            transactions.clear_user(&user.id)?;
            self.conn
                .execute("DELETE FROM users WHERE id=?1", params![user.id])?;
        }
        unset_setting(self.conn, CURRENT_USER_KEY)
    }

    pub fn add_category(&self, user_id: &str, name: &str, icon: &str) -> Result<Category> {
        let cat = Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
        };
        self.upsert_category(user_id, &cat)?;
        Ok(cat)
    }

    pub fn remove_category(&self, user_id: &str, name: &str) -> Result<()> {
        let n = self
            .conn
            .execute(
                "DELETE FROM categories WHERE user_id=?1 AND name=?2",
                params![user_id, name],
            )
            .with_context(|| format!("Category '{}' is still referenced by transactions", name))?;
        if n == 0 {
            bail!("Category '{}' not found", name);
        }
        Ok(())
    }

    pub fn category_by_name(&self, user_id: &str, name: &str) -> Result<Category> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, icon FROM categories WHERE user_id=?1 AND name=?2 ORDER BY rowid LIMIT 1",
        )?;
        stmt.query_row(params![user_id, name], |r| {
            Ok(Category {
                id: r.get(0)?,
                name: r.get(1)?,
                icon: r.get(2)?,
            })
        })
        .optional()?
        .with_context(|| format!("Category '{}' not found", name))
    }

    fn load_user(&self, id: &str) -> Result<Option<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, gender, photo_path, email, source FROM users WHERE id=?1",
        )?;
        let row = stmt
            .query_row(params![id], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, Option<String>>(3)?,
                    r.get::<_, String>(4)?,
                    r.get::<_, String>(5)?,
                ))
            })
            .optional()?;
        let Some((id, name, gender_s, photo_path, email, source_s)) = row else {
            return Ok(None);
        };
        Ok(Some(User {
            categories: self.categories_for(&id)?,
            id,
            name,
            gender: Gender::parse(&gender_s)?,
            photo_path,
            email,
            source: UserSource::parse(&source_s)?,
        }))
    }

    fn categories_for(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, icon FROM categories WHERE user_id=?1 ORDER BY rowid")?;
        let rows = stmt.query_map(params![user_id], |r| {
            Ok(Category {
                id: r.get(0)?,
                name: r.get(1)?,
                icon: r.get(2)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn upsert_category(&self, user_id: &str, cat: &Category) -> Result<()> {
        self.conn.execute(
            "INSERT INTO categories(id, user_id, name, icon) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id, user_id) DO UPDATE SET name=excluded.name, icon=excluded.icon",
            params![cat.id, user_id, cat.name, cat.icon],
        )?;
        Ok(())
    }
}
