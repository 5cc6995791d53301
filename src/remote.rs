// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client for the remote profile/transaction document store.
//!
//! Documents go through explicit schema structs and decoding fails closed: a
//! missing field or a single malformed category rejects the whole document
//! instead of silently dropping parts of it.

use chrono::NaiveDate;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Category, Gender, Transaction, TransactionKind, User, UserSource};
use crate::utils::http_client;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote returned HTTP {status} for {url}")]
    Status { status: StatusCode, url: String },
    #[error("remote document rejected: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("remote document rejected: {0}")]
    Invalid(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryDoc {
    pub id: String,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserDoc {
    pub name: String,
    pub gender: Gender,
    #[serde(default)]
    pub photo_path: Option<String>,
    pub email: String,
    pub categories: Vec<CategoryDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionDoc {
    pub id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: String,
    #[serde(default)]
    pub details: Option<String>,
    pub kind: TransactionKind,
}

/// Decodes a `users/{id}` document body. The document carries no id of its
/// own; the caller supplies the one it asked for.
pub fn decode_user(id: &str, body: &str) -> Result<User, RemoteError> {
    let doc: UserDoc = serde_json::from_str(body)?;
    Ok(User {
        id: id.to_string(),
        name: doc.name,
        gender: doc.gender,
        photo_path: doc.photo_path,
        email: doc.email,
        categories: doc
            .categories
            .into_iter()
            .map(|c| Category {
                id: c.id,
                name: c.name,
                icon: c.icon,
            })
            .collect(),
        source: UserSource::Remote,
    })
}

/// Decodes a transaction list body against the owner's category set. An
/// unknown category reference rejects the record.
pub fn decode_transactions(user: &User, body: &str) -> Result<Vec<Transaction>, RemoteError> {
    let docs: Vec<TransactionDoc> = serde_json::from_str(body)?;
    docs.into_iter()
        .map(|d| {
            let category = user
                .categories
                .iter()
                .find(|c| c.id == d.category_id)
                .cloned()
                .ok_or_else(|| {
                    RemoteError::Invalid(format!(
                        "transaction '{}' references unknown category '{}'",
                        d.id, d.category_id
                    ))
                })?;
            if d.amount <= Decimal::ZERO {
                return Err(RemoteError::Invalid(format!(
                    "transaction '{}' has non-positive amount {}",
                    d.id, d.amount
                )));
            }
            Ok(Transaction {
                id: d.id,
                user_id: user.id.clone(),
                amount: d.amount,
                date: d.date,
                category,
                details: d.details,
                kind: d.kind,
            })
        })
        .collect()
}

fn user_doc(user: &User) -> UserDoc {
    UserDoc {
        name: user.name.clone(),
        gender: user.gender,
        photo_path: user.photo_path.clone(),
        email: user.email.clone(),
        categories: user
            .categories
            .iter()
            .map(|c| CategoryDoc {
                id: c.id.clone(),
                name: c.name.clone(),
                icon: c.icon.clone(),
            })
            .collect(),
    }
}

fn transaction_docs(transactions: &[Transaction]) -> Vec<TransactionDoc> {
    transactions
        .iter()
        .map(|t| TransactionDoc {
            id: t.id.clone(),
            amount: t.amount,
            date: t.date,
            category_id: t.category.id.clone(),
            details: t.details.clone(),
            kind: t.kind,
        })
        .collect()
}

pub struct RemoteClient {
    base: String,
    http: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(base: &str) -> anyhow::Result<Self> {
        Ok(RemoteClient {
            base: base.trim_end_matches('/').to_string(),
            http: http_client()?,
        })
    }

    pub fn fetch_user(&self, id: &str) -> Result<User, RemoteError> {
        let body = self.get(&format!("users/{}", id))?;
        decode_user(id, &body)
    }

    pub fn push_user(&self, user: &User) -> Result<(), RemoteError> {
        self.put(&format!("users/{}", user.id), &user_doc(user))
    }

    pub fn fetch_transactions(&self, user: &User) -> Result<Vec<Transaction>, RemoteError> {
        let body = self.get(&format!("users/{}/transactions", user.id))?;
        decode_transactions(user, &body)
    }

    pub fn push_transactions(
        &self,
        user: &User,
        transactions: &[Transaction],
    ) -> Result<(), RemoteError> {
        self.put(
            &format!("users/{}/transactions", user.id),
            &transaction_docs(transactions),
        )
    }

    fn get(&self, path: &str) -> Result<String, RemoteError> {
        let url = format!("{}/{}", self.base, path);
        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteError::Status { status, url });
        }
        Ok(resp.text()?)
    }

    fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<(), RemoteError> {
        let url = format!("{}/{}", self.base, path);
        let resp = self.http.put(&url).json(body).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteError::Status { status, url });
        }
        Ok(())
    }
}
