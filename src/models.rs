// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => bail!("Unknown transaction kind '{}'", other),
        }
    }
}

/// A user-defined spending bucket. The icon is an opaque key resolved by
/// whatever front end renders it; equality covers all fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Category,
    pub details: Option<String>,
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => bail!("Unknown gender '{}' (use male|female)", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserSource {
    Local,
    Remote,
}

impl UserSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserSource::Local => "local",
            UserSource::Remote => "remote",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(UserSource::Local),
            "remote" => Ok(UserSource::Remote),
            other => bail!("Unknown user source '{}'", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub photo_path: Option<String>,
    pub email: String,
    pub categories: Vec<Category>,
    pub source: UserSource,
}

/// One ranked row of a monthly summary. Buckets are keyed by category id so
/// two categories sharing a display name stay distinct; the name rides along
/// for presentation only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySum {
    pub category_id: String,
    pub name: String,
    pub amount: Decimal,
}

/// Derived per-month report entry; recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// First day of the month.
    pub month: NaiveDate,
    /// Human-readable "Month Year" label.
    pub label: String,
    pub total: Decimal,
    pub top_categories: Vec<CategorySum>,
}

/// Categories seeded for every new profile.
pub fn default_categories() -> Vec<Category> {
    [
        ("food", "Food", "icon_food"),
        ("housing", "Housing", "icon_housing"),
        ("telecom", "Telecom", "icon_telecom"),
        ("entertainment", "Entertainment", "icon_entertainment"),
        ("vacation", "Vacation", "icon_vacation"),
        ("habits", "Habits", "icon_habits"),
        ("fashion", "Fashion", "icon_fashion"),
        ("car", "Car", "icon_car"),
        ("transport", "Transport", "icon_transport"),
        ("health", "Health", "icon_health"),
        ("pets", "Pets", "icon_pets"),
    ]
    .iter()
    .map(|(id, name, icon)| Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
    })
    .collect()
}
