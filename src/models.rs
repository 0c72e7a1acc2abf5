// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Whether a transaction (or the category it belongs to) debits or credits
/// the account it is booked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Expense,
    Income,
}

impl TxKind {
    /// Signed effect of an amount of this kind on an account balance.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            TxKind::Expense => -amount,
            TxKind::Income => amount,
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::Expense => write!(f, "expense"),
            TxKind::Income => write!(f, "income"),
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid transaction type '{0}', expected 'expense' or 'income'")]
pub struct ParseKindError(String);

impl FromStr for TxKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(TxKind::Expense),
            "income" => Ok(TxKind::Income),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

/// A label for grouping transactions, optionally nested under a parent
/// category of the same kind. The UI only ever creates one nesting level,
/// but the data does not forbid deeper chains, so cascade deletion walks
/// the parent chain to arbitrary depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_subcategories: bool,
}

/// A named balance holder. The balance is only ever mutated as a side effect
/// of transaction add/update/delete: at all times it equals the opening
/// balance plus the signed sum of every transaction booked against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub balance: Decimal,
    pub is_active: bool,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

/// A single dated monetary event. `category_name` and `account_name` are
/// denormalized snapshots of the referenced records; renames propagate to
/// them through the store's update operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: Decimal,
    pub category_id: Uuid,
    pub category_name: String,
    pub account_id: Uuid,
    pub account_name: String,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }
}

/// Global aggregates over the whole transaction collection. Derived on
/// demand, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_expenses: Decimal,
    pub total_incomes: Decimal,
    pub balance: Decimal,
    pub expense_count: usize,
    pub income_count: usize,
}

/// Count and sum for exactly one category id (descendants not included).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryStats {
    pub count: usize,
    pub total: Decimal,
}

/// Partial update for a category. `parent_id` distinguishes "leave as is"
/// (`None`), "clear" (`Some(None)`) and "set" (`Some(Some(id))`).
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub parent_id: Option<Option<Uuid>>,
}

#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub balance: Option<Decimal>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub kind: Option<TxKind>,
    pub amount: Option<Decimal>,
    pub category_id: Option<Uuid>,
    pub account_id: Option<Uuid>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}
