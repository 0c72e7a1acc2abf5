// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived-view computations: pure functions over the current collections,
//! recomputed on every query. At this data scale (tens to low hundreds of
//! records) recomputation is cheaper than any caching scheme.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Category, Transaction, TxKind};

/// Flatten the two-level category tree for display: each parent in insertion
/// order, immediately followed by its direct children in insertion order.
pub fn flatten_tree(categories: &[Category]) -> Vec<&Category> {
    let mut out = Vec::with_capacity(categories.len());
    for parent in categories.iter().filter(|c| c.parent_id.is_none()) {
        out.push(parent);
        out.extend(categories.iter().filter(|c| c.parent_id == Some(parent.id)));
    }
    out
}

/// One point per distinct transaction date, ascending, carrying that day's
/// income and expense totals plus the running balance up to and including it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

pub fn balance_over_time(transactions: &[Transaction]) -> Vec<BalancePoint> {
    let mut days: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for tx in transactions {
        let entry = days.entry(tx.date).or_default();
        match tx.kind {
            TxKind::Income => entry.0 += tx.amount,
            TxKind::Expense => entry.1 += tx.amount,
        }
    }
    let mut balance = Decimal::ZERO;
    days.into_iter()
        .map(|(date, (income, expense))| {
            balance += income - expense;
            BalancePoint {
                date,
                income,
                expense,
                balance,
            }
        })
        .collect()
}

/// Per-category share of a kind's total, for proportional display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlice {
    pub category_id: Uuid,
    pub category_name: String,
    pub total: Decimal,
}

/// Group transactions of the given kind by category and sum their amounts,
/// sorted descending by total. Names come from the denormalized snapshots.
pub fn category_distribution(transactions: &[Transaction], kind: TxKind) -> Vec<CategorySlice> {
    let mut totals: HashMap<Uuid, (String, Decimal)> = HashMap::new();
    for tx in transactions.iter().filter(|t| t.kind == kind) {
        let entry = totals
            .entry(tx.category_id)
            .or_insert_with(|| (tx.category_name.clone(), Decimal::ZERO));
        entry.1 += tx.amount;
    }
    let mut slices: Vec<CategorySlice> = totals
        .into_iter()
        .map(|(category_id, (category_name, total))| CategorySlice {
            category_id,
            category_name,
            total,
        })
        .collect();
    slices.sort_by(|a, b| b.total.cmp(&a.total));
    slices
}

/// Single-pass max by amount; the earliest transaction wins ties.
pub fn largest_transaction(transactions: &[Transaction], kind: TxKind) -> Option<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .reduce(|max, t| if t.amount > max.amount { t } else { max })
}
