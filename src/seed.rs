// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fixed demo dataset for a fresh install. Categories and accounts are
//! self-contained; transactions are wired to both by name and must be
//! booked by the store so account balances pick up their effects.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{Account, Category, Transaction, TxKind};

pub fn categories() -> Vec<Category> {
    let mut cats = vec![
        parent("Groceries", "#ef4444", TxKind::Expense),
        parent("Transport", "#f97316", TxKind::Expense),
        parent("Restaurants", "#eab308", TxKind::Expense),
        parent("Home", "#3b82f6", TxKind::Expense),
        parent("Shopping", "#a855f7", TxKind::Expense),
        parent("Entertainment", "#ec4899", TxKind::Expense),
        parent("Salary", "#22c55e", TxKind::Income),
        parent("Freelance", "#14b8a6", TxKind::Income),
        parent("Sales", "#10b981", TxKind::Income),
        parent("Extra", "#84cc16", TxKind::Income),
    ];
    let home_id = cats[3].id;
    let sales_id = cats[8].id;
    cats[3].has_subcategories = true;
    cats[8].has_subcategories = true;
    cats.push(child("Utilities", "#60a5fa", TxKind::Expense, home_id));
    cats.push(child("Music gear", "#34d399", TxKind::Income, sales_id));
    cats
}

pub fn accounts() -> Vec<Account> {
    ["PayPal", "Cash", "Bank Account"]
        .iter()
        .zip(["#3b82f6", "#22c55e", "#6366f1"])
        .map(|(name, color)| Account {
            id: Uuid::new_v4(),
            name: (*name).to_string(),
            balance: Decimal::new(2000_00, 2),
            is_active: true,
            color: color.to_string(),
            created_at: Utc::now(),
        })
        .collect()
}

/// Demo transactions against the given collections. Records whose category
/// or account is missing (e.g. the user kept custom categories but wiped
/// transactions) are skipped rather than left dangling.
pub fn transactions(categories: &[Category], accounts: &[Account]) -> Vec<Transaction> {
    let rows: &[(TxKind, i64, &str, &str, &str, (i32, u32, u32))] = &[
        (TxKind::Expense, 87_50, "Groceries", "Cash", "Weekly groceries", (2025, 11, 3)),
        (TxKind::Expense, 65_00, "Transport", "Cash", "Fuel", (2025, 11, 2)),
        (TxKind::Expense, 45_00, "Restaurants", "Cash", "Dinner out", (2025, 11, 1)),
        (TxKind::Expense, 450_00, "Home", "Bank Account", "Rent", (2025, 11, 1)),
        (TxKind::Expense, 85_00, "Utilities", "Bank Account", "Electricity bill", (2025, 10, 28)),
        (TxKind::Expense, 45_00, "Utilities", "Bank Account", "Gas bill", (2025, 10, 25)),
        (TxKind::Income, 2800_00, "Salary", "Bank Account", "Monthly salary", (2025, 10, 30)),
        (TxKind::Income, 450_00, "Freelance", "PayPal", "Freelance web design", (2025, 10, 25)),
        (TxKind::Income, 120_00, "Sales", "PayPal", "Online sale", (2025, 10, 20)),
        (TxKind::Income, 300_00, "Extra", "Bank Account", "Bonus", (2025, 10, 15)),
        (TxKind::Income, 250_00, "Music gear", "PayPal", "Sold used guitar", (2025, 10, 18)),
        (TxKind::Income, 180_00, "Music gear", "PayPal", "Sold amplifier", (2025, 10, 12)),
    ];

    let mut out = Vec::new();
    for &(kind, cents, cat_name, acct_name, description, (y, m, d)) in rows {
        let category = categories.iter().find(|c| c.name == cat_name);
        let account = accounts.iter().find(|a| a.name == acct_name);
        let date = NaiveDate::from_ymd_opt(y, m, d);
        if let (Some(category), Some(account), Some(date)) = (category, account, date) {
            out.push(Transaction {
                id: Uuid::new_v4(),
                kind,
                amount: Decimal::new(cents, 2),
                category_id: category.id,
                category_name: category.name.clone(),
                account_id: account.id,
                account_name: account.name.clone(),
                description: description.to_string(),
                date,
                created_at: Utc::now(),
            });
        }
    }
    out
}

fn parent(name: &str, color: &str, kind: TxKind) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        color: color.to_string(),
        kind,
        parent_id: None,
        has_subcategories: false,
    }
}

fn child(name: &str, color: &str, kind: TxKind, parent_id: Uuid) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        color: color.to_string(),
        kind,
        parent_id: Some(parent_id),
        has_subcategories: false,
    }
}
