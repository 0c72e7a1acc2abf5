// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    Account, AccountPatch, Category, CategoryPatch, CategoryStats, Stats, Transaction,
    TransactionPatch, TxKind,
};
use crate::seed;
use crate::storage::{KEY_ACCOUNTS, KEY_CATEGORIES, KEY_TRANSACTIONS, Storage};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("category {0} not found")]
    CategoryNotFound(Uuid),
    #[error("account {0} not found")]
    AccountNotFound(Uuid),
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
    #[error(transparent)]
    Codec(#[from] serde_json::Error),
}

/// The single authoritative in-memory representation of the three
/// collections. Every mutating operation updates memory first, then rewrites
/// the touched collections to durable storage before returning, so a reader
/// in the same call stack always observes the post-mutation state.
pub struct Store {
    storage: Storage,
    categories: Vec<Category>,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
}

impl Store {
    /// Load persisted collections, seeding any that are absent with the
    /// demo dataset. Accounts are initialized before transactions because
    /// seed transactions are booked against seed account ids.
    pub fn open(storage: Storage) -> Result<Self, StoreError> {
        let mut store = Store {
            storage,
            categories: Vec::new(),
            accounts: Vec::new(),
            transactions: Vec::new(),
        };

        match store.storage.get(KEY_CATEGORIES)? {
            Some(raw) => store.categories = serde_json::from_str(&raw)?,
            None => {
                store.categories = seed::categories();
                store.persist_categories()?;
            }
        }
        match store.storage.get(KEY_ACCOUNTS)? {
            Some(raw) => store.accounts = serde_json::from_str(&raw)?,
            None => {
                store.accounts = seed::accounts();
                store.persist_accounts()?;
            }
        }
        match store.storage.get(KEY_TRANSACTIONS)? {
            Some(raw) => store.transactions = serde_json::from_str(&raw)?,
            None => {
                let transactions = seed::transactions(&store.categories, &store.accounts);
                store.book_all(&transactions);
                store.transactions = transactions;
                store.persist_accounts()?;
                store.persist_transactions()?;
            }
        }
        Ok(store)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    // ----- categories -----

    /// Add a category; a `parent_id` marks the referenced parent as having
    /// subcategories. Kind agreement with the parent is the caller's
    /// responsibility.
    pub fn add_category(
        &mut self,
        name: &str,
        color: &str,
        kind: TxKind,
        parent_id: Option<Uuid>,
    ) -> Result<Category, StoreError> {
        if let Some(pid) = parent_id {
            if let Some(parent) = self.categories.iter_mut().find(|c| c.id == pid) {
                parent.has_subcategories = true;
            }
        }
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color: color.to_string(),
            kind,
            parent_id,
            has_subcategories: false,
        };
        self.categories.push(category.clone());
        self.persist_categories()?;
        Ok(category)
    }

    /// Merge fields into the matching category; no-op on unknown id.
    /// A rename rewrites the denormalized snapshot on every transaction
    /// referencing this category.
    pub fn update_category(&mut self, id: Uuid, patch: CategoryPatch) -> Result<(), StoreError> {
        let Some(pos) = self.categories.iter().position(|c| c.id == id) else {
            return Ok(());
        };
        let mut renamed = false;
        {
            let category = &mut self.categories[pos];
            if let Some(name) = patch.name {
                renamed = name != category.name;
                category.name = name;
            }
            if let Some(color) = patch.color {
                category.color = color;
            }
            if let Some(parent_id) = patch.parent_id {
                category.parent_id = parent_id;
            }
        }
        if renamed {
            let name = self.categories[pos].name.clone();
            for tx in self.transactions.iter_mut().filter(|t| t.category_id == id) {
                tx.category_name = name.clone();
            }
        }
        self.persist_categories()?;
        if renamed {
            self.persist_transactions()?;
        }
        Ok(())
    }

    /// Delete a category, every descendant category (arbitrary depth), and
    /// every transaction referencing any of them. Removed transactions have
    /// their signed effect reversed on their accounts so the balance
    /// invariant keeps holding.
    pub fn delete_category(&mut self, id: Uuid) -> Result<(), StoreError> {
        let mut doomed = vec![id];
        collect_descendants(&self.categories, id, &mut doomed);
        self.categories.retain(|c| !doomed.contains(&c.id));

        let removed: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| doomed.contains(&t.category_id))
            .cloned()
            .collect();
        self.transactions.retain(|t| !doomed.contains(&t.category_id));
        for tx in &removed {
            if let Some(account) = self.accounts.iter_mut().find(|a| a.id == tx.account_id) {
                account.balance -= tx.signed_amount();
            }
        }

        self.persist_categories()?;
        self.persist_transactions()?;
        if !removed.is_empty() {
            self.persist_accounts()?;
        }
        Ok(())
    }

    pub fn categories_by_kind(&self, kind: TxKind) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.kind == kind).collect()
    }

    pub fn subcategories(&self, parent_id: Uuid) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.parent_id == Some(parent_id))
            .collect()
    }

    pub fn parent_categories(&self, kind: TxKind) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.kind == kind && c.parent_id.is_none())
            .collect()
    }

    // ----- accounts -----

    pub fn add_account(
        &mut self,
        name: &str,
        balance: Decimal,
        color: &str,
    ) -> Result<Account, StoreError> {
        let account = Account {
            id: Uuid::new_v4(),
            name: name.to_string(),
            balance,
            is_active: true,
            color: color.to_string(),
            created_at: Utc::now(),
        };
        self.accounts.push(account.clone());
        self.persist_accounts()?;
        Ok(account)
    }

    /// Merge fields into the matching account; no-op on unknown id. A rename
    /// propagates to the denormalized snapshot on referencing transactions.
    pub fn update_account(&mut self, id: Uuid, patch: AccountPatch) -> Result<(), StoreError> {
        let Some(pos) = self.accounts.iter().position(|a| a.id == id) else {
            return Ok(());
        };
        let mut renamed = false;
        {
            let account = &mut self.accounts[pos];
            if let Some(name) = patch.name {
                renamed = name != account.name;
                account.name = name;
            }
            if let Some(balance) = patch.balance {
                account.balance = balance;
            }
            if let Some(color) = patch.color {
                account.color = color;
            }
            if let Some(is_active) = patch.is_active {
                account.is_active = is_active;
            }
        }
        if renamed {
            let name = self.accounts[pos].name.clone();
            for tx in self.transactions.iter_mut().filter(|t| t.account_id == id) {
                tx.account_name = name.clone();
            }
        }
        self.persist_accounts()?;
        if renamed {
            self.persist_transactions()?;
        }
        Ok(())
    }

    /// Delete an account and every transaction booked against it, mirroring
    /// the category cascade so no dangling account references survive.
    /// No-op on unknown id.
    pub fn delete_account(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.id != id);
        if self.accounts.len() == before {
            return Ok(());
        }
        let had_transactions = self.transactions.iter().any(|t| t.account_id == id);
        self.transactions.retain(|t| t.account_id != id);
        self.persist_accounts()?;
        if had_transactions {
            self.persist_transactions()?;
        }
        Ok(())
    }

    /// Flip `is_active`; an inactive account keeps its history but is
    /// excluded from the total balance. No-op on unknown id.
    pub fn toggle_account_status(&mut self, id: Uuid) -> Result<(), StoreError> {
        let Some(account) = self.accounts.iter_mut().find(|a| a.id == id) else {
            return Ok(());
        };
        account.is_active = !account.is_active;
        self.persist_accounts()
    }

    pub fn total_balance(&self) -> Decimal {
        self.accounts
            .iter()
            .filter(|a| a.is_active)
            .map(|a| a.balance)
            .sum()
    }

    // ----- transactions -----

    /// Book a transaction: validates both references and the amount before
    /// mutating anything, then applies the signed amount to the account and
    /// appends the record.
    pub fn add_transaction(
        &mut self,
        kind: TxKind,
        amount: Decimal,
        category_id: Uuid,
        account_id: Uuid,
        description: &str,
        date: NaiveDate,
    ) -> Result<Transaction, StoreError> {
        if amount <= Decimal::ZERO {
            return Err(StoreError::NonPositiveAmount(amount));
        }
        let category_name = self
            .category(category_id)
            .map(|c| c.name.clone())
            .ok_or(StoreError::CategoryNotFound(category_id))?;
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or(StoreError::AccountNotFound(account_id))?;
        let account_name = account.name.clone();
        account.balance += kind.signed(amount);

        let transaction = Transaction {
            id: Uuid::new_v4(),
            kind,
            amount,
            category_id,
            category_name,
            account_id,
            account_name,
            description: description.to_string(),
            date,
            created_at: Utc::now(),
        };
        self.transactions.push(transaction.clone());
        self.persist_accounts()?;
        self.persist_transactions()?;
        Ok(transaction)
    }

    /// Rebook a transaction under new effective values. The old signed
    /// effect is reversed on the old account and the new effective effect
    /// applied on the new account; both steps run even when the two are the
    /// same account, which nets out to swapping the old delta for the new.
    /// Denormalized names are refreshed only for references the patch
    /// actually changes. No-op on unknown id.
    pub fn update_transaction(
        &mut self,
        id: Uuid,
        patch: TransactionPatch,
    ) -> Result<(), StoreError> {
        let Some(pos) = self.transactions.iter().position(|t| t.id == id) else {
            return Ok(());
        };
        let old = self.transactions[pos].clone();

        let kind = patch.kind.unwrap_or(old.kind);
        let amount = patch.amount.unwrap_or(old.amount);
        let account_id = patch.account_id.unwrap_or(old.account_id);
        if amount <= Decimal::ZERO {
            return Err(StoreError::NonPositiveAmount(amount));
        }
        let category = match patch.category_id {
            Some(cid) => {
                let name = self
                    .category(cid)
                    .map(|c| c.name.clone())
                    .ok_or(StoreError::CategoryNotFound(cid))?;
                Some((cid, name))
            }
            None => None,
        };
        let account_name = self
            .account(account_id)
            .map(|a| a.name.clone())
            .ok_or(StoreError::AccountNotFound(account_id))?;

        if let Some(account) = self.accounts.iter_mut().find(|a| a.id == old.account_id) {
            account.balance -= old.signed_amount();
        }
        if let Some(account) = self.accounts.iter_mut().find(|a| a.id == account_id) {
            account.balance += kind.signed(amount);
        }

        let tx = &mut self.transactions[pos];
        tx.kind = kind;
        tx.amount = amount;
        if let Some((category_id, category_name)) = category {
            tx.category_id = category_id;
            tx.category_name = category_name;
        }
        if patch.account_id.is_some() {
            tx.account_name = account_name;
        }
        tx.account_id = account_id;
        if let Some(description) = patch.description {
            tx.description = description;
        }
        if let Some(date) = patch.date {
            tx.date = date;
        }

        self.persist_accounts()?;
        self.persist_transactions()
    }

    /// Reverse the transaction's signed effect on its account, then remove
    /// it. No-op on unknown id.
    pub fn delete_transaction(&mut self, id: Uuid) -> Result<(), StoreError> {
        let Some(pos) = self.transactions.iter().position(|t| t.id == id) else {
            return Ok(());
        };
        let tx = self.transactions.remove(pos);
        if let Some(account) = self.accounts.iter_mut().find(|a| a.id == tx.account_id) {
            account.balance -= tx.signed_amount();
        }
        self.persist_accounts()?;
        self.persist_transactions()
    }

    pub fn transactions_by_kind(&self, kind: TxKind) -> Vec<&Transaction> {
        self.transactions.iter().filter(|t| t.kind == kind).collect()
    }

    pub fn transactions_by_category(&self, category_id: Uuid) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.category_id == category_id)
            .collect()
    }

    // ----- statistics -----

    pub fn stats(&self) -> Stats {
        let mut stats = Stats::default();
        for tx in &self.transactions {
            match tx.kind {
                TxKind::Expense => {
                    stats.total_expenses += tx.amount;
                    stats.expense_count += 1;
                }
                TxKind::Income => {
                    stats.total_incomes += tx.amount;
                    stats.income_count += 1;
                }
            }
        }
        stats.balance = stats.total_incomes - stats.total_expenses;
        stats
    }

    pub fn category_stats(&self, category_id: Uuid) -> CategoryStats {
        let mut stats = CategoryStats::default();
        for tx in self.transactions.iter().filter(|t| t.category_id == category_id) {
            stats.count += 1;
            stats.total += tx.amount;
        }
        stats
    }

    /// Regenerate the demo dataset (categories, then accounts, then booked
    /// transactions) and overwrite all three collections and their
    /// persisted copies.
    pub fn reset_all_data(&mut self) -> Result<(), StoreError> {
        self.categories = seed::categories();
        self.accounts = seed::accounts();
        let transactions = seed::transactions(&self.categories, &self.accounts);
        self.book_all(&transactions);
        self.transactions = transactions;
        self.persist_categories()?;
        self.persist_accounts()?;
        self.persist_transactions()
    }

    fn book_all(&mut self, transactions: &[Transaction]) {
        for tx in transactions {
            if let Some(account) = self.accounts.iter_mut().find(|a| a.id == tx.account_id) {
                account.balance += tx.signed_amount();
            }
        }
    }

    fn persist_categories(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.categories)?;
        self.storage.put(KEY_CATEGORIES, &raw)?;
        Ok(())
    }

    fn persist_accounts(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.accounts)?;
        self.storage.put(KEY_ACCOUNTS, &raw)?;
        Ok(())
    }

    fn persist_transactions(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.transactions)?;
        self.storage.put(KEY_TRANSACTIONS, &raw)?;
        Ok(())
    }
}

fn collect_descendants(categories: &[Category], parent_id: Uuid, out: &mut Vec<Uuid>) {
    for category in categories.iter().filter(|c| c.parent_id == Some(parent_id)) {
        out.push(category.id);
        collect_descendants(categories, category.id, out);
    }
}
