// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use spendlog::models::{AccountPatch, CategoryPatch, TransactionPatch, TxKind};
use spendlog::storage::{KEY_ACCOUNTS, KEY_CATEGORIES, KEY_TRANSACTIONS, Storage};
use spendlog::store::{Store, StoreError};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// A store with empty persisted collections, bypassing the demo seed.
fn empty_store() -> Store {
    let storage = Storage::in_memory().unwrap();
    for key in [KEY_CATEGORIES, KEY_ACCOUNTS, KEY_TRANSACTIONS] {
        storage.put(key, "[]").unwrap();
    }
    Store::open(storage).unwrap()
}

/// Empty store plus one category per kind and two accounts at €1000 each.
fn fixture() -> (Store, Uuid, Uuid, Uuid, Uuid) {
    let mut store = empty_store();
    let groceries = store
        .add_category("Groceries", "#ef4444", TxKind::Expense, None)
        .unwrap();
    let salary = store
        .add_category("Salary", "#22c55e", TxKind::Income, None)
        .unwrap();
    let a = store.add_account("Checking", dec("1000"), "#3b82f6").unwrap();
    let b = store.add_account("Savings", dec("1000"), "#22c55e").unwrap();
    (store, groceries.id, salary.id, a.id, b.id)
}

#[test]
fn expense_debits_and_income_credits_the_account() {
    let (mut store, groceries, salary, a, _) = fixture();
    store
        .add_transaction(TxKind::Expense, dec("30"), groceries, a, "food", date("2025-11-01"))
        .unwrap();
    assert_eq!(store.account(a).unwrap().balance, dec("970"));
    store
        .add_transaction(TxKind::Income, dec("50"), salary, a, "pay", date("2025-11-02"))
        .unwrap();
    assert_eq!(store.account(a).unwrap().balance, dec("1020"));
}

#[test]
fn add_then_delete_is_an_inverse() {
    let (mut store, groceries, _, a, _) = fixture();
    let before_txs = store.transactions().to_vec();
    let tx = store
        .add_transaction(TxKind::Expense, dec("87.50"), groceries, a, "x", date("2025-11-03"))
        .unwrap();
    store.delete_transaction(tx.id).unwrap();
    assert_eq!(store.account(a).unwrap().balance, dec("1000"));
    assert_eq!(store.transactions(), &before_txs[..]);
}

#[test]
fn update_moves_the_effect_between_accounts() {
    // €50 expense on A rebooked as €30 expense on B must leave A as if the
    // original booking never happened and debit B by exactly 30.
    let (mut store, groceries, _, a, b) = fixture();
    let tx = store
        .add_transaction(TxKind::Expense, dec("50"), groceries, a, "x", date("2025-11-01"))
        .unwrap();
    assert_eq!(store.account(a).unwrap().balance, dec("950"));

    store
        .update_transaction(
            tx.id,
            TransactionPatch {
                amount: Some(dec("30")),
                account_id: Some(b),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(store.account(a).unwrap().balance, dec("1000"));
    assert_eq!(store.account(b).unwrap().balance, dec("970"));

    let updated = store.transaction(tx.id).unwrap();
    assert_eq!(updated.account_id, b);
    assert_eq!(updated.account_name, "Savings");
    assert_eq!(updated.amount, dec("30"));
}

#[test]
fn update_on_the_same_account_swaps_old_delta_for_new() {
    let (mut store, groceries, _, a, _) = fixture();
    let tx = store
        .add_transaction(TxKind::Expense, dec("50"), groceries, a, "x", date("2025-11-01"))
        .unwrap();
    store
        .update_transaction(
            tx.id,
            TransactionPatch {
                amount: Some(dec("30")),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(store.account(a).unwrap().balance, dec("970"));
}

#[test]
fn update_flipping_kind_flips_the_sign() {
    let (mut store, groceries, _, a, _) = fixture();
    let tx = store
        .add_transaction(TxKind::Expense, dec("50"), groceries, a, "x", date("2025-11-01"))
        .unwrap();
    store
        .update_transaction(
            tx.id,
            TransactionPatch {
                kind: Some(TxKind::Income),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(store.account(a).unwrap().balance, dec("1050"));
}

#[test]
fn update_keeps_denormalized_names_unless_reference_changes() {
    let (mut store, groceries, _, a, _) = fixture();
    let tx = store
        .add_transaction(TxKind::Expense, dec("10"), groceries, a, "x", date("2025-11-01"))
        .unwrap();
    store
        .update_transaction(
            tx.id,
            TransactionPatch {
                description: Some("y".into()),
                ..Default::default()
            },
        )
        .unwrap();
    let updated = store.transaction(tx.id).unwrap();
    assert_eq!(updated.category_name, "Groceries");
    assert_eq!(updated.account_name, "Checking");
    assert_eq!(updated.description, "y");
}

#[test]
fn deleting_a_category_cascades_to_children_and_transactions() {
    let (mut store, _, _, a, _) = fixture();
    let parent = store.add_category("Home", "#3b82f6", TxKind::Expense, None).unwrap();
    let c1 = store
        .add_category("Utilities", "#60a5fa", TxKind::Expense, Some(parent.id))
        .unwrap();
    let c2 = store
        .add_category("Furniture", "#60a5fa", TxKind::Expense, Some(parent.id))
        .unwrap();
    assert!(store.category(parent.id).unwrap().has_subcategories);

    store
        .add_transaction(TxKind::Expense, dec("85"), c1.id, a, "power", date("2025-10-28"))
        .unwrap();
    store
        .add_transaction(TxKind::Expense, dec("450"), parent.id, a, "rent", date("2025-11-01"))
        .unwrap();

    store.delete_category(parent.id).unwrap();

    for id in [parent.id, c1.id, c2.id] {
        assert!(store.category(id).is_none());
        assert!(store.transactions().iter().all(|t| t.category_id != id));
    }
    // removed bookings were unwound
    assert_eq!(store.account(a).unwrap().balance, dec("1000"));
}

#[test]
fn cascade_walks_nesting_deeper_than_the_ui_ever_creates() {
    let mut store = empty_store();
    let top = store.add_category("A", "#fff", TxKind::Expense, None).unwrap();
    let mid = store
        .add_category("B", "#fff", TxKind::Expense, Some(top.id))
        .unwrap();
    let leaf = store
        .add_category("C", "#fff", TxKind::Expense, Some(mid.id))
        .unwrap();
    store.delete_category(top.id).unwrap();
    assert!(store.category(mid.id).is_none());
    assert!(store.category(leaf.id).is_none());
}

#[test]
fn stats_partition_by_kind() {
    let (mut store, groceries, salary, a, _) = fixture();
    store
        .add_transaction(TxKind::Expense, dec("20"), groceries, a, "", date("2025-11-01"))
        .unwrap();
    store
        .add_transaction(TxKind::Expense, dec("30"), groceries, a, "", date("2025-11-02"))
        .unwrap();
    store
        .add_transaction(TxKind::Income, dec("100"), salary, a, "", date("2025-11-03"))
        .unwrap();

    let stats = store.stats();
    assert_eq!(stats.total_expenses, dec("50"));
    assert_eq!(stats.total_incomes, dec("100"));
    assert_eq!(stats.balance, dec("50"));
    assert_eq!(stats.expense_count, 2);
    assert_eq!(stats.income_count, 1);
}

#[test]
fn category_stats_exclude_descendants() {
    let (mut store, _, _, a, _) = fixture();
    let parent = store.add_category("Home", "#fff", TxKind::Expense, None).unwrap();
    let child = store
        .add_category("Utilities", "#fff", TxKind::Expense, Some(parent.id))
        .unwrap();
    store
        .add_transaction(TxKind::Expense, dec("450"), parent.id, a, "", date("2025-11-01"))
        .unwrap();
    store
        .add_transaction(TxKind::Expense, dec("85"), child.id, a, "", date("2025-11-02"))
        .unwrap();

    let parent_stats = store.category_stats(parent.id);
    assert_eq!(parent_stats.count, 1);
    assert_eq!(parent_stats.total, dec("450"));
}

#[test]
fn add_transaction_with_unknown_references_is_rejected_without_mutation() {
    let (mut store, groceries, _, a, _) = fixture();
    let tx_count = store.transactions().len();

    let err = store
        .add_transaction(TxKind::Expense, dec("10"), Uuid::new_v4(), a, "", date("2025-11-01"))
        .unwrap_err();
    assert!(matches!(err, StoreError::CategoryNotFound(_)));

    let err = store
        .add_transaction(TxKind::Expense, dec("10"), groceries, Uuid::new_v4(), "", date("2025-11-01"))
        .unwrap_err();
    assert!(matches!(err, StoreError::AccountNotFound(_)));

    assert_eq!(store.transactions().len(), tx_count);
    assert!(store.accounts().iter().all(|a| a.balance == dec("1000")));
}

#[test]
fn add_transaction_rejects_non_positive_amounts() {
    let (mut store, groceries, _, a, _) = fixture();
    for bad in ["0", "-5"] {
        let err = store
            .add_transaction(TxKind::Expense, dec(bad), groceries, a, "", date("2025-11-01"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NonPositiveAmount(_)));
    }
    assert!(store.transactions().is_empty());
}

#[test]
fn update_with_unresolvable_patch_reference_mutates_nothing() {
    let (mut store, groceries, _, a, _) = fixture();
    let tx = store
        .add_transaction(TxKind::Expense, dec("50"), groceries, a, "x", date("2025-11-01"))
        .unwrap();

    let err = store
        .update_transaction(
            tx.id,
            TransactionPatch {
                account_id: Some(Uuid::new_v4()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::AccountNotFound(_)));
    assert_eq!(store.account(a).unwrap().balance, dec("950"));
    assert_eq!(store.transaction(tx.id).unwrap().account_id, a);
}

#[test]
fn unknown_ids_are_silent_noops() {
    let (mut store, _, _, _, _) = fixture();
    let ghost = Uuid::new_v4();
    store.update_category(ghost, CategoryPatch::default()).unwrap();
    store.update_account(ghost, AccountPatch::default()).unwrap();
    store
        .update_transaction(ghost, TransactionPatch::default())
        .unwrap();
    store.delete_transaction(ghost).unwrap();
    store.delete_account(ghost).unwrap();
    assert_eq!(store.accounts().len(), 2);
    assert_eq!(store.categories().len(), 2);
}

#[test]
fn category_rename_propagates_to_referencing_transactions_only() {
    let (mut store, groceries, salary, a, _) = fixture();
    let t1 = store
        .add_transaction(TxKind::Expense, dec("10"), groceries, a, "", date("2025-11-01"))
        .unwrap();
    let t2 = store
        .add_transaction(TxKind::Income, dec("20"), salary, a, "", date("2025-11-02"))
        .unwrap();

    store
        .update_category(
            groceries,
            CategoryPatch {
                name: Some("Food".into()),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(store.transaction(t1.id).unwrap().category_name, "Food");
    assert_eq!(store.transaction(t2.id).unwrap().category_name, "Salary");
}

#[test]
fn account_rename_propagates_to_referencing_transactions() {
    let (mut store, groceries, _, a, _) = fixture();
    let tx = store
        .add_transaction(TxKind::Expense, dec("10"), groceries, a, "", date("2025-11-01"))
        .unwrap();
    store
        .update_account(
            a,
            AccountPatch {
                name: Some("Main".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(store.transaction(tx.id).unwrap().account_name, "Main");
}

#[test]
fn deleting_an_account_cascades_to_its_transactions() {
    let (mut store, groceries, _, a, b) = fixture();
    store
        .add_transaction(TxKind::Expense, dec("10"), groceries, a, "", date("2025-11-01"))
        .unwrap();
    store
        .add_transaction(TxKind::Expense, dec("20"), groceries, b, "", date("2025-11-02"))
        .unwrap();

    store.delete_account(a).unwrap();

    assert!(store.account(a).is_none());
    assert!(store.transactions().iter().all(|t| t.account_id != a));
    // the other account and its bookings are untouched
    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.account(b).unwrap().balance, dec("980"));
}

#[test]
fn toggling_hides_an_account_from_the_total_balance() {
    let (mut store, _, _, a, _) = fixture();
    assert_eq!(store.total_balance(), dec("2000"));
    store.toggle_account_status(a).unwrap();
    assert!(!store.account(a).unwrap().is_active);
    assert_eq!(store.total_balance(), dec("1000"));
    store.toggle_account_status(a).unwrap();
    assert_eq!(store.total_balance(), dec("2000"));
}

#[test]
fn query_helpers_filter_by_kind_parent_and_category() {
    let (mut store, groceries, salary, a, _) = fixture();
    let sub = store
        .add_category("Vegetables", "#fff", TxKind::Expense, Some(groceries))
        .unwrap();

    assert_eq!(store.categories_by_kind(TxKind::Expense).len(), 2);
    assert_eq!(store.categories_by_kind(TxKind::Income).len(), 1);
    assert_eq!(store.parent_categories(TxKind::Expense).len(), 1);
    assert_eq!(store.subcategories(groceries).len(), 1);
    assert_eq!(store.subcategories(groceries)[0].id, sub.id);

    store
        .add_transaction(TxKind::Expense, dec("10"), groceries, a, "", date("2025-11-01"))
        .unwrap();
    store
        .add_transaction(TxKind::Income, dec("20"), salary, a, "", date("2025-11-02"))
        .unwrap();
    assert_eq!(store.transactions_by_kind(TxKind::Expense).len(), 1);
    assert_eq!(store.transactions_by_category(salary).len(), 1);
}

#[test]
fn fresh_store_is_seeded_and_satisfies_the_balance_invariant() {
    let store = Store::open(Storage::in_memory().unwrap()).unwrap();

    assert_eq!(store.accounts().len(), 3);
    assert_eq!(store.categories().len(), 12);
    assert_eq!(store.transactions().len(), 12);

    // balance == opening (2000.00) + signed sum of that account's bookings
    for account in store.accounts() {
        let booked: Decimal = store
            .transactions()
            .iter()
            .filter(|t| t.account_id == account.id)
            .map(|t| t.signed_amount())
            .sum();
        assert_eq!(account.balance, dec("2000") + booked);
    }

    // seed subcategories hang off flagged parents
    let home = store.categories().iter().find(|c| c.name == "Home").unwrap();
    assert!(home.has_subcategories);
    assert_eq!(store.subcategories(home.id).len(), 1);
}

#[test]
fn reset_regenerates_the_demo_dataset() {
    let (mut store, groceries, _, a, _) = fixture();
    store
        .add_transaction(TxKind::Expense, dec("10"), groceries, a, "", date("2025-11-01"))
        .unwrap();

    store.reset_all_data().unwrap();

    assert_eq!(store.accounts().len(), 3);
    assert_eq!(store.categories().len(), 12);
    assert_eq!(store.transactions().len(), 12);
    assert!(store.account(a).is_none());
}
