// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use rust_decimal::Decimal;

use spendlog::models::TxKind;
use spendlog::storage::{KEY_ACCOUNTS, KEY_CATEGORIES, KEY_TRANSACTIONS, Storage};
use spendlog::store::Store;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> chrono::NaiveDate {
    s.parse().unwrap()
}

fn open_empty(path: &Path) -> Store {
    let storage = Storage::open(path).unwrap();
    for key in [KEY_CATEGORIES, KEY_ACCOUNTS, KEY_TRANSACTIONS] {
        storage.put(key, "[]").unwrap();
    }
    Store::open(storage).unwrap()
}

#[test]
fn collections_round_trip_element_wise() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.sqlite");

    let (categories, accounts, transactions) = {
        let mut store = open_empty(&path);
        let food = store
            .add_category("Food", "#ef4444", TxKind::Expense, None)
            .unwrap();
        store
            .add_category("Takeaway", "#f87171", TxKind::Expense, Some(food.id))
            .unwrap();
        let acct = store.add_account("Checking", dec("500"), "#3b82f6").unwrap();
        store
            .add_transaction(TxKind::Expense, dec("12.30"), food.id, acct.id, "lunch", date("2025-11-04"))
            .unwrap();
        (
            store.categories().to_vec(),
            store.accounts().to_vec(),
            store.transactions().to_vec(),
        )
    };

    let reopened = Store::open(Storage::open(&path).unwrap()).unwrap();
    assert_eq!(reopened.categories(), &categories[..]);
    assert_eq!(reopened.accounts(), &accounts[..]);
    assert_eq!(reopened.transactions(), &transactions[..]);
}

#[test]
fn first_open_seeds_and_later_opens_reuse_the_seed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.sqlite");

    let seeded = {
        let store = Store::open(Storage::open(&path).unwrap()).unwrap();
        (
            store.categories().to_vec(),
            store.accounts().to_vec(),
            store.transactions().to_vec(),
        )
    };
    assert!(!seeded.0.is_empty());

    // ids must be stable: the second open deserializes, it does not reseed
    let reopened = Store::open(Storage::open(&path).unwrap()).unwrap();
    assert_eq!(reopened.categories(), &seeded.0[..]);
    assert_eq!(reopened.accounts(), &seeded.1[..]);
    assert_eq!(reopened.transactions(), &seeded.2[..]);
}

#[test]
fn every_mutation_is_durable_before_returning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.sqlite");

    let (acct_id, tx_id) = {
        let mut store = open_empty(&path);
        let cat = store
            .add_category("Food", "#ef4444", TxKind::Expense, None)
            .unwrap();
        let acct = store.add_account("Cash", dec("100"), "#22c55e").unwrap();
        let tx = store
            .add_transaction(TxKind::Expense, dec("40"), cat.id, acct.id, "", date("2025-11-01"))
            .unwrap();
        (acct.id, tx.id)
        // dropped without any explicit flush
    };

    let reopened = Store::open(Storage::open(&path).unwrap()).unwrap();
    assert_eq!(reopened.account(acct_id).unwrap().balance, dec("60"));
    assert!(reopened.transaction(tx_id).is_some());
}

#[test]
fn reset_overwrites_the_persisted_copies() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.sqlite");

    let reset_state = {
        let mut store = open_empty(&path);
        store.add_account("Scratch", dec("1"), "#fff").unwrap();
        store.reset_all_data().unwrap();
        (
            store.categories().to_vec(),
            store.accounts().to_vec(),
            store.transactions().to_vec(),
        )
    };
    assert_eq!(reset_state.1.len(), 3);
    assert_eq!(reset_state.2.len(), 12);

    let reopened = Store::open(Storage::open(&path).unwrap()).unwrap();
    assert_eq!(reopened.categories(), &reset_state.0[..]);
    assert_eq!(reopened.accounts(), &reset_state.1[..]);
    assert_eq!(reopened.transactions(), &reset_state.2[..]);
}

#[test]
fn persisted_form_uses_the_source_schema_field_names() {
    let storage = Storage::in_memory().unwrap();
    for key in [KEY_CATEGORIES, KEY_ACCOUNTS, KEY_TRANSACTIONS] {
        storage.put(key, "[]").unwrap();
    }
    let mut store = Store::open(storage).unwrap();
    let food = store
        .add_category("Food", "#ef4444", TxKind::Expense, None)
        .unwrap();
    store
        .add_category("Takeaway", "#f87171", TxKind::Expense, Some(food.id))
        .unwrap();
    let acct = store.add_account("Cash", dec("10"), "#22c55e").unwrap();
    store
        .add_transaction(TxKind::Expense, dec("5"), food.id, acct.id, "", date("2025-11-01"))
        .unwrap();

    let cats = serde_json::to_value(store.categories()).unwrap();
    assert_eq!(cats[0]["type"], "expense");
    assert!(cats[0].get("parentId").is_none());
    assert_eq!(cats[0]["hasSubcategories"], true);
    assert_eq!(cats[1]["parentId"], serde_json::json!(food.id));

    let accts = serde_json::to_value(store.accounts()).unwrap();
    assert_eq!(accts[0]["isActive"], true);
    assert!(accts[0].get("createdAt").is_some());

    let txs = serde_json::to_value(store.transactions()).unwrap();
    assert_eq!(txs[0]["categoryName"], "Food");
    assert_eq!(txs[0]["accountName"], "Cash");
    assert_eq!(txs[0]["date"], "2025-11-01");
}
