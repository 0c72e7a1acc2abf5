// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::models::{Transaction, TransactionPatch, TxKind};
use crate::store::Store;
use crate::utils::{
    id_for_account, id_for_category, maybe_print_json, parse_date, parse_decimal, parse_uuid,
    pretty_table,
};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => {
            let id = parse_uuid(sub.get_one::<String>("id").unwrap())?;
            store.delete_transaction(id)?;
            println!("Removed transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TxKind = sub.get_one::<String>("type").unwrap().parse()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let account = sub.get_one::<String>("account").unwrap();
    let description = sub.get_one::<String>("desc").unwrap();
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;

    let category_id = id_for_category(store, category)?;
    let account_id = id_for_account(store, account)?;
    let tx = store.add_transaction(kind, amount, category_id, account_id, description, date)?;
    println!(
        "Recorded {} {} on {} ('{}', acct: {})",
        kind, tx.amount, tx.date, category, account
    );
    Ok(())
}

fn edit(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_uuid(sub.get_one::<String>("id").unwrap())?;
    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(id_for_category(store, name)?),
        None => None,
    };
    let account_id = match sub.get_one::<String>("account") {
        Some(name) => Some(id_for_account(store, name)?),
        None => None,
    };
    let patch = TransactionPatch {
        kind: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TxKind>())
            .transpose()?,
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        category_id,
        account_id,
        description: sub.get_one::<String>("desc").cloned(),
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
    };
    store.update_transaction(id, patch)?;
    println!("Updated transaction {}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub account: String,
    pub description: String,
}

pub fn query_rows(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TxKind>())
        .transpose()?;
    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(id_for_category(store, name)?),
        None => None,
    };

    // Newest first; insertion order breaks ties within a date.
    let mut txs: Vec<&Transaction> = store
        .transactions()
        .iter()
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| category_id.is_none_or(|c| t.category_id == c))
        .collect();
    txs.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }

    Ok(txs
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id.to_string(),
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            amount: format!("{:.2}", t.amount),
            category: t.category_name.clone(),
            account: t.account_name.clone(),
            description: t.description.clone(),
        })
        .collect())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.account.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Amount (€)", "Category", "Account", "Description"],
                rows,
            )
        );
    }
    Ok(())
}
