// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::models::AccountPatch;
use crate::store::Store;
use crate::utils::{fmt_money, id_for_account, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
            let color = sub.get_one::<String>("color").unwrap();
            store.add_account(name, balance, color)?;
            println!("Added account '{}' with opening balance {}", name, fmt_money(&balance));
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = id_for_account(store, name)?;
            let balance = sub
                .get_one::<String>("balance")
                .map(|s| parse_decimal(s))
                .transpose()?;
            let patch = AccountPatch {
                name: sub.get_one::<String>("rename").cloned(),
                balance,
                color: sub.get_one::<String>("color").cloned(),
                is_active: None,
            };
            store.update_account(id, patch)?;
            println!("Updated account '{}'", name);
        }
        Some(("toggle", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = id_for_account(store, name)?;
            store.toggle_account_status(id)?;
            let active = store.account(id).map(|a| a.is_active).unwrap_or(false);
            println!(
                "Account '{}' is now {}",
                name,
                if active { "active" } else { "inactive" }
            );
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = id_for_account(store, name)?;
            store.delete_account(id)?;
            println!("Removed account '{}' and its transactions", name);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct AccountRow {
    pub name: String,
    pub balance: String,
    pub active: bool,
    pub color: String,
    pub created: String,
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data: Vec<AccountRow> = store
        .accounts()
        .iter()
        .map(|a| AccountRow {
            name: a.name.clone(),
            balance: fmt_money(&a.balance),
            active: a.is_active,
            color: a.color.clone(),
            created: a.created_at.date_naive().to_string(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.name,
                    r.balance,
                    if r.active { "yes" } else { "no" }.to_string(),
                    r.color,
                    r.created,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Account", "Balance", "Active", "Color", "Created"], rows)
        );
        println!("Total balance (active): {}", fmt_money(&store.total_balance()));
    }
    Ok(())
}
