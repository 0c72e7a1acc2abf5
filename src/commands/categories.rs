// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::models::{CategoryPatch, TxKind};
use crate::store::Store;
use crate::utils::{fmt_money, id_for_category, maybe_print_json, pretty_table};
use crate::views;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = id_for_category(store, name)?;
            store.delete_category(id)?;
            println!("Removed category '{}' and its transactions", name);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind: TxKind = sub.get_one::<String>("type").unwrap().parse()?;
    let color = sub.get_one::<String>("color").unwrap();
    let parent_id = match sub.get_one::<String>("parent") {
        Some(parent) => Some(id_for_category(store, parent)?),
        None => None,
    };
    store.add_category(name, color, kind, parent_id)?;
    println!(
        "Added category '{}' ({}){}",
        name,
        kind,
        if parent_id.is_some() { " as subcategory" } else { "" }
    );
    Ok(())
}

#[derive(Serialize)]
pub struct CategoryRow {
    pub name: String,
    pub kind: String,
    pub color: String,
    pub count: usize,
    pub total: String,
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let tree = sub.get_flag("tree");
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TxKind>())
        .transpose()?;

    let cats: Vec<&crate::models::Category> = if tree {
        views::flatten_tree(store.categories())
            .into_iter()
            .filter(|c| kind.is_none_or(|k| c.kind == k))
            .collect()
    } else {
        store
            .categories()
            .iter()
            .filter(|c| kind.is_none_or(|k| c.kind == k))
            .collect()
    };

    let data: Vec<CategoryRow> = cats
        .iter()
        .map(|c| {
            let stats = store.category_stats(c.id);
            let name = if tree && c.parent_id.is_some() {
                format!("  {}", c.name)
            } else {
                c.name.clone()
            };
            CategoryRow {
                name,
                kind: c.kind.to_string(),
                color: c.color.clone(),
                count: stats.count,
                total: fmt_money(&stats.total),
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.name, r.kind, r.color, r.count.to_string(), r.total])
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Type", "Color", "Transactions", "Total"], rows)
        );
    }
    Ok(())
}

fn edit(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let id = id_for_category(store, name)?;
    let parent_id = if sub.get_flag("no-parent") {
        Some(None)
    } else {
        match sub.get_one::<String>("parent") {
            Some(parent) => Some(Some(id_for_category(store, parent)?)),
            None => None,
        }
    };
    let patch = CategoryPatch {
        name: sub.get_one::<String>("rename").cloned(),
        color: sub.get_one::<String>("color").cloned(),
        parent_id,
    };
    store.update_category(id, patch)?;
    println!("Updated category '{}'", name);
    Ok(())
}
