// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::TxKind;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use crate::views;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("history", sub)) => history(store, sub)?,
        Some(("by-category", sub)) => by_category(store, sub)?,
        Some(("largest", sub)) => largest(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let stats = store.stats();
    if !maybe_print_json(json_flag, jsonl_flag, &stats)? {
        let rows = vec![
            vec![
                "Expenses".to_string(),
                fmt_money(&stats.total_expenses),
                stats.expense_count.to_string(),
            ],
            vec![
                "Incomes".to_string(),
                fmt_money(&stats.total_incomes),
                stats.income_count.to_string(),
            ],
            vec!["Balance".to_string(), fmt_money(&stats.balance), String::new()],
        ];
        println!("{}", pretty_table(&["", "Amount", "Transactions"], rows));
    }
    Ok(())
}

fn history(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let points = views::balance_over_time(store.transactions());
    if !maybe_print_json(json_flag, jsonl_flag, &points)? {
        let rows = points
            .iter()
            .map(|p| {
                vec![
                    p.date.to_string(),
                    format!("{:.2}", p.income),
                    format!("{:.2}", p.expense),
                    format!("{:.2}", p.balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Income", "Expense", "Balance"], rows)
        );
    }
    Ok(())
}

fn by_category(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let kind: TxKind = sub.get_one::<String>("type").unwrap().parse()?;
    let slices = views::category_distribution(store.transactions(), kind);
    if !maybe_print_json(json_flag, jsonl_flag, &slices)? {
        let total: Decimal = slices.iter().map(|s| s.total).sum();
        let rows = slices
            .iter()
            .map(|s| {
                let share = if total.is_zero() {
                    String::new()
                } else {
                    format!("{:.1}%", s.total / total * Decimal::new(100, 0))
                };
                vec![s.category_name.clone(), fmt_money(&s.total), share]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Total", "Share"], rows));
    }
    Ok(())
}

fn largest(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TxKind = sub.get_one::<String>("type").unwrap().parse()?;
    match views::largest_transaction(store.transactions(), kind) {
        Some(tx) => println!(
            "Largest {}: {} — {} ({}, {})",
            kind,
            fmt_money(&tx.amount),
            tx.description,
            tx.category_name,
            tx.date
        ),
        None => println!("No {} transactions yet", kind),
    }
    Ok(())
}
