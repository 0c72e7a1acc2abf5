// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

pub fn build_cli() -> Command {
    Command::new("spendlog")
        .about("Personal expense and income tracker with local persistence")
        .version(crate_version!())
        .subcommand(Command::new("init").about("Create the data store, seeding demo data on first run"))
        .subcommand(category_cmd())
        .subcommand(account_cmd())
        .subcommand(tx_cmd())
        .subcommand(report_cmd())
        .subcommand(export_cmd())
        .subcommand(
            Command::new("reset")
                .about("Overwrite all data with the demo dataset")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm the wipe"),
                ),
        )
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn kind_arg(required: bool) -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["expense", "income"])
        .required(required)
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage expense and income categories")
        .subcommand(
            Command::new("add")
                .about("Add a category or subcategory")
                .arg(Arg::new("name").required(true))
                .arg(kind_arg(true))
                .arg(Arg::new("color").long("color").default_value("#6366f1"))
                .arg(
                    Arg::new("parent")
                        .long("parent")
                        .help("Parent category name (must be of the same type)"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List categories with usage stats")
                .arg(kind_arg(false))
                .arg(
                    Arg::new("tree")
                        .long("tree")
                        .action(ArgAction::SetTrue)
                        .help("Interleave subcategories under their parents"),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Edit a category; renames propagate to its transactions")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("rename").long("rename"))
                .arg(Arg::new("color").long("color"))
                .arg(Arg::new("parent").long("parent").help("New parent category name"))
                .arg(
                    Arg::new("no-parent")
                        .long("no-parent")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("parent")
                        .help("Detach from the current parent"),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a category, its subcategories, and their transactions")
                .arg(Arg::new("name").required(true)),
        )
}

fn account_cmd() -> Command {
    Command::new("account")
        .about("Manage accounts")
        .subcommand(
            Command::new("add")
                .about("Add an account with an opening balance")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("balance").long("balance").default_value("0"))
                .arg(Arg::new("color").long("color").default_value("#3b82f6")),
        )
        .subcommand(json_flags(
            Command::new("list").about("List accounts and the active total"),
        ))
        .subcommand(
            Command::new("edit")
                .about("Edit an account; renames propagate to its transactions")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("rename").long("rename"))
                .arg(Arg::new("balance").long("balance"))
                .arg(Arg::new("color").long("color")),
        )
        .subcommand(
            Command::new("toggle")
                .about("Activate or deactivate an account (history is kept)")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete an account and every transaction booked against it")
                .arg(Arg::new("name").required(true)),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and manage transactions")
        .subcommand(
            Command::new("add")
                .about("Book a transaction against a category and an account")
                .arg(kind_arg(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("account").long("account").required(true))
                .arg(Arg::new("desc").long("desc").default_value(""))
                .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(kind_arg(false))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Rebook a transaction with new values")
                .arg(Arg::new("id").required(true))
                .arg(kind_arg(false))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("account").long("account"))
                .arg(Arg::new("desc").long("desc"))
                .arg(Arg::new("date").long("date")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction, reversing its account effect")
                .arg(Arg::new("id").required(true)),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Aggregate views over the transaction collection")
        .subcommand(json_flags(
            Command::new("summary").about("Totals, counts and net balance"),
        ))
        .subcommand(json_flags(
            Command::new("history").about("Per-date income/expense and running balance"),
        ))
        .subcommand(json_flags(
            Command::new("by-category")
                .about("Per-category totals of one type, largest first")
                .arg(kind_arg(true)),
        ))
        .subcommand(
            Command::new("largest")
                .about("Largest single transaction of one type")
                .arg(kind_arg(true)),
        )
}

fn export_cmd() -> Command {
    Command::new("export").about("Export data").subcommand(
        Command::new("transactions")
            .about("Export the transaction collection")
            .arg(
                Arg::new("format")
                    .long("format")
                    .value_parser(["csv", "json"])
                    .default_value("csv"),
            )
            .arg(Arg::new("out").long("out").required(true)),
    )
}
