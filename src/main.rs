// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use spendlog::store::Store;
use spendlog::{cli, commands, storage};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut store = Store::open(storage::Storage::open_default()?)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data store at {}", storage::data_path()?.display());
        }
        Some(("category", sub)) => commands::categories::handle(&mut store, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&mut store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("reset", sub)) => {
            if sub.get_flag("yes") {
                store.reset_all_data()?;
                println!("All data reset to the demo dataset");
            } else {
                eprintln!(
                    "This wipes every category, account and transaction. Re-run with --yes to confirm."
                );
            }
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
