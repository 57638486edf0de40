// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{
    load_goals, load_investments, load_transactions, save_goals, save_investments, save_json,
    save_transactions,
};
use anyhow::Result;
use std::path::Path;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let Some((what, sub)) = m.subcommand() else {
        return Ok(());
    };
    let src = Path::new(sub.get_one::<String>("file").unwrap().trim());
    let out = Path::new(sub.get_one::<String>("out").unwrap().trim());
    let json = sub.get_one::<String>("format").unwrap().eq_ignore_ascii_case("json");

    let count = match what {
        "transactions" => {
            let items = load_transactions(src)?;
            if json {
                save_json(out, &items)?;
            } else {
                save_transactions(out, &items)?;
            }
            items.len()
        }
        "investments" => {
            let items = load_investments(src)?;
            if json {
                save_json(out, &items)?;
            } else {
                save_investments(out, &items)?;
            }
            items.len()
        }
        "goals" => {
            let items = load_goals(src)?;
            if json {
                save_json(out, &items)?;
            } else {
                save_goals(out, &items)?;
            }
            items.len()
        }
        _ => return Ok(()),
    };
    println!("Exported {} {} to {}", count, what, out.display());
    Ok(())
}
