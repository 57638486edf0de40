// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dashboard::Dashboard;
use crate::ledger::{load_transactions, save_transactions};
use crate::models::NewTransaction;
use crate::utils::{date_or_today, fmt_money, maybe_print_json, pretty_table, today};
use anyhow::{Result, anyhow};
use serde::Serialize;
use std::path::Path;
use tracing::info;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(sub)?,
        Some(("list", sub)) => list(sub)?,
        Some(("rm", sub)) => rm(sub)?,
        _ => {}
    }
    Ok(())
}

fn ledger_path(sub: &clap::ArgMatches) -> &Path {
    Path::new(sub.get_one::<String>("file").unwrap().trim())
}

fn add(sub: &clap::ArgMatches) -> Result<()> {
    let path = ledger_path(sub);
    let draft = NewTransaction {
        kind: sub.get_one::<String>("type").unwrap().to_string(),
        category: sub.get_one::<String>("category").unwrap().to_string(),
        amount: sub.get_one::<String>("amount").unwrap().to_string(),
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or_default(),
        date: date_or_today(sub.get_one::<String>("date"))?.to_string(),
    };

    let mut dash = Dashboard {
        transactions: load_transactions(path)?,
        ..Default::default()
    };
    let tx = dash.add_transaction(&draft, today())?.clone();
    save_transactions(path, &dash.transactions)?;
    info!(id = tx.id, path = %path.display(), "transaction recorded");
    println!(
        "Recorded {} {} ({}) on {} as #{}",
        tx.kind,
        fmt_money(&tx.amount),
        tx.category,
        tx.date,
        tx.id
    );
    Ok(())
}

fn list(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Amount", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(sub: &clap::ArgMatches) -> Result<()> {
    let path = ledger_path(sub);
    let id = *sub.get_one::<u64>("id").unwrap();
    let mut dash = Dashboard {
        transactions: load_transactions(path)?,
        ..Default::default()
    };
    dash.remove_transaction(id)
        .ok_or_else(|| anyhow!("Transaction #{} not found in {}", id, path.display()))?;
    save_transactions(path, &dash.transactions)?;
    println!("Removed transaction #{}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: u64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

/// Newest first, optionally restricted to one `YYYY-MM` month.
pub fn query_rows(sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let transactions = load_transactions(ledger_path(sub))?;
    let month = sub.get_one::<String>("month").map(|m| m.trim().to_string());
    let limit = sub.get_one::<usize>("limit").copied();

    let selected: Vec<_> = transactions
        .iter()
        .filter(|t| {
            month
                .as_deref()
                .is_none_or(|m| t.date.format("%Y-%m").to_string() == m)
        })
        .cloned()
        .collect();
    let recent = crate::engine::recent_transactions(&selected, limit.unwrap_or(selected.len()));
    let data = recent
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            category: t.category.clone(),
            amount: fmt_money(&t.amount),
            description: t.description.clone(),
        })
        .collect();
    Ok(data)
}
