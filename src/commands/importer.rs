// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::dashboard::Dashboard;
use crate::import::{ImportReport, import_investments, import_transactions};
use crate::ledger::{load_investments, load_transactions, save_investments, save_transactions};
use crate::quotes::{FinnhubClient, QuoteSource};
use crate::utils::{date_or_today, pretty_table};
use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use tracing::warn;

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => transactions(sub),
        Some(("investments", sub)) => investments(settings, sub),
        _ => Ok(()),
    }
}

fn open_source(sub: &clap::ArgMatches) -> Result<(String, File)> {
    let path = sub.get_one::<String>("path").unwrap().trim().to_string();
    let file = File::open(&path).with_context(|| format!("Open CSV {}", path))?;
    Ok((path, file))
}

fn transactions(sub: &clap::ArgMatches) -> Result<()> {
    let (path, file) = open_source(sub)?;
    let into = Path::new(sub.get_one::<String>("into").unwrap().trim());
    let fallback_date = date_or_today(sub.get_one::<String>("date"))?;

    let mut dash = Dashboard {
        transactions: load_transactions(into)?,
        ..Default::default()
    };
    // a broken file fails here, before anything is written
    let imported = import_transactions(file, dash.next_transaction_id(), fallback_date)
        .with_context(|| format!("Import {}", path))?;
    dash.extend_transactions(imported.transactions);
    save_transactions(into, &dash.transactions)?;
    print_report(&path, &imported.report);
    Ok(())
}

fn investments(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let (path, file) = open_source(sub)?;
    let into = Path::new(sub.get_one::<String>("into").unwrap().trim());

    let client = if sub.get_flag("lookup") {
        match FinnhubClient::new(settings) {
            Ok(c) => Some(c),
            Err(err) => {
                warn!(error = %err, "quote client unavailable, using file prices");
                None
            }
        }
    } else {
        None
    };
    let quotes = client.as_ref().map(|c| c as &dyn QuoteSource);

    let mut dash = Dashboard {
        investments: load_investments(into)?,
        ..Default::default()
    };
    let imported = import_investments(file, dash.next_investment_id(), quotes)
        .with_context(|| format!("Import {}", path))?;
    dash.extend_investments(imported.investments);
    save_investments(into, &dash.investments)?;
    print_report(&path, &imported.report);
    Ok(())
}

fn print_report(path: &str, report: &ImportReport) {
    println!(
        "Imported {} rows from {} ({} skipped)",
        report.imported,
        path,
        report.skipped.len()
    );
    if !report.skipped.is_empty() {
        let rows = report
            .skipped
            .iter()
            .map(|s| vec![s.row.to_string(), s.reason.clone()])
            .collect();
        println!("{}", pretty_table(&["Row", "Skipped because"], rows));
    }
}
