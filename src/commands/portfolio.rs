// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::dashboard::Dashboard;
use crate::engine::{holding_gain_loss, holding_return_percent, portfolio_summary};
use crate::ledger::{load_investments, save_investments};
use crate::models::{Investment, NewInvestment};
use crate::quotes::{FinnhubClient, QuoteError, QuoteSource, StagedInvestment};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc;
use tracing::{info, warn};

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(settings, sub)?,
        Some(("list", sub)) => list(sub)?,
        Some(("rm", sub)) => rm(sub)?,
        Some(("quote", sub)) => quote(settings, sub)?,
        Some(("watch", sub)) => watch(settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn holdings_path(sub: &clap::ArgMatches) -> &Path {
    Path::new(sub.get_one::<String>("file").unwrap().trim())
}

fn arg(sub: &clap::ArgMatches, id: &str) -> String {
    sub.get_one::<String>(id)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn add(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let path = holdings_path(sub);
    let mut draft = NewInvestment {
        symbol: arg(sub, "symbol"),
        name: arg(sub, "name"),
        shares: arg(sub, "shares"),
        buy_price: arg(sub, "buy_price"),
        current_price: arg(sub, "current_price"),
    };

    if !sub.get_flag("no_lookup") && draft.current_price.is_empty() {
        let symbol = draft.symbol.to_uppercase();
        let looked_up = FinnhubClient::new(settings).and_then(|c| Ok(c.quote(&symbol)?));
        match looked_up {
            Ok(q) => {
                if draft.buy_price.is_empty() {
                    draft.buy_price = q.open.to_string();
                }
                draft.current_price = q.current.to_string();
            }
            // adding still succeeds, priced at the buy price
            Err(err) => warn!(%symbol, error = %err, "quote lookup failed"),
        }
    }
    if draft.buy_price.is_empty() {
        draft.buy_price = "0".into();
    }

    let mut dash = Dashboard {
        investments: load_investments(path)?,
        ..Default::default()
    };
    let inv = dash.add_investment(&draft)?.clone();
    save_investments(path, &dash.investments)?;
    println!(
        "Added #{} {} x {} @ {} (now {})",
        inv.id,
        inv.symbol,
        inv.shares,
        fmt_money(&inv.buy_price),
        fmt_money(&inv.current_price)
    );
    Ok(())
}

#[derive(Serialize)]
pub struct HoldingRow {
    pub id: u64,
    pub symbol: String,
    pub name: String,
    pub shares: String,
    pub buy_price: String,
    pub current_price: String,
    pub value: String,
    pub gain_loss: String,
    pub gain_loss_percent: String,
}

pub fn holding_rows(investments: &[Investment]) -> Vec<HoldingRow> {
    investments
        .iter()
        .map(|i| HoldingRow {
            id: i.id,
            symbol: i.symbol.clone(),
            name: i.name.clone(),
            shares: i.shares.normalize().to_string(),
            buy_price: fmt_money(&i.buy_price),
            current_price: fmt_money(&i.current_price),
            value: fmt_money(&(i.shares * i.current_price)),
            gain_loss: fmt_money(&holding_gain_loss(i)),
            gain_loss_percent: fmt_money(&holding_return_percent(i)),
        })
        .collect()
}

fn list(sub: &clap::ArgMatches) -> Result<()> {
    let investments = load_investments(holdings_path(sub))?;
    let data = holding_rows(&investments);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows = data
        .into_iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.symbol,
                r.name,
                r.shares,
                r.buy_price,
                r.current_price,
                r.value,
                format!("{} ({}%)", r.gain_loss, r.gain_loss_percent),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Symbol", "Name", "Shares", "Buy", "Current", "Value", "Gain/Loss"],
            rows,
        )
    );
    let s = portfolio_summary(&investments);
    println!(
        "Portfolio value {}  gain/loss {} ({}%)",
        fmt_money(&s.value),
        fmt_money(&s.gain_loss),
        fmt_money(&s.return_percent)
    );
    Ok(())
}

fn rm(sub: &clap::ArgMatches) -> Result<()> {
    let path = holdings_path(sub);
    let id = *sub.get_one::<u64>("id").unwrap();
    let mut dash = Dashboard {
        investments: load_investments(path)?,
        ..Default::default()
    };
    let removed = dash
        .remove_investment(id)
        .ok_or_else(|| anyhow!("Holding #{} not found in {}", id, path.display()))?;
    save_investments(path, &dash.investments)?;
    println!("Removed holding #{} ({})", id, removed.symbol);
    Ok(())
}

fn quote(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let symbol = arg(sub, "symbol").to_uppercase();
    let client = FinnhubClient::new(settings)?;
    let q = client
        .quote(&symbol)
        .with_context(|| format!("Quote lookup for {}", symbol))?;
    println!(
        "{}",
        pretty_table(
            &["Symbol", "Open", "Current"],
            vec![vec![symbol, fmt_money(&q.open), fmt_money(&q.current)]],
        )
    );
    Ok(())
}

/// Stages a symbol/share count and keeps its price fresh until `--ticks`
/// quotes arrived or the process is interrupted.
fn watch(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let symbol = arg(sub, "symbol").to_uppercase();
    let ticks = sub.get_one::<u64>("ticks").copied();
    if settings.quote_token.is_none() {
        return Err(QuoteError::MissingToken).with_context(|| format!("Watch {}", symbol));
    }
    let source: Arc<dyn QuoteSource> = Arc::new(FinnhubClient::new(settings)?);

    let (tx, rx) = mpsc::channel();
    let mut staged = StagedInvestment::new(source, settings.refresh_interval()).on_quote(move |q| {
        let _ = tx.send(*q);
    });
    staged.set_symbol(&symbol)?;
    staged.set_shares(&arg(sub, "shares"))?;
    info!(%symbol, "watching price, Ctrl-C to stop");

    let mut seen = 0u64;
    for q in rx.iter() {
        seen += 1;
        println!(
            "{} {} open {} current {}",
            chrono::Local::now().format("%H:%M:%S"),
            symbol,
            fmt_money(&q.open),
            fmt_money(&q.current)
        );
        if ticks.is_some_and(|t| seen >= t) {
            break;
        }
    }
    staged.clear();
    Ok(())
}
