// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::dashboard::Dashboard;
use crate::ledger::{load_investments, load_transactions};
use crate::utils::{date_or_today, fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(sub)?,
        Some(("cashflow", sub)) => cashflow(sub)?,
        Some(("categories", sub)) => categories(settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn optional_path(sub: &clap::ArgMatches, id: &str) -> Option<String> {
    sub.get_one::<String>(id).map(|s| s.trim().to_string())
}

#[derive(Serialize)]
pub struct Summary {
    pub total_income: String,
    pub total_expenses: String,
    pub net_worth: String,
    pub portfolio_value: String,
    pub portfolio_gain_loss: String,
    pub portfolio_return_percent: String,
}

pub fn summarize(dash: &Dashboard) -> Summary {
    let p = dash.portfolio();
    Summary {
        total_income: fmt_money(&dash.total_income()),
        total_expenses: fmt_money(&dash.total_expenses()),
        net_worth: fmt_money(&dash.net_worth()),
        portfolio_value: fmt_money(&p.value),
        portfolio_gain_loss: fmt_money(&p.gain_loss),
        portfolio_return_percent: fmt_money(&p.return_percent),
    }
}

fn summary(sub: &clap::ArgMatches) -> Result<()> {
    let mut dash = Dashboard::default();
    if let Some(p) = optional_path(sub, "transactions") {
        dash.transactions = load_transactions(Path::new(&p))?;
    }
    if let Some(p) = optional_path(sub, "investments") {
        dash.investments = load_investments(Path::new(&p))?;
    }
    let s = summarize(&dash);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Total income".to_string(), s.total_income],
        vec!["Total expenses".to_string(), s.total_expenses],
        vec!["Net worth".to_string(), s.net_worth],
        vec!["Portfolio value".to_string(), s.portfolio_value],
        vec![
            "Portfolio gain/loss".to_string(),
            format!("{} ({}%)", s.portfolio_gain_loss, s.portfolio_return_percent),
        ],
    ];
    println!("{}", pretty_table(&["Figure", "Amount"], rows));
    Ok(())
}

fn cashflow(sub: &clap::ArgMatches) -> Result<()> {
    let path = optional_path(sub, "transactions").unwrap_or_default();
    let months = *sub.get_one::<usize>("months").unwrap();
    let as_of = date_or_today(sub.get_one::<String>("as_of"))?;
    let dash = Dashboard {
        transactions: load_transactions(Path::new(&path))?,
        ..Default::default()
    };
    let series = dash.monthly_series(months, as_of);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        return Ok(());
    }
    let rows = series
        .into_iter()
        .map(|m| {
            vec![
                m.month,
                m.label,
                fmt_money(&m.income),
                fmt_money(&m.expenses),
                fmt_money(&(m.income - m.expenses)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "", "Income", "Expenses", "Net"], rows)
    );
    Ok(())
}

fn categories(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let path = optional_path(sub, "transactions").unwrap_or_default();
    let chosen: Vec<String> = sub
        .get_many::<String>("category")
        .map(|vals| vals.map(|v| v.trim().to_string()).collect())
        .unwrap_or_else(|| settings.expense_categories.clone());
    let dash = Dashboard {
        transactions: load_transactions(Path::new(&path))?,
        ..Default::default()
    };
    let breakdown = dash.category_breakdown(&chosen);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &breakdown)? {
        return Ok(());
    }
    if breakdown.is_empty() {
        println!("No spending in {}", chosen.join(", "));
        return Ok(());
    }
    let rows = breakdown
        .into_iter()
        .map(|c| vec![c.name, fmt_money(&c.value)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], rows));
    Ok(())
}
