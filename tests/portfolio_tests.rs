// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use tempfile::tempdir;
use wealthwise::config::Settings;
use wealthwise::{cli, commands::portfolio, ledger};

fn run(settings: &Settings, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    if let Some(("portfolio", m)) = matches.subcommand() {
        portfolio::handle(settings, m)
    } else {
        panic!("no portfolio subcommand");
    }
}

#[test]
fn add_succeeds_when_lookup_fails_and_no_buy_price_given() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inv.csv");
    // no token configured, so the lookup fails without touching the network
    run(
        &Settings::default(),
        &["wealthwise", "portfolio", "add", "--file", path.to_str().unwrap(), "--symbol", "aapl", "--shares", "3"],
    )
    .unwrap();

    let inv = ledger::load_investments(&path).unwrap();
    assert_eq!(inv.len(), 1);
    assert_eq!(inv[0].symbol, "AAPL");
    assert_eq!(inv[0].shares, Decimal::new(3, 0));
    assert_eq!(inv[0].buy_price, Decimal::ZERO);
    assert_eq!(inv[0].current_price, Decimal::ZERO);
}

#[test]
fn add_with_buy_price_and_no_lookup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inv.csv");
    let file = path.to_str().unwrap();
    run(
        &Settings::default(),
        &["wealthwise", "portfolio", "add", "--file", file, "--symbol", "VTI", "--shares", "2", "--buy-price", "200", "--no-lookup"],
    )
    .unwrap();
    run(&Settings::default(), &["wealthwise", "portfolio", "rm", "--file", file, "--id", "1"]).unwrap();
    assert!(ledger::load_investments(&path).unwrap().is_empty());
    assert!(run(&Settings::default(), &["wealthwise", "portfolio", "rm", "--file", file, "--id", "1"]).is_err());
}

#[test]
fn watch_without_token_fails_fast() {
    let err = run(
        &Settings::default(),
        &["wealthwise", "portfolio", "watch", "--symbol", "AAPL", "--shares", "1", "--ticks", "1"],
    )
    .unwrap_err();
    assert!(format!("{:#}", err).contains("WEALTHWISE_QUOTE_TOKEN"));
}
