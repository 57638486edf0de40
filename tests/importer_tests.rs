// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use std::io::Write;
use tempfile::{NamedTempFile, tempdir};
use wealthwise::config::Settings;
use wealthwise::models::TxType;
use wealthwise::{cli, commands::importer, ledger};

fn import(args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(&Settings::default(), import_m)
    } else {
        panic!("no import subcommand");
    }
}

#[test]
fn bad_rows_are_skipped_and_the_rest_imported() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Date,Description,Amount\n\
         2025-02-01,Monthly Salary,3000\n\
         2025-02-03,Grocery run,abc\n\
         02/04/2025,Uber ride,-12.50\n\
         not a date,Netflix,-15"
    )
    .unwrap();
    file.flush().unwrap();

    let dir = tempdir().unwrap();
    let into = dir.path().join("tx.csv");
    let padded = format!("  {}  ", file.path().to_str().unwrap());
    import(&[
        "wealthwise", "import", "transactions", "--path", &padded, "--into",
        into.to_str().unwrap(), "--date", "2025-02-28",
    ])
    .unwrap();

    let txs = ledger::load_transactions(&into).unwrap();
    assert_eq!(txs.len(), 3);
    assert_eq!(txs[0].kind, TxType::Income);
    assert_eq!(txs[0].category, "Salary");
    assert_eq!(txs[1].category, "Transportation");
    assert_eq!(txs[1].amount, Decimal::new(1250, 2));
    assert_eq!(txs[1].date.to_string(), "2025-02-04");
    assert_eq!(txs[2].category, "Entertainment");
    assert_eq!(txs[2].date.to_string(), "2025-02-28");
    let ids: Vec<u64> = txs.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn imports_append_after_existing_ids() {
    let dir = tempdir().unwrap();
    let into = dir.path().join("tx.csv");
    let src = dir.path().join("bank.csv");
    std::fs::write(&src, "amount,memo\n-4,coffee\n").unwrap();
    for _ in 0..2 {
        import(&[
            "wealthwise", "import", "transactions", "--path", src.to_str().unwrap(), "--into",
            into.to_str().unwrap(),
        ])
        .unwrap();
    }
    let txs = ledger::load_transactions(&into).unwrap();
    assert_eq!(txs.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
    assert!(txs.iter().all(|t| t.category == "Other"));
}

#[test]
fn investments_import_without_lookup_uses_file_prices() {
    let dir = tempdir().unwrap();
    let into = dir.path().join("inv.csv");
    let src = dir.path().join("holdings.csv");
    std::fs::write(
        &src,
        "Ticker,Quantity,Purchase Price,Price\naapl,10,150,175\nmsft,0,300,\nvti,2,200,\n",
    )
    .unwrap();
    import(&[
        "wealthwise", "import", "investments", "--path", src.to_str().unwrap(), "--into",
        into.to_str().unwrap(),
    ])
    .unwrap();

    let inv = ledger::load_investments(&into).unwrap();
    assert_eq!(inv.len(), 2);
    assert_eq!(inv[0].symbol, "AAPL");
    assert_eq!(inv[0].current_price, Decimal::new(175, 0));
    assert_eq!(inv[1].symbol, "VTI");
    assert_eq!(inv[1].current_price, Decimal::new(200, 0));
}

#[test]
fn missing_source_file_is_an_error() {
    let dir = tempdir().unwrap();
    let res = import(&[
        "wealthwise", "import", "transactions", "--path",
        dir.path().join("nope.csv").to_str().unwrap(), "--into",
        dir.path().join("tx.csv").to_str().unwrap(),
    ]);
    assert!(res.is_err());
}

#[test]
fn broken_file_fails_and_leaves_existing_records_alone() {
    let dir = tempdir().unwrap();
    let into = dir.path().join("tx.csv");
    let seed = dir.path().join("seed.csv");
    std::fs::write(&seed, "date,description,amount\n2025-03-01,Payroll,2000\n").unwrap();
    import(&[
        "wealthwise", "import", "transactions", "--path", seed.to_str().unwrap(), "--into",
        into.to_str().unwrap(),
    ])
    .unwrap();
    let before = std::fs::read(&into).unwrap();

    let broken = dir.path().join("broken.csv");
    std::fs::write(&broken, b"da\xfft\xfee,amo\xffunt\n2025-03-02,-5\n").unwrap();
    let res = import(&[
        "wealthwise", "import", "transactions", "--path", broken.to_str().unwrap(), "--into",
        into.to_str().unwrap(),
    ]);
    assert!(res.is_err());
    assert_eq!(std::fs::read(&into).unwrap(), before);
    assert_eq!(ledger::load_transactions(&into).unwrap().len(), 1);
}
