// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use wealthwise::engine::{
    category_breakdown, goals_overview, monthly_projection_series, monthly_series, net_worth,
    portfolio_gain_loss, portfolio_value, total_by_type,
};
use wealthwise::models::{Goal, GoalCategory, Investment, Transaction, TxType};

fn ledger() -> Vec<Transaction> {
    let start = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
    (0..40u64)
        .map(|i| Transaction {
            id: i + 1,
            kind: if i % 4 == 0 { TxType::Income } else { TxType::Expense },
            category: ["Salary", "Food", "Utilities", "Food"][(i % 4) as usize].to_string(),
            amount: Decimal::new(1000 + i as i64 * 37, 2),
            description: String::new(),
            date: start + Duration::days(i as i64 * 5),
        })
        .collect()
}

fn holdings() -> Vec<Investment> {
    vec![
        Investment {
            id: 1,
            symbol: "AAPL".into(),
            name: "Apple".into(),
            shares: Decimal::new(10, 0),
            buy_price: Decimal::new(150, 0),
            current_price: Decimal::new(175, 0),
        },
        Investment {
            id: 2,
            symbol: "BND".into(),
            name: "Bonds".into(),
            shares: Decimal::new(55, 1),
            buy_price: Decimal::new(80, 0),
            current_price: Decimal::new(72, 0),
        },
    ]
}

#[test]
fn net_worth_is_cash_flow_plus_market_value() {
    let txs = ledger();
    let inv = holdings();
    let expected = total_by_type(&txs, TxType::Income) - total_by_type(&txs, TxType::Expense)
        + portfolio_value(&inv);
    assert_eq!(net_worth(&txs, &inv), expected);
    assert_eq!(net_worth(&[], &[]), Decimal::ZERO);
    // 10*(175-150) + 5.5*(72-80)
    assert_eq!(portfolio_gain_loss(&inv), Decimal::new(206, 0));
}

#[test]
fn series_covering_every_month_sums_to_totals() {
    let txs = ledger();
    let last = txs.iter().map(|t| t.date).max().unwrap();
    let series = monthly_series(&txs, 12, last);
    assert_eq!(series.len(), 12);
    assert_eq!(series.last().unwrap().month, last.format("%Y-%m").to_string());

    let income: Decimal = series.iter().map(|m| m.income).sum();
    let expenses: Decimal = series.iter().map(|m| m.expenses).sum();
    assert_eq!(income, total_by_type(&txs, TxType::Income));
    assert_eq!(expenses, total_by_type(&txs, TxType::Expense));
}

#[test]
fn breakdown_never_exceeds_total_expenses() {
    let txs = ledger();
    let all = category_breakdown(&txs, &["Food", "Utilities", "Salary", "Rent", "Food"]);
    let names: Vec<&str> = all.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Food", "Utilities"]);
    let charted: Decimal = all.iter().map(|c| c.value).sum();
    assert_eq!(charted, total_by_type(&txs, TxType::Expense));
}

#[test]
fn projection_is_monotonic_and_capped() {
    let goals = vec![
        Goal {
            id: 1,
            name: "House".into(),
            target: Decimal::new(3000, 0),
            current: Decimal::new(1000, 0),
            category: GoalCategory::Purchase,
            monthly_contribution: Decimal::new(450, 0),
        },
        Goal {
            id: 2,
            name: "Idle".into(),
            target: Decimal::new(100, 0),
            current: Decimal::ZERO,
            category: GoalCategory::Savings,
            monthly_contribution: Decimal::ZERO,
        },
    ];
    let series = monthly_projection_series(&goals, 12, NaiveDate::from_ymd_opt(2025, 11, 10).unwrap());
    assert_eq!(series.len(), 12);
    assert_eq!(series[0].month, "2025-11");
    assert_eq!(series[2].month, "2026-01");
    assert_eq!(series[2].label, "Jan");

    let path: Vec<Decimal> = series.iter().map(|p| p.goals[0].projected).collect();
    assert!(series.iter().all(|p| p.goals.len() == 1));
    assert!(path.windows(2).all(|w| w[0] <= w[1]));
    assert!(path.iter().all(|v| *v <= Decimal::new(3000, 0)));
    assert_eq!(path[0], Decimal::new(1450, 0));
    assert_eq!(*path.last().unwrap(), Decimal::new(3000, 0));

    let overview = goals_overview(&goals);
    assert_eq!(overview[1].progress_percent, Decimal::ZERO);
    assert_eq!(overview[1].remaining_percent, Decimal::ONE_HUNDRED);
}
