// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

use super::portfolio::portfolio_value;
use crate::models::{Investment, Transaction, TxType};
use crate::utils::{month_index, month_key, month_label};

/// Expense categories charted when the caller does not pick its own.
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 5] = [
    "Food",
    "Transportation",
    "Entertainment",
    "Utilities",
    "Healthcare",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub month: String, // YYYY-MM
    pub label: String,
    pub income: Decimal,
    pub expenses: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub value: Decimal,
}

pub fn total_by_type(transactions: &[Transaction], kind: TxType) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Cash flow plus the current market value of the portfolio. Cost basis is
/// not subtracted from the cash side.
pub fn net_worth(transactions: &[Transaction], investments: &[Investment]) -> Decimal {
    total_by_type(transactions, TxType::Income) - total_by_type(transactions, TxType::Expense)
        + portfolio_value(investments)
}

/// `month_count` consecutive months ending with the month of `reference`,
/// oldest first. Empty months are kept as zero rows.
pub fn monthly_series(
    transactions: &[Transaction],
    month_count: usize,
    reference: NaiveDate,
) -> Vec<MonthlyTotals> {
    let last = month_index(reference);
    let first = last - month_count as i64 + 1;

    let mut series: Vec<MonthlyTotals> = (first..=last)
        .map(|idx| MonthlyTotals {
            month: month_key(idx),
            label: month_label(idx).to_string(),
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
        })
        .collect();

    for t in transactions {
        let offset = month_index(t.date) - first;
        if offset < 0 || offset >= month_count as i64 {
            continue;
        }
        let row = &mut series[offset as usize];
        match t.kind {
            TxType::Income => row.income += t.amount,
            TxType::Expense => row.expenses += t.amount,
        }
    }
    series
}

/// Expense totals for the given categories in caller order. Exact,
/// case-sensitive matching; categories summing to zero are left out.
pub fn category_breakdown<S: AsRef<str>>(
    transactions: &[Transaction],
    categories: &[S],
) -> Vec<CategoryTotal> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for cat in categories {
        let name = cat.as_ref();
        if !seen.insert(name) {
            continue;
        }
        let value: Decimal = transactions
            .iter()
            .filter(|t| t.kind == TxType::Expense && t.category == name)
            .map(|t| t.amount)
            .sum();
        if value.is_zero() {
            continue;
        }
        out.push(CategoryTotal {
            name: name.to_string(),
            value,
        });
    }
    out
}

/// Newest first by date, ties broken by the higher id.
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut refs: Vec<&Transaction> = transactions.iter().collect();
    refs.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    refs.truncate(limit);
    refs
}
