// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Best-effort import of generic bank/broker CSV exports.
//!
//! Rows are `(column, value)` pairs in file order. Column names are matched
//! case-insensitively and ignoring spaces/underscores, so `Amount`, `AMOUNT`
//! and `amount` are the same column, as are `buyPrice` and `Buy Price`.
//! When several columns match, the leftmost non-empty one wins.
//! Unusable rows are skipped and reported; only a structurally broken file
//! fails the import as a whole.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Read;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Investment, Transaction, TxType};
use crate::quotes::{QuoteSource, price_or_default};
use crate::utils::{parse_date_lenient, parse_money};

pub type RawRow = Vec<(String, String)>;

const AMOUNT: &[&str] = &["amount", "value", "sum"];
const DATE: &[&str] = &["date", "transactiondate", "posteddate"];
const DESCRIPTION: &[&str] = &["description", "memo", "payee", "details", "name"];
const CATEGORY: &[&str] = &["category"];
const TYPE: &[&str] = &["type"];
const SYMBOL: &[&str] = &["symbol", "ticker"];
const HOLDING_NAME: &[&str] = &["name", "description"];
const SHARES: &[&str] = &["shares", "quantity"];
const BUY_PRICE: &[&str] = &["buyprice", "purchaseprice", "cost"];
const CURRENT_PRICE: &[&str] = &["currentprice", "price"];

static KEYWORDS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)salary|payroll|wage", "Salary"),
        (r"(?i)grocery|food|restaurant", "Food"),
        (r"(?i)gas|transport|uber", "Transportation"),
        (r"(?i)utility|electric|water", "Utilities"),
        (r"(?i)movie|entertainment|netflix", "Entertainment"),
    ]
    .into_iter()
    .filter_map(|(pat, cat)| Regex::new(pat).ok().map(|re| (re, cat)))
    .collect()
});

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unreadable CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV has no header row")]
    MissingHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub row: usize, // 1-based, header excluded
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionImport {
    pub transactions: Vec<Transaction>,
    pub report: ImportReport,
}

#[derive(Debug, Clone, Default)]
pub struct InvestmentImport {
    pub investments: Vec<Investment>,
    pub report: ImportReport,
}

fn normalize_column(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// First non-empty value among the synonym columns.
fn field<'a>(row: &'a RawRow, synonyms: &[&str]) -> Option<&'a str> {
    row.iter()
        .find(|(k, v)| synonyms.contains(&normalize_column(k).as_str()) && !v.trim().is_empty())
        .map(|(_, v)| v.trim())
}

pub fn guess_category(description: &str) -> &'static str {
    KEYWORDS
        .iter()
        .find(|(re, _)| re.is_match(description))
        .map(|(_, cat)| *cat)
        .unwrap_or("Other")
}

pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, ImportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ImportError::MissingHeader);
    }
    let mut rows = Vec::new();
    // Only the header has to be valid UTF-8; cells are decoded lossily.
    for result in rdr.byte_records() {
        let rec = result?;
        let row: RawRow = headers
            .iter()
            .zip(rec.iter())
            .map(|(h, v)| (h.to_string(), String::from_utf8_lossy(v).into_owned()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn transaction_from_row(row: &RawRow, id: u64, today: NaiveDate) -> Result<Transaction, String> {
    let raw_amount = field(row, AMOUNT).ok_or_else(|| "missing amount".to_string())?;
    let signed = parse_money(raw_amount).ok_or_else(|| format!("unparseable amount '{}'", raw_amount))?;

    let kind = field(row, TYPE)
        .and_then(|t| t.parse::<TxType>().ok())
        .unwrap_or(if signed > Decimal::ZERO {
            TxType::Income
        } else {
            TxType::Expense
        });
    let description = field(row, DESCRIPTION).unwrap_or_default().to_string();
    let category = field(row, CATEGORY)
        .map(str::to_string)
        .unwrap_or_else(|| guess_category(&description).to_string());
    let date = field(row, DATE)
        .and_then(parse_date_lenient)
        .unwrap_or(today);

    Ok(Transaction {
        id,
        kind,
        category,
        amount: signed.abs(),
        description,
        date,
    })
}

/// Ids are assigned sequentially from `first_id`; rows without a usable date
/// are dated `today`.
pub fn transactions_from_rows(rows: &[RawRow], first_id: u64, today: NaiveDate) -> TransactionImport {
    let mut out = TransactionImport::default();
    for (i, row) in rows.iter().enumerate() {
        let id = first_id + out.transactions.len() as u64;
        match transaction_from_row(row, id, today) {
            Ok(tx) => out.transactions.push(tx),
            Err(reason) => {
                debug!(row = i + 1, %reason, "skipping transaction row");
                out.report.skipped.push(SkippedRow { row: i + 1, reason });
            }
        }
    }
    out.report.imported = out.transactions.len();
    info!(
        imported = out.report.imported,
        skipped = out.report.skipped.len(),
        "transaction import finished"
    );
    out
}

pub fn import_transactions<R: Read>(
    reader: R,
    first_id: u64,
    today: NaiveDate,
) -> Result<TransactionImport, ImportError> {
    let rows = read_rows(reader)?;
    Ok(transactions_from_rows(&rows, first_id, today))
}

fn investment_from_row(
    row: &RawRow,
    id: u64,
    quotes: Option<&dyn QuoteSource>,
) -> Result<Investment, String> {
    let symbol = field(row, SYMBOL)
        .map(str::to_uppercase)
        .ok_or_else(|| "missing symbol".to_string())?;
    let shares = field(row, SHARES)
        .and_then(parse_money)
        .filter(|s| *s > Decimal::ZERO)
        .ok_or_else(|| format!("missing or non-positive shares for {}", symbol))?;
    let buy_price = field(row, BUY_PRICE)
        .and_then(parse_money)
        .map(|p| p.max(Decimal::ZERO))
        .ok_or_else(|| format!("missing buy price for {}", symbol))?;
    let fallback = field(row, CURRENT_PRICE)
        .and_then(parse_money)
        .filter(|p| *p > Decimal::ZERO)
        .unwrap_or(buy_price);
    let current_price = match quotes {
        Some(source) => price_or_default(source, &symbol, fallback),
        None => fallback,
    };
    let name = field(row, HOLDING_NAME).unwrap_or(&symbol).to_string();

    Ok(Investment {
        id,
        symbol,
        name,
        shares,
        buy_price,
        current_price,
    })
}

/// With a quote source, current prices come from a live lookup; without one
/// (or when it fails) from the file, then from the buy price.
pub fn investments_from_rows(
    rows: &[RawRow],
    first_id: u64,
    quotes: Option<&dyn QuoteSource>,
) -> InvestmentImport {
    let mut out = InvestmentImport::default();
    for (i, row) in rows.iter().enumerate() {
        let id = first_id + out.investments.len() as u64;
        match investment_from_row(row, id, quotes) {
            Ok(inv) => out.investments.push(inv),
            Err(reason) => {
                debug!(row = i + 1, %reason, "skipping investment row");
                out.report.skipped.push(SkippedRow { row: i + 1, reason });
            }
        }
    }
    out.report.imported = out.investments.len();
    info!(
        imported = out.report.imported,
        skipped = out.report.skipped.len(),
        "investment import finished"
    );
    out
}

pub fn import_investments<R: Read>(
    reader: R,
    first_id: u64,
    quotes: Option<&dyn QuoteSource>,
) -> Result<InvestmentImport, ImportError> {
    let rows = read_rows(reader)?;
    Ok(investments_from_rows(&rows, first_id, quotes))
}
