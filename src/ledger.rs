// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use crate::models::{Goal, Investment, Transaction, TxType};

/// On-disk shape of a transaction: expenses carry a negative amount so the
/// file sums like a bank statement.
#[derive(Debug, Serialize, Deserialize)]
struct TransactionRecord {
    id: u64,
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: TxType,
    category: String,
    amount: Decimal,
    #[serde(default)]
    description: String,
}

impl From<&Transaction> for TransactionRecord {
    fn from(t: &Transaction) -> Self {
        let amount = match t.kind {
            TxType::Income => t.amount,
            TxType::Expense => -t.amount,
        };
        Self {
            id: t.id,
            date: t.date,
            kind: t.kind,
            category: t.category.clone(),
            amount,
            description: t.description.clone(),
        }
    }
}

impl From<TransactionRecord> for Transaction {
    fn from(r: TransactionRecord) -> Self {
        Self {
            id: r.id,
            kind: r.kind,
            category: r.category,
            amount: r.amount.abs(),
            description: r.description,
            date: r.date,
        }
    }
}

fn read_records<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut out = Vec::new();
    for (i, rec) in rdr.deserialize::<T>().enumerate() {
        out.push(rec.with_context(|| format!("Invalid record on row {}", i + 1))?);
    }
    Ok(out)
}

fn write_records<T, W>(writer: W, items: impl IntoIterator<Item = T>) -> Result<()>
where
    T: Serialize,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for item in items {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let records: Vec<TransactionRecord> = read_records(reader)?;
    Ok(records.into_iter().map(Transaction::from).collect())
}

pub fn write_transactions<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    write_records(writer, transactions.iter().map(TransactionRecord::from))
}

pub fn read_investments<R: Read>(reader: R) -> Result<Vec<Investment>> {
    read_records(reader)
}

pub fn write_investments<W: Write>(writer: W, investments: &[Investment]) -> Result<()> {
    write_records(writer, investments)
}

pub fn read_goals<R: Read>(reader: R) -> Result<Vec<Goal>> {
    read_records(reader)
}

pub fn write_goals<W: Write>(writer: W, goals: &[Goal]) -> Result<()> {
    write_records(writer, goals)
}

/// Missing files are empty collections.
fn load_with<T, F>(path: &Path, read: F) -> Result<Vec<T>>
where
    F: FnOnce(File) -> Result<Vec<T>>,
{
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = File::open(path).with_context(|| format!("Open {}", path.display()))?;
    read(file).with_context(|| format!("Read {}", path.display()))
}

fn save_with<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(File) -> Result<()>,
{
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("Create {}", dir.display()))?;
    }
    let file = File::create(path).with_context(|| format!("Create {}", path.display()))?;
    write(file).with_context(|| format!("Write {}", path.display()))
}

pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    load_with(path, read_transactions)
}

pub fn save_transactions(path: &Path, transactions: &[Transaction]) -> Result<()> {
    save_with(path, |f| write_transactions(f, transactions))
}

pub fn load_investments(path: &Path) -> Result<Vec<Investment>> {
    load_with(path, read_investments)
}

pub fn save_investments(path: &Path, investments: &[Investment]) -> Result<()> {
    save_with(path, |f| write_investments(f, investments))
}

pub fn load_goals(path: &Path) -> Result<Vec<Goal>> {
    load_with(path, read_goals)
}

pub fn save_goals(path: &Path, goals: &[Goal]) -> Result<()> {
    save_with(path, |f| write_goals(f, goals))
}

pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    save_with(path, |mut f| {
        f.write_all(serde_json::to_string_pretty(value)?.as_bytes())?;
        Ok(())
    })
}
