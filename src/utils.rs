// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, Days, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use std::str::FromStr;

const UA: &str = concat!(
    "wealthwise/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/wealthwise)"
);

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// `--date`/`--as-of` style option, defaulting to today.
pub fn date_or_today(raw: Option<&String>) -> Result<NaiveDate> {
    raw.map(|s| parse_date(s)).transpose().map(|d| d.unwrap_or_else(today))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Dates as they show up in bank exports. Returns `None` rather than an error
/// so callers can fall back to a reference date.
pub fn parse_date_lenient(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parses a money cell: strips currency symbols, thousands separators and
/// whitespace; `(12.50)` reads as `-12.50`.
pub fn parse_money(s: &str) -> Option<Decimal> {
    let mut cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' ' | '\t'))
        .collect();
    let negative = cleaned.starts_with('(') && cleaned.ends_with(')');
    if negative {
        cleaned = cleaned[1..cleaned.len() - 1].to_string();
    }
    if cleaned.is_empty() {
        return None;
    }
    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()?;
    Some(if negative { -value } else { value })
}

/// Form-field semantics: anything that does not parse is zero.
pub fn parse_or_zero(s: &str) -> Decimal {
    parse_money(s).unwrap_or(Decimal::ZERO)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

/// Months since year 0, so calendar months can be walked with plain integers.
pub fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

pub fn month_key(index: i64) -> String {
    format!("{:04}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1)
}

pub fn month_label(index: i64) -> &'static str {
    MONTH_LABELS[index.rem_euclid(12) as usize]
}

/// Adds calendar months. A day that does not exist in the target month rolls
/// forward into the next one (Jan 31 + 1 month = Mar 3 in a common year).
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let idx = month_index(date) + i64::from(months);
    let year = i32::try_from(idx.div_euclid(12)).ok()?;
    let month = idx.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_days(Days::new(u64::from(date.day() - 1)))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parse_money_handles_bank_formatting() {
        assert_eq!(parse_money("$1,234.50"), Some(d("1234.50")));
        assert_eq!(parse_money(" -42 "), Some(d("-42")));
        assert_eq!(parse_money("(12.50)"), Some(d("-12.50")));
        assert_eq!(parse_money(""), None);
        assert_eq!(parse_money("abc"), None);
    }

    #[test]
    fn parse_or_zero_defaults_garbage() {
        assert_eq!(parse_or_zero("n/a"), Decimal::ZERO);
        assert_eq!(parse_or_zero("3.5"), d("3.5"));
    }

    #[test]
    fn lenient_dates_accept_common_layouts() {
        assert_eq!(parse_date_lenient("2025-08-01"), Some(date("2025-08-01")));
        assert_eq!(parse_date_lenient("08/15/2025"), Some(date("2025-08-15")));
        assert_eq!(parse_date_lenient("2025/08/10"), Some(date("2025-08-10")));
        assert_eq!(parse_date_lenient("yesterday"), None);
    }

    #[test]
    fn add_months_rolls_overflowing_days_forward() {
        assert_eq!(add_months(date("2025-01-31"), 1), Some(date("2025-03-03")));
        assert_eq!(add_months(date("2024-01-31"), 1), Some(date("2024-03-02")));
        assert_eq!(add_months(date("2025-11-15"), 3), Some(date("2026-02-15")));
        assert_eq!(add_months(date("2025-05-20"), 0), Some(date("2025-05-20")));
    }

    #[test]
    fn month_keys_and_labels() {
        let idx = month_index(date("2025-01-09"));
        assert_eq!(month_key(idx), "2025-01");
        assert_eq!(month_label(idx), "Jan");
        assert_eq!(month_key(idx - 1), "2024-12");
        assert_eq!(month_label(idx - 1), "Dec");
    }
}
