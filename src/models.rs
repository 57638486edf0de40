// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::utils::{parse_date_lenient, parse_money, parse_or_zero};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: Decimal },
    #[error("Unknown transaction type '{0}', expected income|expense")]
    UnknownTxType(String),
    #[error("Unknown goal category '{0}', expected savings|purchase|lifestyle|investment")]
    UnknownGoalCategory(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            _ => Err(ValidationError::UnknownTxType(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    #[default]
    Savings,
    Purchase,
    Lifestyle,
    Investment,
}

impl GoalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::Savings => "savings",
            GoalCategory::Purchase => "purchase",
            GoalCategory::Lifestyle => "lifestyle",
            GoalCategory::Investment => "investment",
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "savings" => Ok(GoalCategory::Savings),
            "purchase" => Ok(GoalCategory::Purchase),
            "lifestyle" => Ok(GoalCategory::Lifestyle),
            "investment" => Ok(GoalCategory::Investment),
            _ => Err(ValidationError::UnknownGoalCategory(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: TxType,
    pub category: String,
    pub amount: Decimal, // always non-negative, sign lives in `kind`
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: u64,
    pub symbol: String,
    pub name: String,
    pub shares: Decimal,
    pub buy_price: Decimal,
    pub current_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: u64,
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    pub category: GoalCategory,
    #[serde(default)]
    pub monthly_contribution: Decimal,
}

impl Goal {
    pub fn contribute(&mut self, amount: Decimal) {
        self.current += amount;
    }

    /// Never drops below zero.
    pub fn withdraw(&mut self, amount: Decimal) {
        self.current = (self.current - amount).max(Decimal::ZERO);
    }

    /// No upper clamp: a goal may be over-funded.
    pub fn set_current(&mut self, amount: Decimal) {
        self.current = amount.max(Decimal::ZERO);
    }
}

/// Raw transaction form input.
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub description: String,
    pub date: String,
}

impl NewTransaction {
    pub fn build(&self, id: u64, today: NaiveDate) -> Result<Transaction, ValidationError> {
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::Missing("category"));
        }
        if self.amount.trim().is_empty() {
            return Err(ValidationError::Missing("amount"));
        }
        let kind = if self.kind.trim().is_empty() {
            TxType::Expense
        } else {
            self.kind.parse()?
        };
        Ok(Transaction {
            id,
            kind,
            category: category.to_string(),
            amount: parse_or_zero(&self.amount).abs(),
            description: self.description.trim().to_string(),
            date: parse_date_lenient(&self.date).unwrap_or(today),
        })
    }
}

/// Raw holding form input. A missing or zero current price falls back to the
/// buy price.
#[derive(Debug, Clone, Default)]
pub struct NewInvestment {
    pub symbol: String,
    pub name: String,
    pub shares: String,
    pub buy_price: String,
    pub current_price: String,
}

impl NewInvestment {
    pub fn build(&self, id: u64) -> Result<Investment, ValidationError> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ValidationError::Missing("symbol"));
        }
        if self.shares.trim().is_empty() {
            return Err(ValidationError::Missing("shares"));
        }
        if self.buy_price.trim().is_empty() {
            return Err(ValidationError::Missing("buy price"));
        }
        let shares = parse_or_zero(&self.shares);
        if shares <= Decimal::ZERO {
            return Err(ValidationError::NotPositive {
                field: "shares",
                value: shares,
            });
        }
        let buy_price = parse_or_zero(&self.buy_price).max(Decimal::ZERO);
        let current_price = parse_money(&self.current_price)
            .filter(|p| *p > Decimal::ZERO)
            .unwrap_or(buy_price);
        Ok(Investment {
            id,
            name: self.name.trim().to_string(),
            symbol,
            shares,
            buy_price,
            current_price,
        })
    }
}

/// Raw goal form input.
#[derive(Debug, Clone, Default)]
pub struct NewGoal {
    pub name: String,
    pub target: String,
    pub current: String,
    pub category: String,
    pub monthly_contribution: String,
}

impl NewGoal {
    pub fn build(&self, id: u64) -> Result<Goal, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Missing("name"));
        }
        if self.target.trim().is_empty() {
            return Err(ValidationError::Missing("target"));
        }
        let target = parse_or_zero(&self.target);
        if target <= Decimal::ZERO {
            return Err(ValidationError::NotPositive {
                field: "target",
                value: target,
            });
        }
        let category = if self.category.trim().is_empty() {
            GoalCategory::default()
        } else {
            self.category.parse()?
        };
        Ok(Goal {
            id,
            name: name.to_string(),
            target,
            current: parse_or_zero(&self.current).max(Decimal::ZERO),
            category,
            monthly_contribution: parse_or_zero(&self.monthly_contribution).max(Decimal::ZERO),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
    }

    #[test]
    fn transaction_form_defaults_and_normalizes() {
        let draft = NewTransaction {
            kind: "Income".into(),
            category: " Salary ".into(),
            amount: "-3500".into(),
            description: "Monthly salary".into(),
            date: "".into(),
        };
        let tx = draft.build(7, today()).unwrap();
        assert_eq!(tx.id, 7);
        assert_eq!(tx.kind, TxType::Income);
        assert_eq!(tx.category, "Salary");
        assert_eq!(tx.amount, Decimal::new(3500, 0));
        assert_eq!(tx.date, today());
    }

    #[test]
    fn transaction_form_requires_category_and_amount() {
        let mut draft = NewTransaction {
            amount: "10".into(),
            ..Default::default()
        };
        assert_eq!(
            draft.build(1, today()),
            Err(ValidationError::Missing("category"))
        );
        draft.category = "Food".into();
        draft.amount = "  ".into();
        assert_eq!(
            draft.build(1, today()),
            Err(ValidationError::Missing("amount"))
        );
        draft.amount = "garbage".into();
        assert_eq!(draft.build(1, today()).unwrap().amount, Decimal::ZERO);
    }

    #[test]
    fn investment_current_price_falls_back_to_buy_price() {
        let draft = NewInvestment {
            symbol: "aapl".into(),
            name: "Apple Inc.".into(),
            shares: "10".into(),
            buy_price: "150".into(),
            current_price: "".into(),
        };
        let inv = draft.build(1).unwrap();
        assert_eq!(inv.symbol, "AAPL");
        assert_eq!(inv.current_price, Decimal::new(150, 0));
    }

    #[test]
    fn investment_rejects_non_positive_shares() {
        let draft = NewInvestment {
            symbol: "TSLA".into(),
            shares: "0".into(),
            buy_price: "200".into(),
            ..Default::default()
        };
        assert!(matches!(
            draft.build(1),
            Err(ValidationError::NotPositive { field: "shares", .. })
        ));
    }

    #[test]
    fn goal_form_rejects_zero_target_and_clamps_current() {
        let mut draft = NewGoal {
            name: "Vacation".into(),
            target: "0".into(),
            ..Default::default()
        };
        assert!(draft.build(1).is_err());
        draft.target = "5000".into();
        draft.current = "-20".into();
        let goal = draft.build(1).unwrap();
        assert_eq!(goal.current, Decimal::ZERO);
        assert_eq!(goal.category, GoalCategory::Savings);
        assert_eq!(goal.monthly_contribution, Decimal::ZERO);
    }

    #[test]
    fn goal_balance_mutations() {
        let mut goal = NewGoal {
            name: "Emergency Fund".into(),
            target: "1000".into(),
            current: "100".into(),
            ..Default::default()
        }
        .build(1)
        .unwrap();
        goal.withdraw(Decimal::new(250, 0));
        assert_eq!(goal.current, Decimal::ZERO);
        goal.contribute(Decimal::new(1200, 0));
        assert_eq!(goal.current, Decimal::new(1200, 0));
        goal.set_current(Decimal::new(-5, 0));
        assert_eq!(goal.current, Decimal::ZERO);
    }

    #[test]
    fn enum_parsing_is_case_insensitive() {
        assert_eq!("EXPENSE".parse::<TxType>().unwrap(), TxType::Expense);
        assert_eq!(
            "Lifestyle".parse::<GoalCategory>().unwrap(),
            GoalCategory::Lifestyle
        );
        assert!("refund".parse::<TxType>().is_err());
    }
}
