// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Investment;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub value: Decimal,
    pub gain_loss: Decimal,
    pub cost_basis: Decimal,
    pub return_percent: Decimal,
}

pub fn portfolio_value(investments: &[Investment]) -> Decimal {
    investments.iter().map(|i| i.shares * i.current_price).sum()
}

pub fn portfolio_gain_loss(investments: &[Investment]) -> Decimal {
    investments.iter().map(holding_gain_loss).sum()
}

/// What was paid for the shares still held: value minus gain/loss.
pub fn cost_basis(investments: &[Investment]) -> Decimal {
    portfolio_value(investments) - portfolio_gain_loss(investments)
}

/// Gain/loss as a percentage of cost basis. Zero when the portfolio is worth
/// nothing or when the cost basis is zero.
pub fn portfolio_return_percent(investments: &[Investment]) -> Decimal {
    let value = portfolio_value(investments);
    if value.is_zero() {
        return Decimal::ZERO;
    }
    let gain = portfolio_gain_loss(investments);
    let basis = value - gain;
    if basis.is_zero() {
        return Decimal::ZERO;
    }
    gain / basis * Decimal::ONE_HUNDRED
}

pub fn portfolio_summary(investments: &[Investment]) -> PortfolioSummary {
    let value = portfolio_value(investments);
    let gain_loss = portfolio_gain_loss(investments);
    PortfolioSummary {
        value,
        gain_loss,
        cost_basis: value - gain_loss,
        return_percent: portfolio_return_percent(investments),
    }
}

pub fn holding_gain_loss(investment: &Investment) -> Decimal {
    investment.shares * (investment.current_price - investment.buy_price)
}

/// Price move relative to the buy price; zero for shares bought at zero.
pub fn holding_return_percent(investment: &Investment) -> Decimal {
    if investment.buy_price.is_zero() {
        return Decimal::ZERO;
    }
    (investment.current_price - investment.buy_price) / investment.buy_price
        * Decimal::ONE_HUNDRED
}
