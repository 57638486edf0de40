// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::engine::{self, CategoryTotal, MonthlyTotals, PortfolioSummary};
use crate::models::{
    Goal, Investment, NewGoal, NewInvestment, NewTransaction, Transaction, TxType,
    ValidationError,
};

/// The three collections the presentation layer works on. Records enter only
/// through the validating `New*` drafts; every figure is recomputed from the
/// current contents on request.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub transactions: Vec<Transaction>,
    pub investments: Vec<Investment>,
    pub goals: Vec<Goal>,
}

fn next_id<T>(items: &[T], id: impl Fn(&T) -> u64) -> u64 {
    items.iter().map(id).max().unwrap_or(0) + 1
}

impl Dashboard {
    pub fn new(
        transactions: Vec<Transaction>,
        investments: Vec<Investment>,
        goals: Vec<Goal>,
    ) -> Self {
        Self {
            transactions,
            investments,
            goals,
        }
    }

    pub fn next_transaction_id(&self) -> u64 {
        next_id(&self.transactions, |t| t.id)
    }

    pub fn next_investment_id(&self) -> u64 {
        next_id(&self.investments, |i| i.id)
    }

    pub fn next_goal_id(&self) -> u64 {
        next_id(&self.goals, |g| g.id)
    }

    pub fn add_transaction(
        &mut self,
        draft: &NewTransaction,
        today: NaiveDate,
    ) -> Result<&Transaction, ValidationError> {
        let tx = draft.build(self.next_transaction_id(), today)?;
        self.transactions.push(tx);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Imported records get fresh ids after the existing ones.
    pub fn extend_transactions(&mut self, imported: Vec<Transaction>) {
        let mut id = self.next_transaction_id();
        for mut tx in imported {
            tx.id = id;
            id += 1;
            self.transactions.push(tx);
        }
    }

    pub fn add_investment(&mut self, draft: &NewInvestment) -> Result<&Investment, ValidationError> {
        let inv = draft.build(self.next_investment_id())?;
        self.investments.push(inv);
        Ok(&self.investments[self.investments.len() - 1])
    }

    pub fn push_investment(&mut self, mut investment: Investment) -> u64 {
        investment.id = self.next_investment_id();
        let id = investment.id;
        self.investments.push(investment);
        id
    }

    pub fn extend_investments(&mut self, imported: Vec<Investment>) {
        for inv in imported {
            self.push_investment(inv);
        }
    }

    pub fn add_goal(&mut self, draft: &NewGoal) -> Result<&Goal, ValidationError> {
        let goal = draft.build(self.next_goal_id())?;
        self.goals.push(goal);
        Ok(&self.goals[self.goals.len() - 1])
    }

    pub fn remove_transaction(&mut self, id: u64) -> Option<Transaction> {
        let pos = self.transactions.iter().position(|t| t.id == id)?;
        Some(self.transactions.remove(pos))
    }

    pub fn remove_investment(&mut self, id: u64) -> Option<Investment> {
        let pos = self.investments.iter().position(|i| i.id == id)?;
        Some(self.investments.remove(pos))
    }

    pub fn remove_goal(&mut self, id: u64) -> Option<Goal> {
        let pos = self.goals.iter().position(|g| g.id == id)?;
        Some(self.goals.remove(pos))
    }

    pub fn goal_mut(&mut self, id: u64) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|g| g.id == id)
    }

    pub fn total_income(&self) -> Decimal {
        engine::total_by_type(&self.transactions, TxType::Income)
    }

    pub fn total_expenses(&self) -> Decimal {
        engine::total_by_type(&self.transactions, TxType::Expense)
    }

    pub fn net_worth(&self) -> Decimal {
        engine::net_worth(&self.transactions, &self.investments)
    }

    pub fn portfolio(&self) -> PortfolioSummary {
        engine::portfolio_summary(&self.investments)
    }

    pub fn monthly_series(&self, months: usize, reference: NaiveDate) -> Vec<MonthlyTotals> {
        engine::monthly_series(&self.transactions, months, reference)
    }

    pub fn category_breakdown<S: AsRef<str>>(&self, categories: &[S]) -> Vec<CategoryTotal> {
        engine::category_breakdown(&self.transactions, categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
    }

    fn expense(category: &str, amount: &str) -> NewTransaction {
        NewTransaction {
            kind: "expense".into(),
            category: category.into(),
            amount: amount.into(),
            ..Default::default()
        }
    }

    #[test]
    fn ids_follow_the_highest_existing_id() {
        let mut d = Dashboard::default();
        assert_eq!(d.add_transaction(&expense("Food", "10"), today()).unwrap().id, 1);
        assert_eq!(d.add_transaction(&expense("Food", "5"), today()).unwrap().id, 2);
        d.remove_transaction(1).unwrap();
        assert_eq!(d.add_transaction(&expense("Gas", "7"), today()).unwrap().id, 3);
        assert!(d.remove_transaction(99).is_none());
    }

    #[test]
    fn invalid_drafts_leave_state_untouched() {
        let mut d = Dashboard::default();
        assert!(d.add_transaction(&expense("", "10"), today()).is_err());
        assert!(d.transactions.is_empty());
    }

    #[test]
    fn net_worth_blends_cash_flow_and_holdings() {
        let mut d = Dashboard::default();
        d.add_transaction(
            &NewTransaction {
                kind: "income".into(),
                category: "Salary".into(),
                amount: "3500".into(),
                ..Default::default()
            },
            today(),
        )
        .unwrap();
        d.add_transaction(&expense("Food", "450"), today()).unwrap();
        d.add_investment(&NewInvestment {
            symbol: "AAPL".into(),
            shares: "10".into(),
            buy_price: "150".into(),
            current_price: "175".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            d.net_worth(),
            d.total_income() - d.total_expenses() + d.portfolio().value
        );
        assert_eq!(d.net_worth(), Decimal::new(4800, 0));
    }
}
