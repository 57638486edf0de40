// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over the three record collections. Nothing in here
//! mutates its inputs, keeps state between calls, or performs I/O.

pub mod cashflow;
pub mod goals;
pub mod portfolio;

pub use cashflow::{
    CategoryTotal, DEFAULT_EXPENSE_CATEGORIES, MonthlyTotals, category_breakdown, monthly_series,
    net_worth, recent_transactions, total_by_type,
};
pub use goals::{
    GoalError, GoalOverview, GoalProgress, GoalProjection, ProgressBand, ProjectionPoint,
    goal_progress, goals_overview, monthly_projection_series, months_to_goal,
    projected_completion_date,
};
pub use portfolio::{
    PortfolioSummary, cost_basis, holding_gain_loss, holding_return_percent, portfolio_gain_loss,
    portfolio_return_percent, portfolio_summary, portfolio_value,
};
