// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use thiserror::Error;

use crate::models::Goal;
use crate::utils::{add_months, month_index, month_key, month_label};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GoalError {
    #[error("Goal '{name}' has non-positive target {target}")]
    NonPositiveTarget { name: String, target: Decimal },
}

/// Progress bands, evaluated from the highest threshold down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBand {
    Achieved,
    Almost,
    Halfway,
    Good,
    Starting,
}

impl ProgressBand {
    pub fn from_percent(percent: Decimal) -> Self {
        if percent >= Decimal::ONE_HUNDRED {
            ProgressBand::Achieved
        } else if percent >= Decimal::from(75) {
            ProgressBand::Almost
        } else if percent >= Decimal::from(50) {
            ProgressBand::Halfway
        } else if percent >= Decimal::from(25) {
            ProgressBand::Good
        } else {
            ProgressBand::Starting
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressBand::Achieved => "achieved",
            ProgressBand::Almost => "almost",
            ProgressBand::Halfway => "halfway",
            ProgressBand::Good => "good",
            ProgressBand::Starting => "starting",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ProgressBand::Achieved => "Goal achieved!",
            ProgressBand::Almost => "Almost there!",
            ProgressBand::Halfway => "Halfway to goal",
            ProgressBand::Good => "Good progress",
            ProgressBand::Starting => "Just getting started",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub percent: Decimal,
    pub remaining: Decimal, // negative when over-funded
    pub band: ProgressBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalOverview {
    pub goal_id: u64,
    pub name: String,
    pub progress_percent: Decimal,
    pub remaining_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProjection {
    pub goal_id: u64,
    pub name: String,
    pub projected: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub month: String,
    pub label: String,
    pub goals: Vec<GoalProjection>,
}

pub fn goal_progress(goal: &Goal) -> Result<GoalProgress, GoalError> {
    if goal.target <= Decimal::ZERO {
        return Err(GoalError::NonPositiveTarget {
            name: goal.name.clone(),
            target: goal.target,
        });
    }
    let percent = goal.current / goal.target * Decimal::ONE_HUNDRED;
    Ok(GoalProgress {
        percent,
        remaining: goal.target - goal.current,
        band: ProgressBand::from_percent(percent),
    })
}

/// `None` when nothing is contributed monthly, so no projection exists.
pub fn months_to_goal(goal: &Goal) -> Option<u32> {
    if goal.monthly_contribution <= Decimal::ZERO {
        return None;
    }
    let remaining = goal.target - goal.current;
    if remaining <= Decimal::ZERO {
        return Some(0);
    }
    let months = (remaining / goal.monthly_contribution).ceil();
    Some(months.to_u32().unwrap_or(u32::MAX))
}

pub fn projected_completion_date(goal: &Goal, as_of: NaiveDate) -> Option<NaiveDate> {
    add_months(as_of, months_to_goal(goal)?)
}

/// Bar-chart data for the goals tab. Goals with a non-positive target report
/// zero for both figures.
pub fn goals_overview(goals: &[Goal]) -> Vec<GoalOverview> {
    goals
        .iter()
        .map(|g| {
            let (progress_percent, remaining_percent) = if g.target > Decimal::ZERO {
                (
                    g.current / g.target * Decimal::ONE_HUNDRED,
                    (g.target - g.current) / g.target * Decimal::ONE_HUNDRED,
                )
            } else {
                (Decimal::ZERO, Decimal::ZERO)
            };
            GoalOverview {
                goal_id: g.id,
                name: g.name.clone(),
                progress_percent,
                remaining_percent,
            }
        })
        .collect()
}

/// Linear contribution forecast for every goal with a monthly contribution.
/// The first point is the month of `as_of` and already includes one
/// contribution. Projected balances stop at the target.
pub fn monthly_projection_series(
    goals: &[Goal],
    horizon_months: usize,
    as_of: NaiveDate,
) -> Vec<ProjectionPoint> {
    let start = month_index(as_of);
    let funded: Vec<&Goal> = goals
        .iter()
        .filter(|g| g.monthly_contribution > Decimal::ZERO)
        .collect();

    (0..horizon_months)
        .map(|i| {
            let idx = start + i as i64;
            let steps = Decimal::from(i as u64 + 1);
            let goals = funded
                .iter()
                .map(|g| GoalProjection {
                    goal_id: g.id,
                    name: g.name.clone(),
                    projected: (g.current + g.monthly_contribution * steps).min(g.target),
                })
                .collect();
            ProjectionPoint {
                month: month_key(idx),
                label: month_label(idx).to_string(),
                goals,
            }
        })
        .collect()
}
