// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dashboard::Dashboard;
use crate::engine::{
    goal_progress, monthly_projection_series, months_to_goal, projected_completion_date,
};
use crate::ledger::{load_goals, save_goals};
use crate::models::{Goal, NewGoal};
use crate::utils::{date_or_today, fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;
use tracing::info;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(sub)?,
        Some(("list", sub)) => list(sub)?,
        Some(("rm", sub)) => rm(sub)?,
        Some(("contribute", sub)) => adjust(sub, Adjustment::Contribute)?,
        Some(("withdraw", sub)) => adjust(sub, Adjustment::Withdraw)?,
        Some(("set", sub)) => adjust(sub, Adjustment::Set)?,
        Some(("project", sub)) => project(sub)?,
        _ => {}
    }
    Ok(())
}

fn goals_path(sub: &clap::ArgMatches) -> &Path {
    Path::new(sub.get_one::<String>("file").unwrap().trim())
}

fn load(path: &Path) -> Result<Dashboard> {
    Ok(Dashboard {
        goals: load_goals(path)?,
        ..Default::default()
    })
}

fn add(sub: &clap::ArgMatches) -> Result<()> {
    let path = goals_path(sub);
    let text = |id: &str| sub.get_one::<String>(id).cloned().unwrap_or_default();
    let draft = NewGoal {
        name: text("name"),
        target: text("target"),
        current: text("current"),
        category: text("category"),
        monthly_contribution: text("monthly"),
    };
    let mut dash = load(path)?;
    let goal = dash.add_goal(&draft)?.clone();
    save_goals(path, &dash.goals)?;
    info!(id = goal.id, path = %path.display(), "goal added");
    println!(
        "Added goal #{} {} ({}): {} of {}",
        goal.id,
        goal.name,
        goal.category,
        fmt_money(&goal.current),
        fmt_money(&goal.target)
    );
    Ok(())
}

#[derive(Serialize)]
pub struct GoalRow {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub current: String,
    pub target: String,
    pub progress_percent: String,
    pub remaining: String,
    pub status: String,
    pub months_to_goal: Option<u32>,
    pub projected_completion: Option<NaiveDate>,
}

pub fn goal_rows(goals: &[Goal], as_of: NaiveDate) -> Result<Vec<GoalRow>> {
    goals
        .iter()
        .map(|g| {
            let progress = goal_progress(g)?;
            Ok(GoalRow {
                id: g.id,
                name: g.name.clone(),
                category: g.category.to_string(),
                current: fmt_money(&g.current),
                target: fmt_money(&g.target),
                progress_percent: fmt_money(&progress.percent),
                remaining: fmt_money(&progress.remaining.max(Decimal::ZERO)),
                status: progress.band.message().to_string(),
                months_to_goal: months_to_goal(g),
                projected_completion: projected_completion_date(g, as_of),
            })
        })
        .collect()
}

fn list(sub: &clap::ArgMatches) -> Result<()> {
    let goals = load_goals(goals_path(sub))?;
    let as_of = date_or_today(sub.get_one::<String>("as_of"))?;
    let data = goal_rows(&goals, as_of)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows = data
        .into_iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.name,
                r.category,
                format!("{} / {}", r.current, r.target),
                format!("{}%", r.progress_percent),
                r.remaining,
                r.status,
                r.projected_completion
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Goal", "Category", "Saved", "Progress", "Remaining", "Status", "ETA"],
            rows,
        )
    );
    Ok(())
}

fn rm(sub: &clap::ArgMatches) -> Result<()> {
    let path = goals_path(sub);
    let id = *sub.get_one::<u64>("id").unwrap();
    let mut dash = load(path)?;
    let removed = dash
        .remove_goal(id)
        .ok_or_else(|| anyhow!("Goal #{} not found in {}", id, path.display()))?;
    save_goals(path, &dash.goals)?;
    println!("Removed goal #{} ({})", id, removed.name);
    Ok(())
}

#[derive(Clone, Copy)]
enum Adjustment {
    Contribute,
    Withdraw,
    Set,
}

fn adjust(sub: &clap::ArgMatches, how: Adjustment) -> Result<()> {
    let path = goals_path(sub);
    let id = *sub.get_one::<u64>("id").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if amount < Decimal::ZERO {
        return Err(anyhow!("Amount must not be negative, got {}", amount));
    }

    let mut dash = load(path)?;
    let goal = dash
        .goal_mut(id)
        .ok_or_else(|| anyhow!("Goal #{} not found in {}", id, path.display()))?;
    match how {
        Adjustment::Contribute => goal.contribute(amount),
        Adjustment::Withdraw => goal.withdraw(amount),
        Adjustment::Set => goal.set_current(amount),
    }
    let (name, current, target) = (goal.name.clone(), goal.current, goal.target);
    save_goals(path, &dash.goals)?;
    println!(
        "{}: {} of {}",
        name,
        fmt_money(&current),
        fmt_money(&target)
    );
    Ok(())
}

fn project(sub: &clap::ArgMatches) -> Result<()> {
    let goals = load_goals(goals_path(sub))?;
    let months = *sub.get_one::<usize>("months").unwrap();
    let as_of = date_or_today(sub.get_one::<String>("as_of"))?;
    let series = monthly_projection_series(&goals, months, as_of);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        return Ok(());
    }

    let Some(first) = series.first() else {
        return Ok(());
    };
    if first.goals.is_empty() {
        println!("No goals have a monthly contribution to project.");
        return Ok(());
    }
    let mut headers = vec!["Month"];
    headers.extend(first.goals.iter().map(|g| g.name.as_str()));
    let rows = series
        .iter()
        .map(|p| {
            let mut row = vec![format!("{} {}", p.label, &p.month[..4])];
            row.extend(p.goals.iter().map(|g| fmt_money(&g.projected)));
            row
        })
        .collect();
    println!("{}", pretty_table(&headers, rows));
    Ok(())
}
