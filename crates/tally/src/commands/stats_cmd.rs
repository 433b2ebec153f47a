//! `tally stats` -- the statistics dashboard.
//!
//! Per-habit statistics plus two aggregates across active habits: the
//! average weekly consistency and the completed-today ratio.

use anyhow::Result;

use tally_core::stats::compute_stats;
use tally_storage::Storage;
use tally_ui::styles::render_consistency;

use crate::cli::StatsArgs;
use crate::commands::parse_day_arg;
use crate::context::RuntimeContext;
use crate::output::{HabitView, output_json, output_table};

/// Execute the `tally stats` command.
pub fn run(ctx: &RuntimeContext, args: &StatsArgs) -> Result<()> {
    let project = ctx.open_project()?;
    let account = project.require_account(ctx)?;

    let today = parse_day_arg(args.date.as_deref())?;
    let habits = project.store.list_active_habits(&account.id)?;

    let mut views = Vec::with_capacity(habits.len());
    let mut rows = Vec::with_capacity(habits.len());
    let mut consistency_sum: u32 = 0;
    let mut completed_today = 0usize;

    for habit in &habits {
        let days = project.store.completion_days(&habit.id)?;
        let stats = compute_stats(habit.daily_target, days, today)?;

        consistency_sum += u32::from(stats.weekly_consistency);
        if stats.completed_today {
            completed_today += 1;
        }

        rows.push(vec![
            habit.id.clone(),
            habit.name.clone(),
            format!("{}/{}", stats.today_progress, habit.daily_target),
            format!("{}", stats.streak),
            format!("{}%", stats.weekly_consistency),
        ]);
        views.push(HabitView::from_parts(habit, &stats));
    }

    // Average of per-habit weekly consistency, rounded like the per-habit
    // figure.
    let avg_consistency: u8 = if habits.is_empty() {
        0
    } else {
        let n = habits.len() as u32;
        ((consistency_sum + n / 2) / n) as u8
    };

    if ctx.json {
        output_json(&serde_json::json!({
            "as_of": today.to_string(),
            "active_habits": habits.len(),
            "completed_today": completed_today,
            "weekly_consistency": avg_consistency,
            "habits": views,
        }));
        return Ok(());
    }

    println!("Habit Statistics ({})", today);
    println!("=============================");

    if habits.is_empty() {
        println!();
        println!("No active habits.");
        return Ok(());
    }

    println!();
    let headers = &["ID", "HABIT", "TODAY", "STREAK", "WEEK"];
    output_table(headers, &rows);

    println!();
    println!(
        "Weekly consistency: {}",
        render_consistency(avg_consistency)
    );
    println!(
        "Completed today:    {}/{}",
        completed_today,
        habits.len()
    );

    Ok(())
}
