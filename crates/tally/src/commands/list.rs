//! `tally list` -- list habits decorated with their statistics.

use anyhow::Result;

use tally_core::day::DayKey;
use tally_core::stats::compute_stats;
use tally_storage::Storage;
use tally_ui::styles::render_habit_compact;
use tally_ui::terminal::should_use_emoji;

use crate::cli::ListArgs;
use crate::context::RuntimeContext;
use crate::output::{HabitView, output_json};

/// Execute the `tally list` command.
pub fn run(ctx: &RuntimeContext, args: &ListArgs) -> Result<()> {
    let project = ctx.open_project()?;
    let account = project.require_account(ctx)?;

    let habits = if args.all {
        project.store.list_habits(&account.id)?
    } else {
        project.store.list_active_habits(&account.id)?
    };

    let today = DayKey::today_local();
    let mut decorated = Vec::with_capacity(habits.len());
    for habit in &habits {
        let days = project.store.completion_days(&habit.id)?;
        let stats = compute_stats(habit.daily_target, days, today)?;
        decorated.push((habit, stats));
    }

    if ctx.json {
        let views: Vec<HabitView> = decorated
            .iter()
            .map(|(habit, stats)| HabitView::from_parts(habit, stats))
            .collect();
        output_json(&views);
        return Ok(());
    }

    if decorated.is_empty() {
        if !ctx.quiet {
            println!("No habits yet. Create one with 'tally add \"Drink water\"'.");
        }
        return Ok(());
    }

    let emoji = should_use_emoji();
    for (habit, stats) in &decorated {
        println!("{}", render_habit_compact(habit, stats, emoji));
    }
    Ok(())
}
