//! `tally log` -- record a completion event.

use anyhow::{Result, bail};

use tally_storage::Storage;

use crate::cli::LogArgs;
use crate::commands::parse_day_arg;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `tally log` command.
pub fn run(ctx: &RuntimeContext, args: &LogArgs) -> Result<()> {
    let project = ctx.open_project()?;
    let habit = project.require_habit(&args.habit)?;

    if !habit.is_active() {
        bail!(
            "habit {} is archived\nHint: 'tally restore {}' brings it back",
            habit.id,
            habit.id
        );
    }

    let day = parse_day_arg(args.date.as_deref())?;
    let recorded = project.store.record_completion(&habit.id, day)?;
    let progress = project.store.count_completions(&habit.id, day)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "habit": habit.id,
            "day": day.to_string(),
            "recorded": recorded,
            "progress": progress,
            "daily_target": habit.daily_target,
        }));
        return Ok(());
    }

    if ctx.quiet {
        return Ok(());
    }

    if !recorded {
        println!(
            "Target already met for {} on {} ({}/{}); nothing logged",
            habit.name, day, progress, habit.daily_target
        );
    } else if progress >= habit.daily_target {
        println!(
            "Logged {}: {}/{} -- target met",
            habit.name, progress, habit.daily_target
        );
    } else {
        println!("Logged {}: {}/{}", habit.name, progress, habit.daily_target);
    }
    Ok(())
}
