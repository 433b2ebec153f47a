//! `tally undo` -- remove one recorded completion.

use anyhow::Result;

use tally_storage::Storage;

use crate::cli::UndoArgs;
use crate::commands::parse_day_arg;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `tally undo` command.
///
/// Removes at most one event per call; an empty day is reported, not an
/// error.
pub fn run(ctx: &RuntimeContext, args: &UndoArgs) -> Result<()> {
    let project = ctx.open_project()?;
    let habit = project.require_habit(&args.habit)?;

    let day = parse_day_arg(args.date.as_deref())?;
    let removed = project.store.remove_completion(&habit.id, day)?;
    let progress = project.store.count_completions(&habit.id, day)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "habit": habit.id,
            "day": day.to_string(),
            "removed": removed,
            "progress": progress,
        }));
        return Ok(());
    }

    if ctx.quiet {
        return Ok(());
    }

    if removed {
        println!(
            "Removed one completion for {} on {} ({} left)",
            habit.name, day, progress
        );
    } else {
        println!("Nothing logged for {} on {}", habit.name, day);
    }
    Ok(())
}
