//! `tally target` -- change a habit's daily target.

use anyhow::Result;

use tally_core::validation::validate_habit;
use tally_storage::Storage;

use crate::cli::TargetArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `tally target` command.
pub fn run(ctx: &RuntimeContext, args: &TargetArgs) -> Result<()> {
    let project = ctx.open_project()?;
    let habit = project.require_habit(&args.habit)?;

    // Validate the habit as it would look after the change; a zero target
    // is rejected here, before anything is written.
    let mut updated = habit.clone();
    updated.daily_target = args.target;
    validate_habit(&updated)?;

    project.store.set_daily_target(&habit.id, args.target)?;

    if ctx.json {
        output_json(&serde_json::json!({ "id": habit.id, "daily_target": args.target }));
    } else if !ctx.quiet {
        println!(
            "Set daily target for {} to {}/day",
            habit.id, args.target
        );
    }
    Ok(())
}
