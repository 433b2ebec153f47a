//! `tally rename` -- rename a habit.

use anyhow::Result;

use tally_core::validation::{sanitize_name, validate_habit};
use tally_storage::Storage;

use crate::cli::RenameArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `tally rename` command.
pub fn run(ctx: &RuntimeContext, args: &RenameArgs) -> Result<()> {
    let project = ctx.open_project()?;
    let habit = project.require_habit(&args.habit)?;

    let name = sanitize_name(&args.name);

    // Validate the habit as it would look after the rename.
    let mut updated = habit.clone();
    updated.name = name.clone();
    validate_habit(&updated)?;

    project.store.rename_habit(&habit.id, &name)?;

    if ctx.json {
        output_json(&serde_json::json!({ "id": habit.id, "name": name }));
    } else if !ctx.quiet {
        println!("Renamed {}: {} -> {}", habit.id, habit.name, name);
    }
    Ok(())
}
