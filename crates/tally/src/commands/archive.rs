//! `tally archive` / `tally restore` -- habit lifecycle flips.
//!
//! Archival is a soft delete: the completion ledger is retained, and a
//! restored habit picks its statistics back up from the full history.

use anyhow::{Result, bail};

use tally_storage::{Storage, StorageError};

use crate::cli::{ArchiveArgs, RestoreArgs};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `tally archive` command.
pub fn run_archive(ctx: &RuntimeContext, args: &ArchiveArgs) -> Result<()> {
    let project = ctx.open_project()?;
    let habit = project.require_habit(&args.habit)?;

    project.store.archive_habit(&habit.id)?;

    if ctx.json {
        output_json(&serde_json::json!({ "id": habit.id, "lifecycle": "archived" }));
    } else if !ctx.quiet {
        println!(
            "Archived {} ({}). History kept; 'tally restore {}' brings it back.",
            habit.id, habit.name, habit.id
        );
    }
    Ok(())
}

/// Execute the `tally restore` command.
pub fn run_restore(ctx: &RuntimeContext, args: &RestoreArgs) -> Result<()> {
    let project = ctx.open_project()?;
    let habit = project.require_habit(&args.habit)?;

    match project.store.restore_habit(&habit.id, project.max_active()) {
        Err(StorageError::ActiveHabitLimit { max }) => bail!(
            "active habit limit reached (max {max})\nHint: archive another habit first"
        ),
        other => other?,
    }

    if ctx.json {
        output_json(&serde_json::json!({ "id": habit.id, "lifecycle": "active" }));
    } else if !ctx.quiet {
        println!("Restored {} ({})", habit.id, habit.name);
    }
    Ok(())
}
