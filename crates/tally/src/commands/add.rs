//! `tally add` -- create a new habit.

use anyhow::{Result, bail};
use chrono::Utc;

use tally_core::emoji::suggest_emoji;
use tally_core::habit::HabitBuilder;
use tally_core::idgen;
use tally_core::validation::{sanitize_name, validate_habit};
use tally_storage::{Storage, StorageError};

use crate::cli::AddArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `tally add` command.
pub fn run(ctx: &RuntimeContext, args: &AddArgs) -> Result<()> {
    let project = ctx.open_project()?;
    let account = project.require_account(ctx)?;

    let name = sanitize_name(&args.name);
    let daily_target = args
        .target
        .unwrap_or(project.config.habit_defaults.daily_target);
    let emoji = match args.emoji.as_deref().map(str::trim) {
        Some(e) if !e.is_empty() => e.to_string(),
        _ => suggest_emoji(&name).to_string(),
    };

    let prefix = project.habit_prefix();
    let now = Utc::now();

    // Try up to 10 nonces to avoid ID collisions
    let mut id = String::new();
    for nonce in 0..10 {
        let seed = format!("{}|{}", name, account.id);
        let candidate = idgen::generate_id(&prefix, &seed, now, nonce);
        match project.store.get_habit(&candidate) {
            Err(e) if e.is_not_found() => {
                id = candidate;
                break;
            }
            Ok(_) => continue,
            Err(e) => return Err(e.into()),
        }
    }
    if id.is_empty() {
        bail!("failed to generate unique ID after 10 attempts");
    }

    let habit = HabitBuilder::new(name)
        .id(id)
        .owner_id(account.id.as_str())
        .emoji(emoji)
        .daily_target(daily_target)
        .created_at(now)
        .updated_at(now)
        .build();

    validate_habit(&habit)?;

    match project.store.create_habit(&habit, project.max_active()) {
        Err(StorageError::ActiveHabitLimit { max }) => bail!(
            "active habit limit reached (max {max})\nHint: archive one first with 'tally archive <id>'"
        ),
        other => other?,
    }

    if ctx.json {
        output_json(&habit);
    } else if !ctx.quiet {
        println!(
            "Created habit {}: {} (target {}/day)",
            habit.id, habit.name, habit.daily_target
        );
    }
    Ok(())
}
