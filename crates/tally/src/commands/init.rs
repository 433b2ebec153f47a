//! `tally init` -- create a `.tally/` project in the current directory.

use std::env;
use std::fs;

use anyhow::{Context, Result, bail};

use tally_config::{TallyConfig, ensure_tally_dir, save_config};
use tally_core::idgen::id_prefix;
use tally_storage::{SqliteStore, Storage};

use crate::cli::InitArgs;
use crate::context::RuntimeContext;

/// Keeps the database (and its WAL litter) out of version control while
/// letting config.yaml be committed.
const GITIGNORE: &str = "# tally database\n*.db\n*.db-journal\n*.db-wal\n*.db-shm\n";

pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    let cwd = env::current_dir().context("failed to get current directory")?;
    let tally_dir = cwd.join(".tally");

    // Refuse to touch an existing database unless forced.
    if !args.force && tally_dir.join("tally.db").exists() {
        bail!(
            "{} is already initialized.\n\
             Run tally commands directly (try 'tally list'), or pass --force to re-initialize.",
            tally_dir.display()
        );
    }

    let prefix = args
        .prefix
        .as_deref()
        .unwrap_or(id_prefix::HABIT)
        .trim_end_matches('-')
        .to_string();

    let tally_dir = ensure_tally_dir(&cwd)?;

    let gitignore = tally_dir.join(".gitignore");
    if !gitignore.exists() {
        fs::write(&gitignore, GITIGNORE)
            .with_context(|| format!("failed to write {}", gitignore.display()))?;
    }

    if !tally_dir.join("config.yaml").exists() {
        save_config(&tally_dir, &TallyConfig::default())
            .with_context(|| format!("failed to write config.yaml in {}", tally_dir.display()))?;
    }

    let db_path = tally_dir.join("tally.db");
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to create database: {}", db_path.display()))?;
    store.set_config("habit_prefix", &prefix)?;
    store.set_config("tally_version", env!("CARGO_PKG_VERSION"))?;

    if !ctx.quiet {
        println!();
        println!("tally initialized successfully!");
        println!();
        println!("  Database: {}", db_path.display());
        println!("  Habit prefix: {}", prefix);
        println!();
        println!("Next steps:");
        println!("  tally user add <email>      create your account");
        println!("  tally add \"Drink water\"     create your first habit");
        println!();
    }

    Ok(())
}
