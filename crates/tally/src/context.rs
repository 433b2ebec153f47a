//! Per-invocation state shared by all command handlers.
//!
//! [`RuntimeContext`] carries the parsed global flags; for commands that
//! touch data, [`RuntimeContext::open_project`] resolves the `.tally/`
//! directory, loads its config, and opens the store as one [`Project`]
//! bundle.

use std::env;
use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};

use tally_config::{TallyConfig, find_tally_dir, load_config};
use tally_core::user::User;
use tally_storage::{SqliteStore, Storage, StorageError};

use crate::cli::GlobalArgs;

/// The global flags, normalized. Built once in `main` before dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit database directory from `--db`, if any.
    pub db_dir: Option<PathBuf>,

    /// Account email from `--user` / `TALLY_USER`, if any.
    pub user: Option<String>,

    pub json: bool,
    pub verbose: bool,
    pub quiet: bool,
}

/// A resolved project: the metadata directory, its configuration, and an
/// open store.
pub struct Project {
    pub tally_dir: PathBuf,
    pub config: TallyConfig,
    pub store: SqliteStore,
}

impl RuntimeContext {
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        Self {
            db_dir: global.db.as_ref().map(PathBuf::from),
            user: global.user.clone(),
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Returns the resolved `.tally/` directory.
    ///
    /// Priority: `--db` flag, then `TALLY_DIR` env / upward walk from the
    /// current directory.
    pub fn resolve_tally_dir(&self) -> Option<PathBuf> {
        if let Some(ref p) = self.db_dir {
            return Some(p.clone());
        }
        let cwd = env::current_dir().ok()?;
        find_tally_dir(&cwd)
    }

    /// Resolves the directory, loads its config, and opens the database.
    ///
    /// Fails with a hint toward `tally init` when there is no project.
    pub fn open_project(&self) -> Result<Project> {
        let tally_dir = self
            .resolve_tally_dir()
            .context("no tally database found. Run 'tally init' to create one.")?;

        let db_path = tally_dir.join("tally.db");
        if !db_path.exists() {
            bail!(
                "no tally database found at {}\nHint: run 'tally init' to create one",
                db_path.display()
            );
        }

        tracing::debug!(dir = %tally_dir.display(), "opening project");
        let config = load_config(&tally_dir)
            .with_context(|| format!("failed to load config from {}", tally_dir.display()))?;
        let store = SqliteStore::open(&db_path)
            .with_context(|| format!("failed to open database: {}", db_path.display()))?;

        Ok(Project {
            tally_dir,
            config,
            store,
        })
    }

    /// Resolves the account email.
    ///
    /// Priority: `--user` flag > `TALLY_USER` env (both land in
    /// `self.user` via clap) > `default-user` from config.yaml.
    pub fn resolve_account_email(&self, config: &TallyConfig) -> Result<String> {
        if let Some(ref email) = self.user {
            if !email.is_empty() {
                return Ok(email.clone());
            }
        }
        if let Some(ref email) = config.default_user {
            if !email.is_empty() {
                return Ok(email.clone());
            }
        }
        bail!(
            "no account selected\nHint: pass --user <email> or run 'tally user use <email>'"
        );
    }
}

impl Project {
    /// The configured active-habit cap.
    pub fn max_active(&self) -> u32 {
        self.config.limits.max_active_habits
    }

    /// The habit ID prefix: config.yaml override, then the prefix stored in
    /// the database at init time, then `"hb"`.
    pub fn habit_prefix(&self) -> String {
        if let Some(ref prefix) = self.config.prefix {
            return prefix.clone();
        }
        self.store
            .get_config("habit_prefix")
            .unwrap_or_else(|_| tally_core::idgen::id_prefix::HABIT.to_string())
    }

    /// Resolves the selected account to a stored user record.
    pub fn require_account(&self, ctx: &RuntimeContext) -> Result<User> {
        let email = ctx.resolve_account_email(&self.config)?;
        match self.store.find_user_by_email(&email) {
            Ok(user) => Ok(user),
            Err(e) if e.is_not_found() => bail!(
                "no account with email {email}\nHint: run 'tally user add {email}' to create it"
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads a habit by ID, mapping storage errors to friendly messages.
    pub fn require_habit(&self, id: &str) -> Result<tally_core::habit::Habit> {
        match self.store.get_habit(id) {
            Ok(habit) => Ok(habit),
            Err(StorageError::NotFound { .. }) => {
                bail!("habit not found: {id}\nHint: 'tally list' shows habit IDs")
            }
            Err(e) => Err(e.into()),
        }
    }
}
