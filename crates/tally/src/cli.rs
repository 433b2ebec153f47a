//! The `tally` argument grammar, as clap 4 derive types.
//!
//! Doc comments here double as `--help` text.

use clap::{Args, Parser, Subcommand};

/// tally -- Daily habit tracker.
///
/// A small set of habits, a daily target for each, and the streaks and
/// weekly consistency that fall out of actually doing them.
#[derive(Parser, Debug)]
#[command(
    name = "tally",
    about = "Daily habit tracker",
    long_about = "A small set of habits, a daily target for each, and the streaks and weekly consistency that fall out of actually doing them.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags accepted by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Database directory (default: auto-discover .tally/).
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Account email (default: $TALLY_USER, then default-user from config).
    #[arg(long, global = true, env = "TALLY_USER")]
    pub user: Option<String>,

    /// Emit JSON instead of human-readable output.
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging on stderr.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Print errors only.
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    // ===== Working With Habits =====
    /// Create a new habit.
    #[command(alias = "new")]
    Add(AddArgs),

    /// List habits with their statistics.
    List(ListArgs),

    /// Record a completion for a habit.
    #[command(alias = "done")]
    Log(LogArgs),

    /// Remove one recorded completion.
    Undo(UndoArgs),

    /// Rename a habit.
    Rename(RenameArgs),

    /// Change a habit's daily target.
    Target(TargetArgs),

    /// Archive a habit (its history is kept).
    Archive(ArchiveArgs),

    /// Restore an archived habit.
    Restore(RestoreArgs),

    // ===== Views & Reports =====
    /// Show the statistics dashboard.
    Stats(StatsArgs),

    // ===== Accounts =====
    /// Manage accounts.
    #[command(subcommand)]
    User(UserCommands),

    // ===== Setup & Configuration =====
    /// Initialize tally in the current directory.
    Init(InitArgs),

    /// Generate shell completion scripts.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

/// Arguments for `tally add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Habit name.
    pub name: String,

    /// Completions required per day (default from config, usually 1).
    #[arg(short = 't', long)]
    pub target: Option<u32>,

    /// Emoji shown next to the name (default: suggested from the name).
    #[arg(short = 'e', long)]
    pub emoji: Option<String>,
}

/// Arguments for `tally list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Include archived habits.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for `tally log`.
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Habit ID.
    pub habit: String,

    /// Day to log (YYYY-MM-DD, default: today).
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for `tally undo`.
#[derive(Args, Debug)]
pub struct UndoArgs {
    /// Habit ID.
    pub habit: String,

    /// Day to undo (YYYY-MM-DD, default: today).
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for `tally rename`.
#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Habit ID.
    pub habit: String,

    /// New name.
    pub name: String,
}

/// Arguments for `tally target`.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Habit ID.
    pub habit: String,

    /// New daily target (at least 1).
    pub target: u32,
}

/// Arguments for `tally archive`.
#[derive(Args, Debug)]
pub struct ArchiveArgs {
    /// Habit ID.
    pub habit: String,
}

/// Arguments for `tally restore`.
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Habit ID.
    pub habit: String,
}

/// Arguments for `tally stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Compute statistics as of this day (YYYY-MM-DD, default: today).
    #[arg(long)]
    pub date: Option<String>,
}

/// Account subcommands.
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create an account.
    Add {
        /// Email address identifying the account.
        email: String,
    },

    /// List accounts.
    List,

    /// Select the default account for future commands.
    Use {
        /// Email address of an existing account.
        email: String,
    },
}

/// Arguments for `tally init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Habit ID prefix (default: "hb").
    #[arg(long)]
    pub prefix: Option<String>,

    /// Re-initialize even if a database already exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `tally completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Target shell.
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
