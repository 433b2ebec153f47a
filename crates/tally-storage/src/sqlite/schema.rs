//! DDL statements and migrations for the SQLite schema.
//!
//! Timestamps are stored as TEXT in ISO 8601 format (SQLite has no native
//! datetime type). Calendar days are TEXT in `YYYY-MM-DD`, which sorts
//! lexically in date order.

/// Current schema version. Bumped whenever DDL or migrations change.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Core DDL statements executed during `init_schema`.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    // -- Users table ---------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id         TEXT PRIMARY KEY,
        email      TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )
    "#,
    // -- Habits table --------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS habits (
        id           TEXT PRIMARY KEY,
        owner_id     TEXT NOT NULL,
        name         TEXT NOT NULL,
        emoji        TEXT NOT NULL DEFAULT '',
        daily_target INTEGER NOT NULL DEFAULT 1,
        lifecycle    TEXT NOT NULL DEFAULT 'active',
        created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
        updated_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
        archived_at  TEXT,
        FOREIGN KEY (owner_id) REFERENCES users(id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_habits_owner ON habits(owner_id)",
    "CREATE INDEX IF NOT EXISTS idx_habits_owner_lifecycle ON habits(owner_id, lifecycle)",
    "CREATE INDEX IF NOT EXISTS idx_habits_created_at ON habits(created_at)",
    // -- Completions table (append-only ledger) ------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS completions (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        habit_id    TEXT NOT NULL,
        day         TEXT NOT NULL,
        recorded_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
        FOREIGN KEY (habit_id) REFERENCES habits(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_completions_habit ON completions(habit_id)",
    "CREATE INDEX IF NOT EXISTS idx_completions_habit_day ON completions(habit_id, day)",
    // -- Config table --------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS config (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
    "#,
    // -- Metadata table (migration bookkeeping etc.) -------------------------
    r#"
    CREATE TABLE IF NOT EXISTS metadata (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
    "#,
];

/// Default config rows inserted once at schema init (`INSERT OR IGNORE`).
pub const DEFAULT_CONFIG: &[(&str, &str)] = &[("habit_prefix", "hb")];

/// Named migrations applied after the DDL, tracked in the `metadata` table.
/// None yet at schema version 1.
pub const MIGRATIONS: &[(&str, &str)] = &[];
