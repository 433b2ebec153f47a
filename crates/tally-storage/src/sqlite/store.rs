//! [`SqliteStore`] -- the SQLite-backed store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{Result, StorageError};
use crate::sqlite::schema;

/// SQLite implementation of [`Storage`](crate::traits::Storage).
///
/// A single connection behind a `Mutex`: every operation locks, runs its
/// SQL, and unlocks. The capped completion append and the active-habit cap
/// check additionally wrap their statements in a transaction, since their
/// correctness depends on the read and the write being atomic.
pub struct SqliteStore {
    pub(crate) conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (creating if necessary) the database file at `path` and brings
    /// its schema up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(?path, "opening SQLite database");
        let conn = Connection::open(path).map_err(|e| {
            StorageError::Connection(format!("cannot open {}: {e}", path.display()))
        })?;
        Self::from_connection(conn)
    }

    /// Opens a fresh in-memory database. Test use.
    pub fn open_in_memory() -> Result<Self> {
        debug!("opening in-memory SQLite database");
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("cannot open in-memory db: {e}")))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // WAL keeps concurrent readers cheap; the busy timeout covers
        // cross-process contention on the same file.
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(|e| StorageError::Connection(format!("pragma setup failed: {e}")))?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Creates missing tables, seeds default config, and applies pending
    /// migrations. Skipped entirely when the stored schema version is
    /// already current.
    fn ensure_schema(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        if stored_schema_version(&conn) >= schema::CURRENT_SCHEMA_VERSION {
            debug!("schema is current, nothing to do");
            return Ok(());
        }

        for ddl in schema::SCHEMA_STATEMENTS {
            conn.execute_batch(ddl).map_err(|e| StorageError::Migration {
                name: "create_tables".into(),
                reason: format!("{e} (in: {})", first_line(ddl)),
            })?;
        }

        // Seed defaults without clobbering values from an earlier init.
        for &(key, value) in schema::DEFAULT_CONFIG {
            conn.execute(
                "INSERT OR IGNORE INTO config (key, value) VALUES (?1, ?2)",
                rusqlite::params![key, value],
            )
            .map_err(|e| StorageError::Migration {
                name: "seed_config".into(),
                reason: format!("{key}: {e}"),
            })?;
        }

        apply_migrations(&conn)?;

        conn.execute(
            "INSERT OR REPLACE INTO config (key, value) VALUES ('schema_version', ?1)",
            rusqlite::params![schema::CURRENT_SCHEMA_VERSION.to_string()],
        )
        .map_err(|e| StorageError::Migration {
            name: "schema_version".into(),
            reason: e.to_string(),
        })?;

        info!(version = schema::CURRENT_SCHEMA_VERSION, "schema initialized");
        Ok(())
    }

    /// Acquires the connection lock. Every operation module goes through
    /// this.
    pub(crate) fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Connection(format!("mutex poisoned: {e}")))
    }

    // -- Config --------------------------------------------------------------

    pub fn set_config_impl(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO config (key, value) VALUES (?1, ?2)",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    pub fn get_config_impl(&self, key: &str) -> Result<String> {
        let conn = self.lock_conn()?;
        conn.query_row(
            "SELECT value FROM config WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get(0),
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StorageError::not_found("config", key),
            other => StorageError::Query(other),
        })
    }
}

/// The schema version recorded in the `config` table, or 0 when the table
/// or row does not exist yet.
fn stored_schema_version(conn: &Connection) -> i32 {
    conn.query_row(
        "SELECT value FROM config WHERE key = 'schema_version'",
        [],
        |row| row.get::<_, String>(0),
    )
    .ok()
    .and_then(|v| v.parse().ok())
    .unwrap_or(0)
}

/// Runs each migration in [`schema::MIGRATIONS`] that the `metadata` table
/// does not already record as applied.
fn apply_migrations(conn: &Connection) -> Result<()> {
    for &(name, sql) in schema::MIGRATIONS {
        let key = format!("migration:{name}");
        let done: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM metadata WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get(0),
            )
            .unwrap_or(0);
        if done > 0 {
            continue;
        }

        debug!(name, "applying migration");
        conn.execute_batch(sql).map_err(|e| StorageError::Migration {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        conn.execute(
            "INSERT INTO metadata (key, value) VALUES (?1, 'applied')",
            rusqlite::params![key],
        )
        .map_err(|e| StorageError::Migration {
            name: name.to_string(),
            reason: format!("bookkeeping insert failed: {e}"),
        })?;
    }
    Ok(())
}

fn first_line(sql: &str) -> &str {
    sql.trim().lines().next().unwrap_or_default()
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Shared row helpers
// ---------------------------------------------------------------------------

/// Timestamp encoding for TEXT columns (ISO 8601, millisecond precision).
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Parses a TEXT timestamp back, tolerating the handful of encodings
/// SQLite defaults can produce. A value that parses as nothing falls back
/// to now rather than poisoning the whole row scan.
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    s.parse::<DateTime<Utc>>().unwrap_or_else(|_| {
        chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
            .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ"))
            .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
            .map(|ndt| ndt.and_utc())
            .unwrap_or_else(|_| Utc::now())
    })
}

/// Reads a `DayKey` column. A malformed day is surfaced as a conversion
/// error, never silently replaced.
pub(crate) fn get_day(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> rusqlite::Result<tally_core::day::DayKey> {
    let s: String = row.get(idx)?;
    tally_core::day::DayKey::parse(&s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
