//! Habit repository operations for [`SqliteStore`].

use chrono::Utc;
use rusqlite::{Connection, Row, params};
use tracing::debug;

use tally_core::habit::{Habit, Lifecycle};

use crate::error::{Result, StorageError};
use crate::sqlite::store::{SqliteStore, format_datetime, parse_datetime};

/// All habit columns in a deterministic order for SELECT queries.
const HABIT_COLUMNS: &str =
    "id, owner_id, name, emoji, daily_target, lifecycle, created_at, updated_at, archived_at";

/// Deserialises a row into a [`Habit`].
///
/// The column order MUST match [`HABIT_COLUMNS`].
fn scan_habit(row: &Row<'_>) -> rusqlite::Result<Habit> {
    let lifecycle_str: String = row.get(5)?;
    let created_at_str: String = row.get(6)?;
    let updated_at_str: String = row.get(7)?;
    let archived_at_str: Option<String> = row.get(8)?;

    Ok(Habit {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        emoji: row.get(3)?,
        daily_target: row.get(4)?,
        lifecycle: Lifecycle::from(lifecycle_str.as_str()),
        created_at: parse_datetime(&created_at_str),
        updated_at: parse_datetime(&updated_at_str),
        archived_at: archived_at_str.as_deref().map(parse_datetime),
    })
}

/// Counts the owner's active habits on the given connection.
fn count_active_on_conn(conn: &Connection, owner_id: &str) -> Result<u32> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM habits WHERE owner_id = ?1 AND lifecycle = 'active'",
        params![owner_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

impl SqliteStore {
    /// Creates a habit, enforcing the active-habit cap.
    ///
    /// The cap check and the insert share one transaction so concurrent
    /// writers cannot both squeeze under the limit.
    pub fn create_habit_impl(&self, habit: &Habit, max_active: u32) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        let active = count_active_on_conn(&tx, &habit.owner_id)?;
        if active >= max_active {
            return Err(StorageError::ActiveHabitLimit { max: max_active });
        }

        tx.execute(
            "INSERT INTO habits
                (id, owner_id, name, emoji, daily_target, lifecycle,
                 created_at, updated_at, archived_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                habit.id,
                habit.owner_id,
                habit.name,
                habit.emoji,
                habit.daily_target,
                habit.lifecycle.as_str(),
                format_datetime(&habit.created_at),
                format_datetime(&habit.updated_at),
                habit.archived_at.as_ref().map(format_datetime),
            ],
        )?;

        tx.commit()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        debug!(id = %habit.id, owner = %habit.owner_id, "habit created");
        Ok(())
    }

    /// Retrieves a habit by ID.
    pub fn get_habit_impl(&self, id: &str) -> Result<Habit> {
        let conn = self.lock_conn()?;
        conn.query_row(
            &format!("SELECT {HABIT_COLUMNS} FROM habits WHERE id = ?1"),
            params![id],
            scan_habit,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StorageError::not_found("habit", id),
            other => StorageError::Query(other),
        })
    }

    /// Returns the owner's active habits in creation order.
    pub fn list_active_habits_impl(&self, owner_id: &str) -> Result<Vec<Habit>> {
        self.list_habits_where(owner_id, "AND lifecycle = 'active'")
    }

    /// Returns all of the owner's habits, archived included.
    pub fn list_habits_impl(&self, owner_id: &str) -> Result<Vec<Habit>> {
        self.list_habits_where(owner_id, "")
    }

    fn list_habits_where(&self, owner_id: &str, extra: &str) -> Result<Vec<Habit>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {HABIT_COLUMNS} FROM habits
             WHERE owner_id = ?1 {extra}
             ORDER BY created_at ASC, id ASC"
        ))?;
        let rows = stmt.query_map(params![owner_id], scan_habit)?;
        let mut habits = Vec::new();
        for row in rows {
            habits.push(row?);
        }
        Ok(habits)
    }

    /// Renames a habit.
    pub fn rename_habit_impl(&self, id: &str, name: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        let affected = conn.execute(
            "UPDATE habits SET name = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, name, format_datetime(&Utc::now())],
        )?;
        if affected == 0 {
            return Err(StorageError::not_found("habit", id));
        }
        Ok(())
    }

    /// Changes a habit's daily target.
    pub fn set_daily_target_impl(&self, id: &str, daily_target: u32) -> Result<()> {
        let conn = self.lock_conn()?;
        let affected = conn.execute(
            "UPDATE habits SET daily_target = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, daily_target, format_datetime(&Utc::now())],
        )?;
        if affected == 0 {
            return Err(StorageError::not_found("habit", id));
        }
        Ok(())
    }

    /// Soft-deletes a habit. Idempotent; the ledger is untouched.
    pub fn archive_habit_impl(&self, id: &str) -> Result<()> {
        let affected = {
            let conn = self.lock_conn()?;
            let now_str = format_datetime(&Utc::now());
            conn.execute(
                "UPDATE habits
                 SET lifecycle = 'archived', archived_at = ?2, updated_at = ?2
                 WHERE id = ?1 AND lifecycle = 'active'",
                params![id, now_str],
            )?
        };
        if affected == 0 {
            // Distinguish already-archived (fine) from missing (error).
            self.get_habit_impl(id)?;
        }
        debug!(id, "habit archived");
        Ok(())
    }

    /// Reactivates an archived habit, re-checking the active-habit cap.
    pub fn restore_habit_impl(&self, id: &str, max_active: u32) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        let habit = tx
            .query_row(
                &format!("SELECT {HABIT_COLUMNS} FROM habits WHERE id = ?1"),
                params![id],
                scan_habit,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StorageError::not_found("habit", id),
                other => StorageError::Query(other),
            })?;

        if habit.is_active() {
            return Ok(());
        }

        let active = count_active_on_conn(&tx, &habit.owner_id)?;
        if active >= max_active {
            return Err(StorageError::ActiveHabitLimit { max: max_active });
        }

        tx.execute(
            "UPDATE habits
             SET lifecycle = 'active', archived_at = NULL, updated_at = ?2
             WHERE id = ?1",
            params![id, format_datetime(&Utc::now())],
        )?;

        tx.commit()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        debug!(id, "habit restored");
        Ok(())
    }

    /// Counts the owner's active habits.
    pub fn count_active_habits_impl(&self, owner_id: &str) -> Result<u32> {
        let conn = self.lock_conn()?;
        count_active_on_conn(&conn, owner_id)
    }
}
