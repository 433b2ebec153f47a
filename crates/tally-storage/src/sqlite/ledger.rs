//! Completion ledger operations for [`SqliteStore`].
//!
//! The ledger is append-only: one row per completion event, keyed by
//! `(habit_id, day)`. Appends are capped at the habit's daily target inside
//! a transaction, so a day can never be over-logged.

use chrono::Utc;
use rusqlite::params;
use tracing::debug;

use tally_core::completion::Completion;
use tally_core::day::DayKey;

use crate::error::{Result, StorageError};
use crate::sqlite::store::{SqliteStore, format_datetime, get_day, parse_datetime};

impl SqliteStore {
    /// Appends one completion event unless the day's target is already met.
    ///
    /// Returns `true` when the event was recorded, `false` when the call
    /// was ignored (target reached). The target read, the count and the
    /// insert share one transaction.
    pub fn record_completion_impl(&self, habit_id: &str, day: DayKey) -> Result<bool> {
        let mut conn = self.lock_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        let daily_target: u32 = tx
            .query_row(
                "SELECT daily_target FROM habits WHERE id = ?1",
                params![habit_id],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StorageError::not_found("habit", habit_id),
                other => StorageError::Query(other),
            })?;

        let logged: u32 = tx.query_row(
            "SELECT COUNT(*) FROM completions WHERE habit_id = ?1 AND day = ?2",
            params![habit_id, day.to_string()],
            |row| row.get(0),
        )?;

        if logged >= daily_target {
            debug!(habit_id, %day, logged, daily_target, "completion ignored, target met");
            return Ok(false);
        }

        tx.execute(
            "INSERT INTO completions (habit_id, day, recorded_at) VALUES (?1, ?2, ?3)",
            params![habit_id, day.to_string(), format_datetime(&Utc::now())],
        )?;

        tx.commit()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        debug!(habit_id, %day, "completion recorded");
        Ok(true)
    }

    /// Removes one completion event for `(habit_id, day)`, if any exists.
    ///
    /// Events for a day are interchangeable units; the lowest row id is
    /// removed to keep the choice deterministic. Returns `true` when a row
    /// was removed.
    pub fn remove_completion_impl(&self, habit_id: &str, day: DayKey) -> Result<bool> {
        let conn = self.lock_conn()?;
        let affected = conn.execute(
            "DELETE FROM completions
             WHERE id = (
                 SELECT MIN(id) FROM completions WHERE habit_id = ?1 AND day = ?2
             )",
            params![habit_id, day.to_string()],
        )?;
        if affected > 0 {
            debug!(habit_id, %day, "completion removed");
        }
        Ok(affected > 0)
    }

    /// Returns every completion event for the habit, oldest day first.
    pub fn completions_for_impl(&self, habit_id: &str) -> Result<Vec<Completion>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, habit_id, day, recorded_at
             FROM completions WHERE habit_id = ?1
             ORDER BY day ASC, id ASC",
        )?;
        let rows = stmt.query_map(params![habit_id], |row| {
            let recorded_at_str: String = row.get(3)?;
            Ok(Completion {
                id: row.get(0)?,
                habit_id: row.get(1)?,
                day: get_day(row, 2)?,
                recorded_at: parse_datetime(&recorded_at_str),
            })
        })?;
        let mut completions = Vec::new();
        for row in rows {
            completions.push(row?);
        }
        Ok(completions)
    }

    /// Returns the day of every completion event for the habit, one entry
    /// per event. The statistics engine re-aggregates by day, so no
    /// ordering is promised.
    pub fn completion_days_impl(&self, habit_id: &str) -> Result<Vec<DayKey>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare("SELECT day FROM completions WHERE habit_id = ?1")?;
        let rows = stmt.query_map(params![habit_id], |row| get_day(row, 0))?;
        let mut days = Vec::new();
        for row in rows {
            days.push(row?);
        }
        Ok(days)
    }

    /// Counts completion events for `(habit_id, day)`.
    pub fn count_completions_impl(&self, habit_id: &str, day: DayKey) -> Result<u32> {
        let conn = self.lock_conn()?;
        let count: u32 = conn.query_row(
            "SELECT COUNT(*) FROM completions WHERE habit_id = ?1 AND day = ?2",
            params![habit_id, day.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
