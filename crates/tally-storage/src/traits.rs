//! The `Storage` trait -- the public API for habit persistence.
//!
//! Consumers depend on this trait rather than on concrete implementations
//! so that alternative backends (mocks, proxies, etc.) can be substituted.
//! It bundles the three record stores the statistics engine depends on:
//! the identity store, the habit repository, and the completion ledger.

use tally_core::completion::Completion;
use tally_core::day::DayKey;
use tally_core::habit::Habit;
use tally_core::user::User;

use crate::error::Result;

/// Primary storage interface for habit persistence.
pub trait Storage: Send + Sync {
    // -- Identity store ------------------------------------------------------

    /// Creates a new account. Fails with `EmailTaken` on a duplicate email.
    fn create_user(&self, user: &User) -> Result<()>;

    /// Retrieves an account by its ID.
    fn get_user(&self, id: &str) -> Result<User>;

    /// Looks up an account by email address.
    fn find_user_by_email(&self, email: &str) -> Result<User>;

    /// Returns all accounts, oldest first.
    fn list_users(&self) -> Result<Vec<User>>;

    // -- Habit repository ----------------------------------------------------

    /// Creates a new habit. Fails with `ActiveHabitLimit` when the owner
    /// already has `max_active` active habits; the count check and insert
    /// run in one transaction.
    fn create_habit(&self, habit: &Habit, max_active: u32) -> Result<()>;

    /// Retrieves a habit by its ID.
    fn get_habit(&self, id: &str) -> Result<Habit>;

    /// Returns the owner's active habits in creation order.
    fn list_active_habits(&self, owner_id: &str) -> Result<Vec<Habit>>;

    /// Returns all of the owner's habits, archived included.
    fn list_habits(&self, owner_id: &str) -> Result<Vec<Habit>>;

    /// Renames a habit.
    fn rename_habit(&self, id: &str, name: &str) -> Result<()>;

    /// Changes a habit's daily target.
    fn set_daily_target(&self, id: &str, daily_target: u32) -> Result<()>;

    /// Soft-deletes a habit. The completion ledger is retained.
    fn archive_habit(&self, id: &str) -> Result<()>;

    /// Reactivates an archived habit, re-checking the active-habit cap.
    fn restore_habit(&self, id: &str, max_active: u32) -> Result<()>;

    /// Counts the owner's active habits.
    fn count_active_habits(&self, owner_id: &str) -> Result<u32>;

    // -- Completion ledger ---------------------------------------------------

    /// Appends one completion event for `(habit_id, day)` unless the
    /// habit's daily target for that day is already met.
    ///
    /// Returns `true` when an event was recorded, `false` when the call was
    /// ignored because the target was already reached. Over-logging is not
    /// an error. The check-then-insert runs in one transaction.
    fn record_completion(&self, habit_id: &str, day: DayKey) -> Result<bool>;

    /// Removes one completion event for `(habit_id, day)`, if any exists.
    ///
    /// Events for a day are interchangeable units, so an arbitrary matching
    /// event is removed. Returns `true` when an event was removed. Other
    /// days' counts are never touched.
    fn remove_completion(&self, habit_id: &str, day: DayKey) -> Result<bool>;

    /// Returns every completion event ever recorded for the habit.
    fn completions_for(&self, habit_id: &str) -> Result<Vec<Completion>>;

    /// Returns the day of every completion event for the habit, one entry
    /// per event (the statistics engine re-aggregates by day).
    fn completion_days(&self, habit_id: &str) -> Result<Vec<DayKey>>;

    /// Counts completion events for `(habit_id, day)`.
    fn count_completions(&self, habit_id: &str, day: DayKey) -> Result<u32>;

    // -- Configuration -------------------------------------------------------

    /// Sets a configuration key-value pair.
    fn set_config(&self, key: &str, value: &str) -> Result<()>;

    /// Gets a configuration value by key.
    fn get_config(&self, key: &str) -> Result<String>;
}
